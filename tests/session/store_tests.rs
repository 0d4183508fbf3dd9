// Conversation store tests - behaviour shared by both store implementations

use orrery_session::{
    ChatMessage, ConversationStore, FileConversationStore, InMemoryConversationStore,
    MessageRole, SessionError, estimate_tokens,
};
use tempfile::tempdir;

fn exercise_store(store: &dyn ConversationStore) {
    assert!(store.messages("conv").unwrap().is_empty());
    assert_eq!(store.estimate_tokens("conv").unwrap(), 0);

    store
        .create("conv", vec![ChatMessage::system("seed")])
        .unwrap();
    for n in 0..5 {
        store
            .add("conv", ChatMessage::user(format!("message {n}")))
            .unwrap();
    }
    let messages = store.messages("conv").unwrap();
    assert_eq!(messages.len(), 5 + 1);
    assert_eq!(messages[0].role, MessageRole::System);
    assert_eq!(messages[5].content, "message 4");

    assert!(matches!(
        store.create("conv", Vec::new()),
        Err(SessionError::AlreadyExists { .. })
    ));
    assert!(matches!(
        store.add("missing", ChatMessage::user("hi")),
        Err(SessionError::NotFound { .. })
    ));
    assert!(matches!(
        store.add("conv", ChatMessage::assistant("   ")),
        Err(SessionError::InvalidMessage { .. })
    ));

    store.clear("conv").unwrap();
    assert!(store.messages("conv").unwrap().is_empty());
    assert!(store.exists("conv").unwrap());
    store.add("conv", ChatMessage::user("after clear")).unwrap();
    assert_eq!(store.messages("conv").unwrap().len(), 1);
}

#[test]
fn in_memory_store_contract() {
    exercise_store(&InMemoryConversationStore::new());
}

#[test]
fn file_store_contract() {
    let dir = tempdir().expect("tempdir");
    let store = FileConversationStore::open(dir.path()).expect("open");
    exercise_store(&store);
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempdir().expect("tempdir");
    {
        let store = FileConversationStore::open(dir.path()).expect("open");
        store
            .create("persisted", vec![ChatMessage::system("seed")])
            .unwrap();
        store.add("persisted", ChatMessage::user("hello")).unwrap();
    }

    let store = FileConversationStore::open(dir.path()).expect("reopen");
    let conversation = store.get("persisted").unwrap().expect("conversation kept");
    assert_eq!(conversation.messages.len(), 2);
    assert!(conversation.updated_at >= conversation.created_at);
}

#[test]
fn ids_that_could_escape_the_directory_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let store = FileConversationStore::open(dir.path()).expect("open");
    for id in ["../outside", "a/b", "", "dot.ted"] {
        assert!(
            matches!(
                store.create(id, vec![ChatMessage::system("seed")]),
                Err(SessionError::InvalidId { .. })
            ),
            "accepted id {id:?}"
        );
    }
}

#[test]
fn token_estimate_is_ceil_of_characters_over_four() {
    let store = InMemoryConversationStore::new();
    store
        .create(
            "tokens",
            vec![ChatMessage::system("abc"), ChatMessage::user("defgh")],
        )
        .unwrap();
    // 8 characters
    assert_eq!(store.estimate_tokens("tokens").unwrap(), 2);
    store.add("tokens", ChatMessage::assistant("i")).unwrap();
    assert_eq!(store.estimate_tokens("tokens").unwrap(), 3);
    assert_eq!(
        estimate_tokens(&store.messages("tokens").unwrap()),
        store.estimate_tokens("tokens").unwrap()
    );
}
