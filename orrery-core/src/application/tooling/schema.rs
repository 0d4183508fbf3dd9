//! Declarative argument schemas.
//!
//! An [`ObjectSchema`] describes the top-level fields of a JSON object: their
//! kind, whether they are required and a short description. Validation is
//! strict (unknown keys are reported) and yields one
//! [`FieldIssue`] per problem so callers can show every mistake at once.

use serde::Serialize;
use serde_json::{Map, Number, Value, json};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Any,
    /// A string restricted to a fixed set of values.
    Enum(Vec<String>),
    /// Exactly this JSON value.
    Literal(Value),
}

impl FieldKind {
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldKind::Enum(values.into_iter().map(Into::into).collect())
    }

    pub fn describe(&self) -> String {
        match self {
            FieldKind::String => "string".into(),
            FieldKind::Number => "number".into(),
            FieldKind::Integer => "integer".into(),
            FieldKind::Boolean => "boolean".into(),
            FieldKind::Object => "object".into(),
            FieldKind::Array => "array".into(),
            FieldKind::Any => "any".into(),
            FieldKind::Enum(values) => format!("one of {}", values.join(" | ")),
            FieldKind::Literal(value) => format!("literal {value}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub description: Option<String>,
}

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}

impl FieldIssue {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            received: None,
        }
    }

    fn received(mut self, value: &Value) -> Self {
        self.received = Some(json_type_name(value).to_string());
        self
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)?;
        if let Some(received) = &self.received {
            write!(f, " (received {received})")?;
        }
        Ok(())
    }
}

pub const ROOT_PATH: &str = "(root)";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    fields: Vec<FieldSpec>,
    coerce: bool,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(self, name: &str, kind: FieldKind, description: &str) -> Self {
        self.field(name, kind, true, description)
    }

    pub fn optional(self, name: &str, kind: FieldKind, description: &str) -> Self {
        self.field(name, kind, false, description)
    }

    fn field(mut self, name: &str, kind: FieldKind, required: bool, description: &str) -> Self {
        let description = (!description.trim().is_empty()).then(|| description.to_string());
        self.fields.push(FieldSpec {
            name: name.to_string(),
            kind,
            required,
            description,
        });
        self
    }

    /// Accept numeric and boolean values spelled as strings (`"42"`, `"true"`).
    pub fn coerce_primitives(mut self) -> Self {
        self.coerce = true;
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Validates `value` and returns the (possibly coerced) object.
    pub fn validate(&self, value: &Value) -> Result<Map<String, Value>, Vec<FieldIssue>> {
        let Some(object) = value.as_object() else {
            return Err(vec![
                FieldIssue::new(ROOT_PATH, "expected object").received(value),
            ]);
        };

        let mut issues = Vec::new();
        let mut output = Map::new();

        for spec in &self.fields {
            match object.get(&spec.name) {
                None if spec.required => {
                    issues.push(FieldIssue::new(&spec.name, "required field is missing"));
                }
                None => {}
                Some(found) => match self.check(&spec.kind, found) {
                    Ok(accepted) => {
                        output.insert(spec.name.clone(), accepted);
                    }
                    Err(message) => {
                        issues.push(FieldIssue::new(&spec.name, message).received(found));
                    }
                },
            }
        }

        for key in object.keys() {
            if !self.fields.iter().any(|spec| &spec.name == key) {
                issues.push(FieldIssue::new(key, "unrecognized field"));
            }
        }

        if issues.is_empty() {
            Ok(output)
        } else {
            Err(issues)
        }
    }

    fn check(&self, kind: &FieldKind, value: &Value) -> Result<Value, String> {
        let mismatch = || format!("expected {}", kind.describe());
        match kind {
            FieldKind::Any => Ok(value.clone()),
            FieldKind::String if value.is_string() => Ok(value.clone()),
            FieldKind::Number if value.is_number() => Ok(value.clone()),
            FieldKind::Number if self.coerce => coerce_number(value).ok_or_else(mismatch),
            FieldKind::Integer if value.is_i64() || value.is_u64() => Ok(value.clone()),
            FieldKind::Integer if self.coerce => coerce_integer(value).ok_or_else(mismatch),
            FieldKind::Boolean if value.is_boolean() => Ok(value.clone()),
            FieldKind::Boolean if self.coerce => coerce_boolean(value).ok_or_else(mismatch),
            FieldKind::Object if value.is_object() => Ok(value.clone()),
            FieldKind::Array if value.is_array() => Ok(value.clone()),
            FieldKind::Enum(allowed) => match value.as_str() {
                Some(text) if allowed.iter().any(|candidate| candidate == text) => {
                    Ok(value.clone())
                }
                Some(text) => Err(format!(
                    "invalid value '{text}', expected {}",
                    kind.describe()
                )),
                None => Err(mismatch()),
            },
            FieldKind::Literal(expected) if value == expected => Ok(value.clone()),
            FieldKind::Literal(expected) => Err(format!("invalid literal, expected {expected}")),
            _ => Err(mismatch()),
        }
    }

    /// Human-readable parameter documentation, keyed by field name.
    pub fn parameters(&self) -> Value {
        let mut docs = Map::new();
        for spec in &self.fields {
            let presence = if spec.required { "required" } else { "optional" };
            let mut line = format!("{} ({presence})", spec.kind.describe());
            if let Some(description) = &spec.description {
                line.push_str(": ");
                line.push_str(description);
            }
            docs.insert(spec.name.clone(), json!(line));
        }
        Value::Object(docs)
    }
}

fn coerce_number(value: &Value) -> Option<Value> {
    let parsed: f64 = value.as_str()?.trim().parse().ok()?;
    Number::from_f64(parsed).map(Value::Number)
}

fn coerce_integer(value: &Value) -> Option<Value> {
    let parsed: i64 = value.as_str()?.trim().parse().ok()?;
    Some(Value::from(parsed))
}

fn coerce_boolean(value: &Value) -> Option<Value> {
    match value.as_str()?.trim() {
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        _ => None,
    }
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
