//! # Application Module
//!
//! - [`agent`] - the orchestration loop and its response protocol
//! - [`tooling`] - tool contract, argument schemas, registry and built-in tools

pub mod agent;
pub mod tooling;
