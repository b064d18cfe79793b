//! In-memory state storage modules.
//!
//! Stores hold runtime state that is never persisted:
//! - `SessionRegistry` - message id to live paging session

pub mod session_registry;

pub use session_registry::{BoundSession, EvictedSession, Lookup, SessionHandle, SessionRegistry};
