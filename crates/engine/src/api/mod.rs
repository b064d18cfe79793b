//! API layer - HTTP entry points for the chat bridge.

pub mod http;
