//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod app_settings;
pub mod chat_rest;
pub mod clock;
pub mod ports;
pub mod ranking_api;
