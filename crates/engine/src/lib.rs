//! FlakeRank Engine library.
//!
//! Server-side code for browsing fractal rankings through paged chat
//! messages.
//!
//! ## Structure
//!
//! - `paging/` - Lazy entry sources over the ranking API
//! - `session/` - Per-message session state machine
//! - `stores/` - In-memory session registry
//! - `use_cases/` - Command and button-press orchestration
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod paging;
pub mod session;
pub mod stores;
pub mod use_cases;

/// Shared builders for unit tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
