//! Port traits for infrastructure boundaries.
//!
//! These are the only seams where the engine talks to the outside world:
//! - The ranking API (paged HTTP endpoint)
//! - The chat bridge (post/update/delete messages, ephemeral replies)
//! - Clock (for testing)

mod error;
mod external;
mod testing;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{MessagingPort, RankingApiPort};

#[cfg(test)]
pub use external::{MockMessagingPort, MockRankingApiPort};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::{MessagingError, UpstreamFetchError};
