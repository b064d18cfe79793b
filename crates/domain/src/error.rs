//! Domain error types.

use thiserror::Error;

/// Weight input that cannot be turned into a ranking query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WeightError {
    /// Every weight is zero, so there is nothing to divide by.
    #[error("At least one weight must be greater than zero")]
    Degenerate,

    /// A weight was negative or does not fit in 32 bits.
    #[error("Weight for {stat} must be between 0 and {max}, got {value}", max = u32::MAX)]
    OutOfRange { stat: &'static str, value: i64 },
}

/// A component token carried our delete prefix but no usable principal list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Malformed delete token: {reason}")]
pub struct MalformedTokenError {
    pub reason: String,
}

impl MalformedTokenError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
