//! Error types for port operations.

/// A ranking API page could not be obtained.
///
/// Every transport, status and body failure is folded into this type at the
/// adapter boundary; nothing above it ever sees a raw HTTP error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamFetchError {
    /// The API answered with a non-success status.
    #[error("Ranking API returned status {status} for page {page}")]
    Status { page: u32, status: u16 },

    /// The request never produced a response.
    #[error("Ranking API request for page {page} failed: {message}")]
    Transport { page: u32, message: String },

    /// The response body was not a valid page.
    #[error("Ranking API page {page} was malformed: {message}")]
    MalformedBody { page: u32, message: String },
}

impl UpstreamFetchError {
    pub fn transport(page: u32, message: impl ToString) -> Self {
        Self::Transport {
            page,
            message: message.to_string(),
        }
    }

    pub fn malformed(page: u32, message: impl ToString) -> Self {
        Self::MalformedBody {
            page,
            message: message.to_string(),
        }
    }

    /// Page number the failed fetch was for.
    pub fn page(&self) -> u32 {
        match self {
            Self::Status { page, .. }
            | Self::Transport { page, .. }
            | Self::MalformedBody { page, .. } => *page,
        }
    }

    /// HTTP status, when the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The chat bridge rejected or never received a message operation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MessagingError {
    #[error("Chat bridge request failed in {operation}: {message}")]
    RequestFailed {
        operation: &'static str,
        message: String,
    },

    #[error("Chat bridge returned status {status} in {operation}")]
    Rejected { operation: &'static str, status: u16 },

    #[error("Invalid chat bridge response: {0}")]
    InvalidResponse(String),
}

impl MessagingError {
    pub fn request_failed(operation: &'static str, message: impl ToString) -> Self {
        Self::RequestFailed {
            operation,
            message: message.to_string(),
        }
    }
}
