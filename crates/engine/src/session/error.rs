//! Session operation errors.

use super::SessionState;
use crate::infrastructure::ports::UpstreamFetchError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The requester is neither an owner nor holds an owning role.
    #[error("Requester is not allowed to operate this session")]
    Unauthorized,
    #[error("Session is {0}")]
    Inactive(SessionState),
    #[error(transparent)]
    Upstream(#[from] UpstreamFetchError),
}
