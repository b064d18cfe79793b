//! Forward-only entry sources backing interactive sessions.

mod render;
mod source;

use async_trait::async_trait;

use flakerank_shared::RenderedEntry;

use crate::infrastructure::ports::UpstreamFetchError;

pub use render::render_fractal;
pub use source::PaginatedResultSource;

/// A lazy sequence of entries that can only move forward.
///
/// `Ok(None)` means exhausted. After an error or exhaustion the source
/// yields `Ok(None)` forever; earlier entries are never revisited.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntrySource: Send {
    async fn next_entry(&mut self) -> Result<Option<RenderedEntry>, UpstreamFetchError>;
}
