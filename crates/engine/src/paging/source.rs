//! Lazy, forward-only source over the ranking API's pages.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;

use flakerank_domain::RankingQuery;
use flakerank_shared::RenderedEntry;

use super::render::render_fractal;
use super::EntrySource;
use crate::infrastructure::ports::{ClockPort, RankingApiPort, UpstreamFetchError};

/// Pages through one ranking query.
///
/// Holds at most one rendered page. A new page is fetched only when the
/// buffer is empty and an entry is requested, so `n` calls over pages of
/// size `p` cost at most `ceil(n / p)` fetches. Once the API returns an
/// empty page or fails, the source is finished for good.
pub struct PaginatedResultSource {
    api: Arc<dyn RankingApiPort>,
    clock: Arc<dyn ClockPort>,
    query: RankingQuery,
    label: String,
    next_page: u32,
    buffer: VecDeque<RenderedEntry>,
    finished: bool,
}

impl PaginatedResultSource {
    pub fn new(api: Arc<dyn RankingApiPort>, clock: Arc<dyn ClockPort>, query: RankingQuery) -> Self {
        let label = query.label();
        Self {
            api,
            clock,
            query,
            label,
            next_page: 1,
            buffer: VecDeque::new(),
            finished: false,
        }
    }

    /// Number of page fetches issued so far, failed ones included.
    pub fn pages_fetched(&self) -> u32 {
        self.next_page - 1
    }

    pub fn is_finished(&self) -> bool {
        self.finished && self.buffer.is_empty()
    }
}

#[async_trait]
impl EntrySource for PaginatedResultSource {
    async fn next_entry(&mut self) -> Result<Option<RenderedEntry>, UpstreamFetchError> {
        if let Some(entry) = self.buffer.pop_front() {
            return Ok(Some(entry));
        }
        if self.finished {
            return Ok(None);
        }

        let page = self.next_page;
        self.next_page += 1;

        let fractals = match self.api.fetch_page(&self.query, page).await {
            Ok(fractals) => fractals,
            Err(e) => {
                self.finished = true;
                tracing::warn!(page, error = %e, "Page fetch failed, ending iteration");
                return Err(e);
            }
        };

        if fractals.is_empty() {
            self.finished = true;
            tracing::debug!(page, "Ranking query exhausted");
            return Ok(None);
        }

        let now = self.clock.now();
        let label = &self.label;
        self.buffer
            .extend(fractals.iter().map(|f| render_fractal(f, label, now)));
        Ok(self.buffer.pop_front())
    }
}
