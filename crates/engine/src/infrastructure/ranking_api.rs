//! HTTP client for the fractal ranking API.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;

use flakerank_domain::{build_query_url, Fractal, RankingQuery};

use crate::infrastructure::ports::{RankingApiPort, UpstreamFetchError};

/// Client for the ranking API's paged endpoint.
#[derive(Clone)]
pub struct RankingApiClient {
    client: Client,
    endpoint: String,
}

impl RankingApiClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            endpoint: endpoint.trim().to_string(),
        }
    }
}

#[async_trait]
impl RankingApiPort for RankingApiClient {
    async fn fetch_page(
        &self,
        query: &RankingQuery,
        page: u32,
    ) -> Result<Vec<Fractal>, UpstreamFetchError> {
        let url = page_url(&self.endpoint, query, page)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamFetchError::transport(page, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(page, status = status.as_u16(), "Ranking API returned an error status");
            return Err(UpstreamFetchError::Status {
                page,
                status: status.as_u16(),
            });
        }

        let body: PageBody = response
            .json()
            .await
            .map_err(|e| UpstreamFetchError::malformed(page, e))?;

        tracing::debug!(page, count = body.data.len(), "Fetched ranking page");
        Ok(body.data)
    }
}

/// Full URL for one page of `query`.
fn page_url(endpoint: &str, query: &RankingQuery, page: u32) -> Result<Url, UpstreamFetchError> {
    let page_param = page.to_string();
    let url = match query {
        RankingQuery::Weighted { proportions, .. } => {
            Url::parse(&build_query_url(endpoint, proportions)).map(|mut url| {
                url.query_pairs_mut().append_pair("page", &page_param);
                url
            })
        }
        RankingQuery::ByName { term } => {
            Url::parse_with_params(endpoint, [("s", term.as_str()), ("page", page_param.as_str())])
        }
    };
    url.map_err(|e| UpstreamFetchError::transport(page, format!("invalid endpoint '{endpoint}': {e}")))
}

// =============================================================================
// API types
// =============================================================================

#[derive(Debug, Deserialize)]
struct PageBody {
    data: Vec<Fractal>,
}
