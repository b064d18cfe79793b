//! What a browse or search asks the ranking API for.

use serde::{Deserialize, Serialize};

use crate::error::WeightError;
use crate::weights::{Proportions, WeightVector};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RankingQuery {
    /// Rank every fractal by weighted stats.
    Weighted {
        weights: WeightVector,
        proportions: Proportions,
    },
    /// Free-text name search.
    ByName { term: String },
}

impl RankingQuery {
    /// Normalize `weights` up front so a degenerate vector never reaches the
    /// network.
    pub fn weighted(weights: WeightVector) -> Result<Self, WeightError> {
        let proportions = weights.normalize()?;
        Ok(Self::Weighted {
            weights,
            proportions,
        })
    }

    pub fn by_name(term: impl Into<String>) -> Self {
        Self::ByName { term: term.into() }
    }

    /// Shown in each card's description: the weight list or the search term.
    pub fn label(&self) -> String {
        match self {
            RankingQuery::Weighted { weights, .. } => weights.to_string(),
            RankingQuery::ByName { term } => term.clone(),
        }
    }
}
