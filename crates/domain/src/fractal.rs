//! Fractal records as returned by the ranking API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One ranked fractal. Read-only: it is rendered and discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fractal {
    /// Zero-based rank within the current query.
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub faction: String,
    pub power: f64,
    pub purity: f64,
    pub velocity: f64,
    pub spin: f64,
    pub altitude: f64,
    pub perc_power: f64,
    pub perc_purity: f64,
    pub perc_velocity: f64,
    pub perc_spin: f64,
    pub perc_altitude: f64,
    #[serde(default)]
    pub for_sale: i64,
    #[serde(default)]
    pub price_sol: Option<f64>,
    #[serde(default)]
    pub marketplace: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
}

impl Fractal {
    pub fn is_for_sale(&self) -> bool {
        self.for_sale > 0
    }

    pub fn faction_kind(&self) -> Faction {
        Faction::parse(&self.faction)
    }
}

/// Known factions; anything else renders as [`Faction::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faction {
    Tri,
    Quad,
    Penta,
    Hexa,
    Other,
}

impl Faction {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "tri" => Faction::Tri,
            "quad" => Faction::Quad,
            "penta" => Faction::Penta,
            "hexa" => Faction::Hexa,
            _ => Faction::Other,
        }
    }

    /// Card accent color as `0xRRGGBB`.
    pub fn color(self) -> u32 {
        match self {
            Faction::Tri => 0x0000FF,
            Faction::Quad => 0xFF0000,
            Faction::Penta => 0x800080,
            Faction::Hexa => 0xFFD700,
            Faction::Other => 0x808080,
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Faction::Tri => write!(f, "tri"),
            Faction::Quad => write!(f, "quad"),
            Faction::Penta => write!(f, "penta"),
            Faction::Hexa => write!(f, "hexa"),
            Faction::Other => write!(f, "other"),
        }
    }
}
