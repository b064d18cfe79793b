//! Stat weights and their normalized proportions.
//!
//! A user ranks fractals by saying how much each of the six stats matters to
//! them. Only the ratios matter: `1,1,1,1,1,1` and `100,100,100,100,100,100`
//! produce the same query.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WeightError;

/// Six non-negative stat weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeightVector {
    faction: u32,
    power: u32,
    purity: u32,
    velocity: u32,
    spin: u32,
    altitude: u32,
}

impl WeightVector {
    pub const fn new(
        faction: u32,
        power: u32,
        purity: u32,
        velocity: u32,
        spin: u32,
        altitude: u32,
    ) -> Self {
        Self {
            faction,
            power,
            purity,
            velocity,
            spin,
            altitude,
        }
    }

    /// Build from signed command input, rejecting negative weights.
    ///
    /// Arguments follow the storage order `faction, power, purity, velocity,
    /// spin, altitude`.
    pub fn from_signed(values: [i64; 6]) -> Result<Self, WeightError> {
        const NAMES: [&str; 6] = ["faction", "power", "purity", "velocity", "spin", "altitude"];

        let mut out = [0u32; 6];
        for (i, value) in values.iter().enumerate() {
            out[i] = u32::try_from(*value).map_err(|_| WeightError::OutOfRange {
                stat: NAMES[i],
                value: *value,
            })?;
        }
        Ok(Self::new(out[0], out[1], out[2], out[3], out[4], out[5]))
    }

    pub fn faction(&self) -> u32 {
        self.faction
    }

    pub fn power(&self) -> u32 {
        self.power
    }

    pub fn purity(&self) -> u32 {
        self.purity
    }

    pub fn velocity(&self) -> u32 {
        self.velocity
    }

    pub fn spin(&self) -> u32 {
        self.spin
    }

    pub fn altitude(&self) -> u32 {
        self.altitude
    }

    /// Sum of all weights, widened so six `u32::MAX` values cannot overflow.
    pub fn total(&self) -> u64 {
        [
            self.faction,
            self.power,
            self.purity,
            self.velocity,
            self.spin,
            self.altitude,
        ]
        .iter()
        .map(|w| u64::from(*w))
        .sum()
    }

    /// Divide every weight by the total.
    ///
    /// An all-zero vector is rejected with [`WeightError::Degenerate`]; there
    /// is no fallback distribution.
    pub fn normalize(&self) -> Result<Proportions, WeightError> {
        let total = self.total();
        if total == 0 {
            return Err(WeightError::Degenerate);
        }
        let total = total as f64;
        let share = |w: u32| f64::from(w) / total;

        Ok(Proportions {
            faction: share(self.faction),
            power: share(self.power),
            purity: share(self.purity),
            velocity: share(self.velocity),
            spin: share(self.spin),
            altitude: share(self.altitude),
        })
    }
}

impl Default for WeightVector {
    fn default() -> Self {
        Self::new(1, 1, 1, 1, 1, 1)
    }
}

/// Rendered like a list, in storage order: `[0, 1, 5, 1, 1, 10]`.
impl fmt::Display for WeightVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}, {}, {}]",
            self.faction, self.power, self.purity, self.velocity, self.spin, self.altitude
        )
    }
}

/// Normalized weights; every field is in `[0, 1]` and they sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Proportions {
    pub faction: f64,
    pub power: f64,
    pub purity: f64,
    pub velocity: f64,
    pub spin: f64,
    pub altitude: f64,
}

impl Proportions {
    /// Query parameters in the order the ranking API documents them.
    pub fn query_pairs(&self) -> [(&'static str, f64); 6] {
        [
            ("mul_altitude", self.altitude),
            ("mul_spin", self.spin),
            ("mul_velocity", self.velocity),
            ("mul_purity", self.purity),
            ("mul_power", self.power),
            ("mul_faction", self.faction),
        ]
    }

    pub fn sum(&self) -> f64 {
        self.faction + self.power + self.purity + self.velocity + self.spin + self.altitude
    }
}

/// Append the six multiplier parameters to `endpoint`.
///
/// Parameter order is fixed so identical weights always produce identical
/// URLs.
pub fn build_query_url(endpoint: &str, proportions: &Proportions) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    let query = proportions
        .query_pairs()
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("{endpoint}{separator}{query}")
}
