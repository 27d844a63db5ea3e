//! One-rep max estimation formulas.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Highest rep count the Brzycki denominator (37 - reps) stays positive for.
pub const MAX_ESTIMABLE_REPS: u32 = 36;

/// Mayhew et al. coefficients.
mod mayhew {
    pub const A: f64 = 52.2;
    pub const B: f64 = 41.9;
    pub const C: f64 = -0.055;
}

/// Which estimation formula to use for 1RM updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OneRmFormula {
    #[default]
    Brzycki,
    Epley,
    Mayhew,
}

impl OneRmFormula {
    /// Estimates a 1RM with this formula. Same domain and rounding as
    /// [`estimate_one_rm`].
    pub fn estimate(&self, weight_kg: f64, reps: u32) -> Option<f64> {
        if !in_domain(weight_kg, reps) {
            return None;
        }

        let w = weight_kg;
        let r = reps as f64;

        let raw = match self {
            // Brzycki: w × 36 / (37 - r)
            OneRmFormula::Brzycki => w * 36.0 / (37.0 - r),
            // Epley: w × (1 + r/30), exact at one rep
            OneRmFormula::Epley if reps == 1 => w,
            OneRmFormula::Epley => w * (1.0 + r / 30.0),
            // Mayhew: 100w / (52.2 + 41.9 × e^(-0.055r))
            OneRmFormula::Mayhew => 100.0 * w / (mayhew::A + mayhew::B * (mayhew::C * r).exp()),
        };

        Some(raw.round())
    }
}

impl FromStr for OneRmFormula {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "brzycki" => Ok(OneRmFormula::Brzycki),
            "epley" => Ok(OneRmFormula::Epley),
            "mayhew" => Ok(OneRmFormula::Mayhew),
            _ => Err(ParseError::UnknownFormula(s.to_string())),
        }
    }
}

/// True when (weight, reps) is a valid input for 1RM estimation.
pub fn in_domain(weight_kg: f64, reps: u32) -> bool {
    weight_kg > 0.0 && (1..=MAX_ESTIMABLE_REPS).contains(&reps)
}

/// Estimates a 1RM with the Brzycki formula, rounded to the nearest whole unit.
///
/// Returns None outside the formula's domain: weight must be positive and
/// reps within 1..=36.
pub fn estimate_one_rm(weight_kg: f64, reps: u32) -> Option<f64> {
    OneRmFormula::Brzycki.estimate(weight_kg, reps)
}

/// Fraction of 1RM that can be lifted for `reps` according to Brzycki.
pub fn brzycki_intensity(reps: u32) -> Option<f64> {
    if (1..=MAX_ESTIMABLE_REPS).contains(&reps) {
        Some((37.0 - reps as f64) / 36.0)
    } else {
        None
    }
}
