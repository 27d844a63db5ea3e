//! Engine configuration loaded from an optional JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::formulas::OneRmFormula;

/// Unit all weights are expressed in. Only affects labelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

impl WeightUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lb",
        }
    }
}

/// How the starting weight grows after a fully successful session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Increment {
    /// Fixed amount added to the previous weight.
    Flat(f64),
    /// Percentage of the previous weight, rounded to the nearest half unit.
    Percent(f64),
}

impl Default for Increment {
    fn default() -> Self {
        Increment::Flat(2.5)
    }
}

impl Increment {
    pub fn apply(&self, weight: f64) -> f64 {
        match *self {
            Increment::Flat(step) => weight + step,
            Increment::Percent(pct) => (weight * (1.0 + pct / 100.0) * 2.0).round() / 2.0,
        }
    }
}

/// Tunable engine constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub unit: WeightUnit,
    pub increment: Increment,
    /// Formula used when a met set proposes a new 1RM.
    pub formula: OneRmFormula,
    /// Whether met sets may raise the stored 1RM.
    pub auto_raise_one_rm: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unit: WeightUnit::Kg,
            increment: Increment::default(),
            formula: OneRmFormula::Brzycki,
            auto_raise_one_rm: true,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.increment {
            Increment::Flat(step) if !(step.is_finite() && step >= 0.0) => Err(
                ConfigError::Invalid(format!("flat increment must be non-negative: {}", step)),
            ),
            Increment::Percent(pct) if !(pct.is_finite() && pct >= 0.0) => Err(
                ConfigError::Invalid(format!("percent increment must be non-negative: {}", pct)),
            ),
            _ => Ok(()),
        }
    }
}
