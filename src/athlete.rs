//! Athlete file: profile, stored 1RMs and the selected set scheme.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{OneRepMaxRecord, UserTrainingProfile};
use crate::error::ConfigError;
use crate::scheme::SetScheme;

/// Scheme selection as stored with the athlete's settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeSelection {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_reps: Option<u32>,
}

impl Default for SchemeSelection {
    fn default() -> Self {
        Self {
            name: "10x5".to_string(),
            custom_sets: None,
            custom_reps: None,
        }
    }
}

impl SchemeSelection {
    pub fn resolve(&self) -> SetScheme {
        SetScheme::resolve(&self.name, self.custom_sets, self.custom_reps)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteFile {
    pub profile: UserTrainingProfile,
    #[serde(default)]
    pub one_rep_maxes: OneRepMaxRecord,
    #[serde(default)]
    pub scheme: SchemeSelection,
}

impl AthleteFile {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Writes the file back, pretty-printed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
