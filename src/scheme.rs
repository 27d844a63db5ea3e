//! Set/rep scheme resolution.

use std::str::FromStr;

use log::warn;

use crate::error::ParseError;

/// Sets and reps used whenever a scheme cannot be resolved.
pub const FALLBACK_SETS: u32 = 5;
pub const FALLBACK_REPS: u32 = 10;

/// Named set/rep conventions offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemeName {
    FiveByFive,
    SixByThree,
    TenByFive,
    FifteenByFive,
    Custom,
}

impl SchemeName {
    /// Named schemes with a fixed set/rep pair.
    pub fn canonical() -> &'static [SchemeName] {
        &[
            SchemeName::FiveByFive,
            SchemeName::SixByThree,
            SchemeName::TenByFive,
            SchemeName::FifteenByFive,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemeName::FiveByFive => "5x5",
            SchemeName::SixByThree => "6x3",
            SchemeName::TenByFive => "10x5",
            SchemeName::FifteenByFive => "15x5",
            SchemeName::Custom => "custom",
        }
    }

    /// Fixed (sets, reps) pair. Names read reps-x-sets, so "6x3" is 3 sets of 6.
    pub fn fixed_pair(&self) -> Option<(u32, u32)> {
        match self {
            SchemeName::FiveByFive => Some((5, 5)),
            SchemeName::SixByThree => Some((3, 6)),
            SchemeName::TenByFive => Some((5, 10)),
            SchemeName::FifteenByFive => Some((5, 15)),
            SchemeName::Custom => None,
        }
    }
}

impl FromStr for SchemeName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "5x5" => Ok(SchemeName::FiveByFive),
            "6x3" => Ok(SchemeName::SixByThree),
            "10x5" => Ok(SchemeName::TenByFive),
            "15x5" => Ok(SchemeName::FifteenByFive),
            "custom" => Ok(SchemeName::Custom),
            _ => Err(ParseError::UnknownScheme(s.to_string())),
        }
    }
}

impl std::fmt::Display for SchemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A resolved scheme: always carries a valid set/rep pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetScheme {
    pub name: SchemeName,
    pub sets_count: u32,
    pub reps_count: u32,
}

impl SetScheme {
    /// The 10x5 scheme used for every fallback.
    pub fn fallback() -> Self {
        Self {
            name: SchemeName::TenByFive,
            sets_count: FALLBACK_SETS,
            reps_count: FALLBACK_REPS,
        }
    }

    /// Resolves a scheme by name.
    ///
    /// Fixed names return their convention. "custom" takes the supplied pair
    /// when both values are at least 1. Anything else, including an invalid
    /// custom pair or an unrecognised name, yields 10x5 (5 sets of 10).
    pub fn resolve(name: &str, custom_sets: Option<u32>, custom_reps: Option<u32>) -> Self {
        let scheme_name = match SchemeName::from_str(name) {
            Ok(n) => n,
            Err(e) => {
                warn!("{}, using {}", e, SchemeName::TenByFive);
                return Self::fallback();
            }
        };

        if let Some((sets_count, reps_count)) = scheme_name.fixed_pair() {
            return Self {
                name: scheme_name,
                sets_count,
                reps_count,
            };
        }

        match (custom_sets, custom_reps) {
            (Some(sets), Some(reps)) if sets >= 1 && reps >= 1 => Self {
                name: SchemeName::Custom,
                sets_count: sets,
                reps_count: reps,
            },
            _ => {
                warn!(
                    "invalid custom scheme (sets {:?}, reps {:?}), using {}",
                    custom_sets,
                    custom_reps,
                    SchemeName::TenByFive
                );
                Self::fallback()
            }
        }
    }

    /// The (sets, reps) pair this scheme resolves to.
    pub fn pair(&self) -> (u32, u32) {
        (self.sets_count, self.reps_count)
    }
}

impl std::fmt::Display for SetScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} sets x {} reps)",
            self.name, self.sets_count, self.reps_count
        )
    }
}
