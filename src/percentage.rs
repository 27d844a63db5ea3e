//! Load percentage model: what fraction of 1RM to prescribe for a profile.
//!
//! Every profile cell carries a reference fraction for ten-rep work (the
//! hypertrophy scheme). Dividing it by the Brzycki ten-rep intensity gives the
//! profile's training-max reserve; multiplying the reserve by the Brzycki
//! intensity of another rep count gives that scheme's fraction. Prescriptions
//! therefore sit on the same curve the 1RM estimator uses.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use crate::domain::{AgeBand, ExperienceLevel, Gender, UserTrainingProfile, usable_one_rm};
use crate::formulas::brzycki_intensity;
use crate::scheme::{SchemeName, SetScheme};

/// Rep count the reference fractions are expressed for.
const REFERENCE_REPS: u32 = 10;

/// Fraction of 1RM prescribed for ten-rep work, per profile cell.
const REFERENCE_FRACTIONS: [(Gender, ExperienceLevel, AgeBand, f64); 18] = [
    (Gender::Male, ExperienceLevel::Beginner, AgeBand::Young, 0.60),
    (Gender::Male, ExperienceLevel::Beginner, AgeBand::Middle, 0.55),
    (Gender::Male, ExperienceLevel::Beginner, AgeBand::Senior, 0.50),
    (Gender::Male, ExperienceLevel::Intermediate, AgeBand::Young, 0.70),
    (Gender::Male, ExperienceLevel::Intermediate, AgeBand::Middle, 0.65),
    (Gender::Male, ExperienceLevel::Intermediate, AgeBand::Senior, 0.60),
    (Gender::Male, ExperienceLevel::Advanced, AgeBand::Young, 0.75),
    (Gender::Male, ExperienceLevel::Advanced, AgeBand::Middle, 0.70),
    (Gender::Male, ExperienceLevel::Advanced, AgeBand::Senior, 0.65),
    (Gender::Female, ExperienceLevel::Beginner, AgeBand::Young, 0.55),
    (Gender::Female, ExperienceLevel::Beginner, AgeBand::Middle, 0.50),
    (Gender::Female, ExperienceLevel::Beginner, AgeBand::Senior, 0.45),
    (Gender::Female, ExperienceLevel::Intermediate, AgeBand::Young, 0.65),
    (Gender::Female, ExperienceLevel::Intermediate, AgeBand::Middle, 0.60),
    (Gender::Female, ExperienceLevel::Intermediate, AgeBand::Senior, 0.55),
    (Gender::Female, ExperienceLevel::Advanced, AgeBand::Young, 0.70),
    (Gender::Female, ExperienceLevel::Advanced, AgeBand::Middle, 0.65),
    (Gender::Female, ExperienceLevel::Advanced, AgeBand::Senior, 0.60),
];

/// Base rep-range curve checkpoints (reps, fraction of 1RM).
const REP_CHECKPOINTS: [(u32, f64); 10] = [
    (1, 1.00),
    (2, 0.97),
    (3, 0.94),
    (4, 0.92),
    (5, 0.89),
    (6, 0.86),
    (8, 0.81),
    (10, 0.75),
    (12, 0.70),
    (15, 0.65),
];

/// Highest rep count covered by the rep-range table.
pub const MAX_TABLE_REPS: u32 = 15;

/// Lookup key of the percentage table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableKey {
    pub gender: Gender,
    pub level: ExperienceLevel,
    pub band: AgeBand,
    pub scheme: SchemeName,
}

static PERCENTAGE_TABLE: LazyLock<HashMap<TableKey, f64>> = LazyLock::new(build_table);

fn build_table() -> HashMap<TableKey, f64> {
    let mut table = HashMap::new();

    for &gender in Gender::all() {
        for &level in ExperienceLevel::all() {
            for &band in AgeBand::all() {
                for &scheme in SchemeName::canonical() {
                    let Some((_, reps)) = scheme.fixed_pair() else {
                        continue;
                    };
                    if let Some(fraction) = percentage_for_reps(gender, level, band, reps) {
                        table.insert(
                            TableKey {
                                gender,
                                level,
                                band,
                                scheme,
                            },
                            fraction,
                        );
                    }
                }
            }
        }
    }

    table
}

/// Returns the full percentage table.
pub fn table() -> &'static HashMap<TableKey, f64> {
    &PERCENTAGE_TABLE
}

fn reference_fraction(gender: Gender, level: ExperienceLevel, band: AgeBand) -> f64 {
    REFERENCE_FRACTIONS
        .iter()
        .find(|(g, l, b, _)| *g == gender && *l == level && *b == band)
        .map(|(_, _, _, f)| *f)
        .unwrap_or(0.0)
}

/// Fraction of the true 1RM a profile trains against.
pub fn training_max_reserve(gender: Gender, level: ExperienceLevel, band: AgeBand) -> f64 {
    let reference_intensity = brzycki_intensity(REFERENCE_REPS).unwrap_or(1.0);
    reference_fraction(gender, level, band) / reference_intensity
}

/// Training max for a profile: the share of 1RM its prescriptions are built on.
pub fn training_max(profile: &UserTrainingProfile, one_rm: f64) -> f64 {
    one_rm * training_max_reserve(profile.gender, profile.experience_level, profile.age_band())
}

/// Fraction of 1RM to prescribe for an arbitrary rep count (1..=36).
///
/// In (0, 1] rather than (0, 1): a single rep at a reserve of 1.0 prescribes
/// the full 1RM. Named schemes never reach 1.0 because their rep counts
/// start at 5.
pub fn percentage_for_reps(
    gender: Gender,
    level: ExperienceLevel,
    band: AgeBand,
    reps: u32,
) -> Option<f64> {
    let intensity = brzycki_intensity(reps)?;
    Some(training_max_reserve(gender, level, band) * intensity)
}

/// Table lookup for a named scheme. Custom schemes are not in the table.
pub fn percentage_of_1rm(
    gender: Gender,
    level: ExperienceLevel,
    band: AgeBand,
    scheme: SchemeName,
) -> Option<f64> {
    PERCENTAGE_TABLE
        .get(&TableKey {
            gender,
            level,
            band,
            scheme,
        })
        .copied()
}

/// Fraction of 1RM for a resolved scheme and profile.
///
/// Named schemes read the table; custom schemes use their own rep count.
pub fn percentage_for_scheme(profile: &UserTrainingProfile, scheme: &SetScheme) -> Option<f64> {
    let band = profile.age_band();
    match scheme.name {
        SchemeName::Custom => percentage_for_reps(
            profile.gender,
            profile.experience_level,
            band,
            scheme.reps_count,
        ),
        name => percentage_of_1rm(profile.gender, profile.experience_level, band, name),
    }
}

/// Training goal a scheme targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingGoal {
    Strength,
    Hypertrophy,
    Endurance,
}

impl TrainingGoal {
    pub fn for_scheme(scheme: &SetScheme) -> Self {
        match scheme.name {
            SchemeName::FiveByFive | SchemeName::SixByThree => TrainingGoal::Strength,
            SchemeName::TenByFive => TrainingGoal::Hypertrophy,
            SchemeName::FifteenByFive => TrainingGoal::Endurance,
            SchemeName::Custom => match scheme.reps_count {
                0..=6 => TrainingGoal::Strength,
                7..=12 => TrainingGoal::Hypertrophy,
                _ => TrainingGoal::Endurance,
            },
        }
    }

    /// Typical working range as (min, max) fractions of 1RM.
    pub fn intensity_zone(&self) -> (f64, f64) {
        match self {
            TrainingGoal::Strength => (0.85, 0.95),
            TrainingGoal::Hypertrophy => (0.70, 0.80),
            TrainingGoal::Endurance => (0.60, 0.70),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TrainingGoal::Strength => "strength",
            TrainingGoal::Hypertrophy => "hypertrophy",
            TrainingGoal::Endurance => "endurance",
        }
    }
}

/// Multipliers applied to the base rep-range curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileAdjustment {
    pub experience: f64,
    pub age: f64,
    pub gender: f64,
    pub scheme: f64,
}

impl ProfileAdjustment {
    /// No adjustment: the raw strength curve.
    pub fn none() -> Self {
        Self {
            experience: 1.0,
            age: 1.0,
            gender: 1.0,
            scheme: 1.0,
        }
    }

    pub fn for_profile(profile: &UserTrainingProfile, scheme: SchemeName) -> Self {
        let experience = match profile.experience_level {
            ExperienceLevel::Beginner => 0.85,
            ExperienceLevel::Intermediate => 0.95,
            ExperienceLevel::Advanced => 1.00,
        };
        let age = match profile.age_band() {
            AgeBand::Young => 1.00,
            AgeBand::Middle => 0.95,
            AgeBand::Senior => 0.90,
        };
        let gender = match profile.gender {
            Gender::Male => 1.00,
            Gender::Female => 0.92,
        };
        let scheme = match scheme {
            SchemeName::SixByThree => 1.10,
            SchemeName::FifteenByFive => 0.90,
            _ => 1.00,
        };

        Self {
            experience,
            age,
            gender,
            scheme,
        }
    }

    /// Composite factor applied to every base percentage.
    pub fn factor(&self) -> f64 {
        self.experience * self.age * self.gender * self.scheme
    }
}

/// Base fraction of 1RM for `reps` (1..=15), interpolating between checkpoints.
pub fn base_percentage(reps: u32) -> Option<f64> {
    if !(1..=MAX_TABLE_REPS).contains(&reps) {
        return None;
    }

    if let Some(&(_, pct)) = REP_CHECKPOINTS.iter().find(|(r, _)| *r == reps) {
        return Some(pct);
    }

    let (lo_reps, lo_pct) = REP_CHECKPOINTS
        .iter()
        .rev()
        .find(|(r, _)| *r < reps)
        .copied()?;
    let (hi_reps, hi_pct) = REP_CHECKPOINTS.iter().find(|(r, _)| *r > reps).copied()?;

    let t = (reps - lo_reps) as f64 / (hi_reps - lo_reps) as f64;
    Some(lo_pct + (hi_pct - lo_pct) * t)
}

/// Weight for every rep count 1..=15 from a 1RM and a profile adjustment.
///
/// Empty when the 1RM is not a positive finite number.
pub fn rep_range_table(one_rm: f64, adjustment: &ProfileAdjustment) -> BTreeMap<u32, f64> {
    let Some(one_rm) = usable_one_rm(one_rm) else {
        return BTreeMap::new();
    };
    let factor = adjustment.factor();
    (1..=MAX_TABLE_REPS)
        .filter_map(|reps| base_percentage(reps).map(|pct| (reps, (one_rm * pct * factor).round())))
        .collect()
}
