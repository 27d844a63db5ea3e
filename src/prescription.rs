//! Load prescription: recommended working weights and rest intervals.

use crate::domain::{AgeBand, Lift, OneRepMaxRecord, UserTrainingProfile, usable_one_rm};
use crate::formulas::estimate_one_rm;
use crate::percentage::{self, TableKey, percentage_for_scheme};
use crate::scheme::{SchemeName, SetScheme};

/// Rest between sets of the strength scheme.
pub const STRENGTH_REST_SECONDS: u32 = 180;

/// Rest between sets of every other scheme.
pub const DEFAULT_REST_SECONDS: u32 = 120;

/// Recommended working weight for a scheme.
///
/// Returns None when the 1RM is unknown (zero or negative) or the scheme has
/// no percentage (custom reps beyond the estimation domain). A missing
/// recommendation is never reported as zero.
pub fn prescribe(one_rm: f64, profile: &UserTrainingProfile, scheme: &SetScheme) -> Option<f64> {
    let one_rm = usable_one_rm(one_rm)?;
    let fraction = percentage_for_scheme(profile, scheme)?;
    Some((one_rm * fraction).round())
}

/// Rest interval between sets for a scheme.
pub fn recovery_rest_seconds(scheme: SchemeName) -> u32 {
    match scheme {
        SchemeName::SixByThree => STRENGTH_REST_SECONDS,
        _ => DEFAULT_REST_SECONDS,
    }
}

/// Full recommendation for one lift.
#[derive(Debug, Clone, PartialEq)]
pub struct Prescription {
    pub lift: Lift,
    pub weight: Option<f64>,
    pub sets: u32,
    pub reps: u32,
    pub rest_seconds: u32,
}

/// Prescribes every main lift from the stored record.
pub fn prescribe_all(
    record: &OneRepMaxRecord,
    profile: &UserTrainingProfile,
    scheme: &SetScheme,
) -> Vec<Prescription> {
    let (sets, reps) = scheme.pair();
    Lift::all()
        .iter()
        .map(|&lift| Prescription {
            lift,
            weight: prescribe(record.get(lift), profile, scheme),
            sets,
            reps,
            rest_seconds: recovery_rest_seconds(scheme.name),
        })
        .collect()
}

/// Difference between the 1RM recovered from a prescription and the 1RM it
/// was prescribed from.
///
/// Prescribes a weight, estimates a 1RM back from (weight, scheme reps) and
/// subtracts the original 1RM. Anything beyond ±1 means the percentage table
/// and the estimator disagree for that profile.
pub fn brzycki_drift(
    one_rm: f64,
    profile: &UserTrainingProfile,
    scheme: &SetScheme,
) -> Option<f64> {
    let weight = prescribe(one_rm, profile, scheme)?;
    let recovered = estimate_one_rm(weight, scheme.reps_count)?;
    Some(recovered - one_rm)
}

/// A table cell whose round trip drifted beyond rounding tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDrift {
    pub key: TableKey,
    pub one_rm: f64,
    pub drift: f64,
}

fn representative_age(band: AgeBand) -> u32 {
    match band {
        AgeBand::Young => 30,
        AgeBand::Middle => 45,
        AgeBand::Senior => 60,
    }
}

/// Checks every percentage table cell against the estimator at `one_rm`.
///
/// Returns every cell whose round trip misses the 1RM by more than one unit,
/// with its drift.
pub fn audit_table(one_rm: f64) -> Vec<TableDrift> {
    let mut keys: Vec<&TableKey> = percentage::table().keys().collect();
    keys.sort();

    keys.into_iter()
        .filter_map(|key| {
            let profile = UserTrainingProfile {
                gender: key.gender,
                age: representative_age(key.band),
                experience_level: key.level,
                training_years: 0,
                bodyweight_kg: None,
            };
            let scheme = SetScheme::resolve(key.scheme.as_str(), None, None);
            let drift = brzycki_drift(one_rm, &profile, &scheme)?;
            (drift.abs() > 1.0).then(|| TableDrift {
                key: *key,
                one_rm,
                drift,
            })
        })
        .collect()
}
