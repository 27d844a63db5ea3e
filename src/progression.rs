//! Linear progression: the starting weight offered for the next session.

use std::collections::HashMap;

use crate::config::Increment;
use crate::domain::{ExerciseKey, LiftSession};

/// Starting weight for the next session of the same exercise.
///
/// Adds the increment to the first set's weight when every set was met, and
/// repeats it otherwise. Returns None when there is no previous session or it
/// has no sets.
pub fn next_starting_weight(previous: Option<&LiftSession>, increment: &Increment) -> Option<f64> {
    let session = previous?;
    let first = session.first_weight()?;

    if session.all_met() {
        Some(increment.apply(first))
    } else {
        Some(first)
    }
}

/// Where a suggested starting weight came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightSource {
    Progression,
    Prescription,
    /// Neither history nor a known 1RM.
    Unavailable,
}

/// Starting weight with fallbacks: progression, then the prescribed weight,
/// then 0 with [`WeightSource::Unavailable`].
pub fn starting_weight(
    previous: Option<&LiftSession>,
    prescribed: Option<f64>,
    increment: &Increment,
) -> (f64, WeightSource) {
    if let Some(weight) = next_starting_weight(previous, increment) {
        return (weight, WeightSource::Progression);
    }
    match prescribed {
        Some(weight) => (weight, WeightSource::Prescription),
        None => (0.0, WeightSource::Unavailable),
    }
}

/// Most recent session per exercise. Later dates win; on equal dates the
/// session appearing last wins.
pub fn latest_sessions(sessions: &[LiftSession]) -> HashMap<ExerciseKey, &LiftSession> {
    let mut latest: HashMap<ExerciseKey, &LiftSession> = HashMap::new();

    for session in sessions {
        let replace = latest
            .get(&session.key)
            .is_none_or(|current| session.date >= current.date);
        if replace {
            latest.insert(session.key.clone(), session);
        }
    }

    latest
}
