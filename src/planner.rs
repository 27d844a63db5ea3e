//! Session planning over a whole workout log.
//!
//! Evaluates every logged session against the selected scheme, folds the
//! resulting 1RM raises into the athlete's record and works out where each
//! exercise starts next time.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rayon::prelude::*;

use crate::config::EngineConfig;
use crate::domain::{ExerciseKey, Lift, LiftSession, OneRepMaxRecord, UserTrainingProfile};
use crate::outcome::evaluate_session;
use crate::prescription::prescribe;
use crate::progression::{WeightSource, latest_sessions, starting_weight};
use crate::scheme::SetScheme;

/// Planning result for one exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct ExercisePlan {
    pub key: ExerciseKey,
    pub last_date: NaiveDate,
    pub sessions: usize,
    /// Sets in the latest session, and how many of them were met.
    pub sets_logged: usize,
    pub met: usize,
    pub all_met: bool,
    pub next_weight: f64,
    pub source: WeightSource,
}

/// Planning result for a whole log.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanReport {
    pub plans: Vec<ExercisePlan>,
    pub one_rep_maxes: OneRepMaxRecord,
    /// Lifts whose stored 1RM went up while evaluating the log.
    pub raised: Vec<Lift>,
}

/// Evaluated history of one exercise.
struct ExerciseHistory {
    key: ExerciseKey,
    sessions: Vec<LiftSession>,
    record: OneRepMaxRecord,
}

/// Evaluates all sessions of one exercise in date order against a private
/// copy of the record.
fn evaluate_exercise(
    key: ExerciseKey,
    sessions: Vec<LiftSession>,
    target_reps: u32,
    record: &OneRepMaxRecord,
    config: &EngineConfig,
) -> ExerciseHistory {
    let mut record = *record;
    let mut evaluated = Vec::with_capacity(sessions.len());

    for session in &sessions {
        let (stored, updated) = evaluate_session(session, target_reps, &record, config);
        record = updated;
        evaluated.push(stored);
    }

    ExerciseHistory {
        key,
        sessions: evaluated,
        record,
    }
}

/// Plans the next session of every exercise in the log.
///
/// Exercises are evaluated in parallel; raises are merged afterwards, which
/// gives the same record as a sequential pass because a raise never lowers a
/// stored value. Plans are ordered by exercise.
pub fn plan_sessions(
    sessions: &[LiftSession],
    profile: &UserTrainingProfile,
    scheme: &SetScheme,
    record: &OneRepMaxRecord,
    config: &EngineConfig,
) -> PlanReport {
    let mut by_exercise: BTreeMap<ExerciseKey, Vec<LiftSession>> = BTreeMap::new();
    for session in sessions {
        by_exercise
            .entry(session.key.clone())
            .or_default()
            .push(session.clone());
    }
    for group in by_exercise.values_mut() {
        group.sort_by_key(|s| s.date);
    }

    let histories: Vec<ExerciseHistory> = by_exercise
        .into_iter()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(key, group)| evaluate_exercise(key, group, scheme.reps_count, record, config))
        .collect();

    let mut merged = *record;
    for history in &histories {
        for &lift in Lift::all() {
            merged.raise(lift, history.record.get(lift));
        }
    }

    let raised: Vec<Lift> = Lift::all()
        .iter()
        .copied()
        .filter(|&lift| merged.get(lift) > record.get(lift))
        .collect();

    let evaluated: Vec<LiftSession> = histories
        .iter()
        .flat_map(|history| history.sessions.iter().cloned())
        .collect();
    let latest = latest_sessions(&evaluated);

    let plans = histories
        .iter()
        .filter_map(|history| {
            let session = latest.get(&history.key)?;
            Some(plan_exercise(
                session,
                history.sessions.len(),
                profile,
                scheme,
                &merged,
                config,
            ))
        })
        .collect();

    PlanReport {
        plans,
        one_rep_maxes: merged,
        raised,
    }
}

fn plan_exercise(
    latest: &LiftSession,
    sessions: usize,
    profile: &UserTrainingProfile,
    scheme: &SetScheme,
    record: &OneRepMaxRecord,
    config: &EngineConfig,
) -> ExercisePlan {
    let prescribed = latest
        .key
        .lift()
        .and_then(|lift| prescribe(record.get(lift), profile, scheme));
    let (next_weight, source) = starting_weight(Some(latest), prescribed, &config.increment);

    ExercisePlan {
        key: latest.key.clone(),
        last_date: latest.date,
        sessions,
        sets_logged: latest.sets().len(),
        met: latest.met_count(),
        all_met: latest.all_met(),
        next_weight,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Increment;
    use crate::domain::{BodyPart, ExperienceLevel, Gender, SetRecord};

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn profile() -> UserTrainingProfile {
        UserTrainingProfile {
            gender: Gender::Male,
            age: 28,
            experience_level: ExperienceLevel::Intermediate,
            training_years: 3,
            bodyweight_kg: Some(80.0),
        }
    }

    fn session(name: &str, date: NaiveDate, sets: &[(f64, u32)]) -> LiftSession {
        LiftSession::new(
            ExerciseKey::new(name, Some(BodyPart::Leg)),
            date,
            sets.iter().map(|&(w, r)| SetRecord::new(w, r)).collect(),
        )
    }

    #[test]
    fn test_plan_progresses_met_exercise() {
        let sessions = vec![session(
            "Squat",
            make_date(2024, 2, 1),
            &[(80.0, 10), (80.0, 10), (80.0, 10)],
        )];
        let report = plan_sessions(
            &sessions,
            &profile(),
            &SetScheme::fallback(),
            &OneRepMaxRecord::default(),
            &EngineConfig::default(),
        );

        assert_eq!(report.plans.len(), 1);
        let plan = &report.plans[0];
        assert!(plan.all_met);
        assert_eq!(plan.met, 3);
        assert_eq!(plan.next_weight, 82.5);
        assert_eq!(plan.source, WeightSource::Progression);
        // 80 × 36 / 27 = 106.67
        assert_eq!(report.one_rep_maxes.squat, 107.0);
        assert_eq!(report.raised, vec![Lift::Squat]);
    }

    #[test]
    fn test_plan_repeats_after_missed_set() {
        let sessions = vec![session(
            "Lunge",
            make_date(2024, 2, 1),
            &[(30.0, 10), (30.0, 7)],
        )];
        let report = plan_sessions(
            &sessions,
            &profile(),
            &SetScheme::fallback(),
            &OneRepMaxRecord::default(),
            &EngineConfig::default(),
        );

        let plan = &report.plans[0];
        assert!(!plan.all_met);
        assert_eq!(plan.met, 1);
        assert_eq!(plan.sets_logged, 2);
        assert_eq!(plan.next_weight, 30.0);
        // Accessory lifts never touch the record
        assert_eq!(report.one_rep_maxes, OneRepMaxRecord::default());
        assert!(report.raised.is_empty());
    }

    #[test]
    fn test_plan_uses_latest_session() {
        let sessions = vec![
            session("Squat", make_date(2024, 2, 8), &[(85.0, 10)]),
            session("Squat", make_date(2024, 2, 1), &[(80.0, 10)]),
        ];
        let report = plan_sessions(
            &sessions,
            &profile(),
            &SetScheme::fallback(),
            &OneRepMaxRecord::default(),
            &EngineConfig {
                increment: Increment::Flat(5.0),
                ..Default::default()
            },
        );

        let plan = &report.plans[0];
        assert_eq!(plan.sessions, 2);
        assert_eq!(plan.last_date, make_date(2024, 2, 8));
        assert_eq!(plan.next_weight, 90.0);
        // 85 × 36 / 27 = 113.33
        assert_eq!(report.one_rep_maxes.squat, 113.0);
    }

    #[test]
    fn test_plan_keeps_higher_stored_one_rm() {
        let sessions = vec![session("Squat", make_date(2024, 2, 1), &[(80.0, 10)])];
        let record = OneRepMaxRecord {
            squat: 140.0,
            ..Default::default()
        };
        let report = plan_sessions(
            &sessions,
            &profile(),
            &SetScheme::fallback(),
            &record,
            &EngineConfig::default(),
        );

        assert_eq!(report.one_rep_maxes.squat, 140.0);
        assert!(report.raised.is_empty());
    }

    #[test]
    fn test_plan_merges_raises_across_exercise_variants() {
        // Two keys mapping to the same lift: the larger estimate wins
        let sessions = vec![
            session("Squat", make_date(2024, 2, 1), &[(80.0, 10)]),
            LiftSession::new(
                ExerciseKey::new("back squat", None),
                make_date(2024, 2, 3),
                vec![SetRecord::new(90.0, 10)],
            ),
        ];
        let report = plan_sessions(
            &sessions,
            &profile(),
            &SetScheme::fallback(),
            &OneRepMaxRecord::default(),
            &EngineConfig::default(),
        );

        assert_eq!(report.plans.len(), 2);
        // 90 × 36 / 27 = 120
        assert_eq!(report.one_rep_maxes.squat, 120.0);
    }

    #[test]
    fn test_plan_empty_log() {
        let report = plan_sessions(
            &[],
            &profile(),
            &SetScheme::fallback(),
            &OneRepMaxRecord::default(),
            &EngineConfig::default(),
        );
        assert!(report.plans.is_empty());
        assert!(report.raised.is_empty());
    }
}
