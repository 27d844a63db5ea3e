//! Domain types for lifter profiles, logged sets and sessions.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Lifter gender as used by the load tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn all() -> &'static [Gender] {
        &[Gender::Male, Gender::Female]
    }
}

impl FromStr for Gender {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(ParseError::UnknownGender(s.to_string())),
        }
    }
}

/// Self-reported training experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    /// Returns all levels, least experienced first.
    pub fn all() -> &'static [ExperienceLevel] {
        &[
            ExperienceLevel::Beginner,
            ExperienceLevel::Intermediate,
            ExperienceLevel::Advanced,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(ExperienceLevel::Beginner),
            "intermediate" => Ok(ExperienceLevel::Intermediate),
            "advanced" => Ok(ExperienceLevel::Advanced),
            _ => Err(ParseError::UnknownLevel(s.to_string())),
        }
    }
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Coarse age grouping used to scale prescribed intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeBand {
    /// Under 36.
    Young,
    /// 36 to 50 inclusive.
    Middle,
    /// 51 and over.
    Senior,
}

impl AgeBand {
    /// Returns all bands, youngest first.
    pub fn all() -> &'static [AgeBand] {
        &[AgeBand::Young, AgeBand::Middle, AgeBand::Senior]
    }

    pub fn from_age(age: u32) -> Self {
        match age {
            0..=35 => AgeBand::Young,
            36..=50 => AgeBand::Middle,
            _ => AgeBand::Senior,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AgeBand::Young => "20-35",
            AgeBand::Middle => "36-50",
            AgeBand::Senior => "51+",
        }
    }
}

impl std::fmt::Display for AgeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Main barbell lifts that carry a stored 1RM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lift {
    Squat,
    Deadlift,
    BenchPress,
    OverheadPress,
}

impl Lift {
    /// Returns all lift variants.
    pub fn all() -> &'static [Lift] {
        &[
            Lift::Squat,
            Lift::Deadlift,
            Lift::BenchPress,
            Lift::OverheadPress,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Lift::Squat => "Squat",
            Lift::Deadlift => "Deadlift",
            Lift::BenchPress => "Bench Press",
            Lift::OverheadPress => "Overhead Press",
        }
    }

    /// Maps a free-form exercise name onto a main lift, if it is one.
    pub fn from_exercise_name(name: &str) -> Option<Lift> {
        let normalized: String = name
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "squat" | "backsquat" => Some(Lift::Squat),
            "deadlift" => Some(Lift::Deadlift),
            "bench" | "benchpress" => Some(Lift::BenchPress),
            "ohp" | "overheadpress" => Some(Lift::OverheadPress),
            _ => None,
        }
    }
}

impl FromStr for Lift {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Lift::from_exercise_name(s).ok_or_else(|| ParseError::UnknownLift(s.to_string()))
    }
}

impl std::fmt::Display for Lift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Body part an exercise is logged under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyPart {
    Chest,
    Back,
    Shoulder,
    Leg,
    Biceps,
    Triceps,
    Complex,
}

impl FromStr for BodyPart {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chest" => Ok(BodyPart::Chest),
            "back" => Ok(BodyPart::Back),
            "shoulder" | "shoulders" => Ok(BodyPart::Shoulder),
            "leg" | "legs" => Ok(BodyPart::Leg),
            "biceps" => Ok(BodyPart::Biceps),
            "triceps" => Ok(BodyPart::Triceps),
            "complex" => Ok(BodyPart::Complex),
            _ => Err(ParseError::UnknownPart {
                row: 0,
                value: s.to_string(),
            }),
        }
    }
}

/// Identity of a progression track: one exercise under one body part.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExerciseKey {
    pub name: String,
    pub part: Option<BodyPart>,
}

impl ExerciseKey {
    pub fn new(name: impl Into<String>, part: Option<BodyPart>) -> Self {
        Self {
            name: name.into(),
            part,
        }
    }

    /// Returns the main lift this exercise tracks, if any.
    pub fn lift(&self) -> Option<Lift> {
        Lift::from_exercise_name(&self.name)
    }
}

impl std::fmt::Display for ExerciseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.part {
            Some(part) => write!(f, "{} ({:?})", self.name, part),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Lifter profile; read-only input to every engine function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTrainingProfile {
    pub gender: Gender,
    pub age: u32,
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub training_years: u32,
    /// Only consulted by level inference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bodyweight_kg: Option<f64>,
}

impl UserTrainingProfile {
    pub fn age_band(&self) -> AgeBand {
        AgeBand::from_age(self.age)
    }
}

/// Returns the value when it can serve as a 1RM: positive and finite.
pub fn usable_one_rm(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Stored one-rep maxes. A value of 0 means unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OneRepMaxRecord {
    #[serde(default)]
    pub squat: f64,
    #[serde(default)]
    pub deadlift: f64,
    #[serde(default)]
    pub bench_press: f64,
    #[serde(default)]
    pub overhead_press: f64,
}

impl OneRepMaxRecord {
    pub fn get(&self, lift: Lift) -> f64 {
        match lift {
            Lift::Squat => self.squat,
            Lift::Deadlift => self.deadlift,
            Lift::BenchPress => self.bench_press,
            Lift::OverheadPress => self.overhead_press,
        }
    }

    /// Returns the stored value, or None when unknown.
    pub fn known(&self, lift: Lift) -> Option<f64> {
        usable_one_rm(self.get(lift))
    }

    fn slot(&mut self, lift: Lift) -> &mut f64 {
        match lift {
            Lift::Squat => &mut self.squat,
            Lift::Deadlift => &mut self.deadlift,
            Lift::BenchPress => &mut self.bench_press,
            Lift::OverheadPress => &mut self.overhead_press,
        }
    }

    /// Replaces the stored value only if `estimate` is strictly higher.
    /// Returns true when the record changed.
    pub fn raise(&mut self, lift: Lift, estimate: f64) -> bool {
        let slot = self.slot(lift);
        if estimate > *slot {
            *slot = estimate;
            true
        } else {
            false
        }
    }
}

/// Evaluation state of a logged set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetOutcome {
    #[default]
    Pending,
    Met,
    Unmet,
}

impl SetOutcome {
    pub fn is_decided(&self) -> bool {
        !matches!(self, SetOutcome::Pending)
    }
}

/// A single logged set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetRecord {
    pub weight: f64,
    pub reps: u32,
    pub outcome: SetOutcome,
}

impl SetRecord {
    /// Creates a pending set.
    pub fn new(weight: f64, reps: u32) -> Self {
        Self {
            weight: weight.max(0.0),
            reps,
            outcome: SetOutcome::Pending,
        }
    }

    pub fn with_outcome(self, outcome: SetOutcome) -> Self {
        Self { outcome, ..self }
    }
}

/// All sets of one exercise on one date, in logged order.
#[derive(Debug, Clone, PartialEq)]
pub struct LiftSession {
    pub key: ExerciseKey,
    pub date: NaiveDate,
    sets: Vec<SetRecord>,
}

impl LiftSession {
    pub fn new(key: ExerciseKey, date: NaiveDate, sets: Vec<SetRecord>) -> Self {
        Self { key, date, sets }
    }

    pub fn sets(&self) -> &[SetRecord] {
        &self.sets
    }

    pub fn first_weight(&self) -> Option<f64> {
        self.sets.first().map(|s| s.weight)
    }

    /// True when the session has sets and every one of them is met.
    pub fn all_met(&self) -> bool {
        !self.sets.is_empty() && self.sets.iter().all(|s| s.outcome == SetOutcome::Met)
    }

    pub fn met_count(&self) -> usize {
        self.sets
            .iter()
            .filter(|s| s.outcome == SetOutcome::Met)
            .count()
    }

    /// Returns a copy with one more set at the end.
    pub fn appended(&self, set: SetRecord) -> Self {
        let mut sets = self.sets.clone();
        sets.push(set);
        Self {
            key: self.key.clone(),
            date: self.date,
            sets,
        }
    }

    /// Returns a copy with the set at `index` replaced, or None if out of range.
    pub fn replaced(&self, index: usize, set: SetRecord) -> Option<Self> {
        if index >= self.sets.len() {
            return None;
        }
        let mut sets = self.sets.clone();
        sets[index] = set;
        Some(Self {
            key: self.key.clone(),
            date: self.date,
            sets,
        })
    }

    /// Returns a copy ready for storage: undecided sets count as unmet.
    pub fn finalize(&self) -> Self {
        let sets = self
            .sets
            .iter()
            .map(|s| match s.outcome {
                SetOutcome::Pending => s.with_outcome(SetOutcome::Unmet),
                _ => *s,
            })
            .collect();
        Self {
            key: self.key.clone(),
            date: self.date,
            sets,
        }
    }
}

/// A raw row of the workout log.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedSet {
    pub date: NaiveDate,
    pub key: ExerciseKey,
    pub weight: f64,
    pub reps: u32,
}

impl LoggedSet {
    pub fn new(date: NaiveDate, key: ExerciseKey, weight: f64, reps: u32) -> Self {
        Self {
            date,
            key,
            weight,
            reps,
        }
    }
}

/// Groups logged rows into one pending session per (exercise, date).
///
/// Sets keep their logged order; sessions are sorted by date.
pub fn sessions_from_log(rows: Vec<LoggedSet>) -> Vec<LiftSession> {
    let mut grouped: BTreeMap<(ExerciseKey, NaiveDate), LiftSession> = BTreeMap::new();

    for row in rows {
        let set = SetRecord::new(row.weight, row.reps);
        let session = grouped
            .entry((row.key.clone(), row.date))
            .or_insert_with(|| LiftSession::new(row.key, row.date, Vec::new()));
        *session = session.appended(set);
    }

    let mut sessions: Vec<LiftSession> = grouped.into_values().collect();
    sessions.sort_by_key(|s| s.date);
    sessions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn squat_session(outcomes: &[SetOutcome]) -> LiftSession {
        let sets = outcomes
            .iter()
            .map(|o| SetRecord::new(80.0, 5).with_outcome(*o))
            .collect();
        LiftSession::new(
            ExerciseKey::new("Squat", Some(BodyPart::Leg)),
            make_date(2024, 3, 1),
            sets,
        )
    }

    #[test]
    fn test_age_band_boundaries() {
        assert_eq!(AgeBand::from_age(20), AgeBand::Young);
        assert_eq!(AgeBand::from_age(35), AgeBand::Young);
        assert_eq!(AgeBand::from_age(36), AgeBand::Middle);
        assert_eq!(AgeBand::from_age(50), AgeBand::Middle);
        assert_eq!(AgeBand::from_age(51), AgeBand::Senior);
        assert_eq!(AgeBand::from_age(80), AgeBand::Senior);
    }

    #[test]
    fn test_lift_from_exercise_name() {
        assert_eq!(Lift::from_exercise_name("Squat"), Some(Lift::Squat));
        assert_eq!(Lift::from_exercise_name("benchPress"), Some(Lift::BenchPress));
        assert_eq!(Lift::from_exercise_name("Bench Press"), Some(Lift::BenchPress));
        assert_eq!(
            Lift::from_exercise_name("overhead_press"),
            Some(Lift::OverheadPress)
        );
        assert_eq!(Lift::from_exercise_name(" DEADLIFT "), Some(Lift::Deadlift));
        assert_eq!(Lift::from_exercise_name("barbellRow"), None);
    }

    #[test]
    fn test_enum_from_str() {
        assert_eq!(Gender::from_str("Female").unwrap(), Gender::Female);
        assert!(Gender::from_str("other").is_err());
        assert_eq!(
            ExperienceLevel::from_str("ADVANCED").unwrap(),
            ExperienceLevel::Advanced
        );
        assert_eq!(BodyPart::from_str("legs").unwrap(), BodyPart::Leg);
        assert!(BodyPart::from_str("neck").is_err());
    }

    #[test]
    fn test_usable_one_rm() {
        assert_eq!(usable_one_rm(100.0), Some(100.0));
        assert_eq!(usable_one_rm(0.0), None);
        assert_eq!(usable_one_rm(-20.0), None);
        assert_eq!(usable_one_rm(f64::NAN), None);
        assert_eq!(usable_one_rm(f64::INFINITY), None);
    }

    #[test]
    fn test_record_raise_only_when_higher() {
        let mut record = OneRepMaxRecord {
            squat: 120.0,
            ..Default::default()
        };

        assert!(!record.raise(Lift::Squat, 110.0));
        assert!(!record.raise(Lift::Squat, 120.0));
        assert_eq!(record.squat, 120.0);

        assert!(record.raise(Lift::Squat, 125.0));
        assert_eq!(record.squat, 125.0);

        // Unknown lifts are raised from zero
        assert!(record.raise(Lift::OverheadPress, 50.0));
        assert_eq!(record.known(Lift::OverheadPress), Some(50.0));
        assert_eq!(record.known(Lift::Deadlift), None);
    }

    #[test]
    fn test_session_all_met() {
        assert!(squat_session(&[SetOutcome::Met; 5]).all_met());
        assert!(!squat_session(&[SetOutcome::Met, SetOutcome::Pending]).all_met());
        assert!(!squat_session(&[]).all_met());
    }

    #[test]
    fn test_session_replaced_is_copy() {
        let session = squat_session(&[SetOutcome::Pending, SetOutcome::Pending]);
        let updated = session
            .replaced(1, SetRecord::new(82.5, 5).with_outcome(SetOutcome::Met))
            .unwrap();

        assert_eq!(session.sets()[1].outcome, SetOutcome::Pending);
        assert_eq!(updated.sets()[1].outcome, SetOutcome::Met);
        assert_eq!(updated.sets()[1].weight, 82.5);
        assert!(session.replaced(2, SetRecord::new(1.0, 1)).is_none());
    }

    #[test]
    fn test_session_appended() {
        let session = squat_session(&[SetOutcome::Met]);
        let longer = session.appended(SetRecord::new(80.0, 4));
        assert_eq!(session.sets().len(), 1);
        assert_eq!(longer.sets().len(), 2);
        assert_eq!(longer.sets()[1].outcome, SetOutcome::Pending);
    }

    #[test]
    fn test_session_finalize_marks_pending_unmet() {
        let session = squat_session(&[SetOutcome::Met, SetOutcome::Pending, SetOutcome::Unmet]);
        let stored = session.finalize();

        assert_eq!(stored.sets()[0].outcome, SetOutcome::Met);
        assert_eq!(stored.sets()[1].outcome, SetOutcome::Unmet);
        assert_eq!(stored.sets()[2].outcome, SetOutcome::Unmet);
        assert_eq!(stored.met_count(), 1);
    }

    #[test]
    fn test_sessions_from_log() {
        let squat = ExerciseKey::new("Squat", Some(BodyPart::Leg));
        let lunge = ExerciseKey::new("Lunge", Some(BodyPart::Leg));
        let rows = vec![
            LoggedSet::new(make_date(2024, 3, 8), squat.clone(), 82.5, 5),
            LoggedSet::new(make_date(2024, 3, 1), squat.clone(), 80.0, 5),
            LoggedSet::new(make_date(2024, 3, 1), lunge.clone(), 20.0, 10),
            LoggedSet::new(make_date(2024, 3, 1), squat.clone(), 80.0, 4),
        ];

        let sessions = sessions_from_log(rows);
        assert_eq!(sessions.len(), 3);

        // Sorted by date
        assert!(sessions[0].date <= sessions[1].date);
        assert_eq!(sessions[2].date, make_date(2024, 3, 8));

        let first_squat = sessions
            .iter()
            .find(|s| s.key == squat && s.date == make_date(2024, 3, 1))
            .unwrap();
        assert_eq!(first_squat.sets().len(), 2);
        assert_eq!(first_squat.sets()[1].reps, 4);
        assert!(
            first_squat
                .sets()
                .iter()
                .all(|s| s.outcome == SetOutcome::Pending)
        );
    }
}
