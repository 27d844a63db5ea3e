//! Experience level inference from strength-to-bodyweight ratios.

use crate::domain::{ExperienceLevel, Gender, Lift, OneRepMaxRecord, UserTrainingProfile};

/// Minimum (squat, deadlift) multiples of bodyweight for a level.
struct RatioThreshold {
    squat: f64,
    deadlift: f64,
}

fn thresholds(gender: Gender) -> [(ExperienceLevel, RatioThreshold); 2] {
    match gender {
        Gender::Male => [
            (
                ExperienceLevel::Advanced,
                RatioThreshold {
                    squat: 1.8,
                    deadlift: 2.3,
                },
            ),
            (
                ExperienceLevel::Intermediate,
                RatioThreshold {
                    squat: 1.3,
                    deadlift: 1.7,
                },
            ),
        ],
        Gender::Female => [
            (
                ExperienceLevel::Advanced,
                RatioThreshold {
                    squat: 1.3,
                    deadlift: 1.8,
                },
            ),
            (
                ExperienceLevel::Intermediate,
                RatioThreshold {
                    squat: 0.9,
                    deadlift: 1.3,
                },
            ),
        ],
    }
}

/// Derives the level a lifter's numbers support.
///
/// Needs bodyweight plus known squat and deadlift 1RMs; otherwise the
/// declared level is returned unchanged.
pub fn infer_experience_level(
    profile: &UserTrainingProfile,
    record: &OneRepMaxRecord,
) -> ExperienceLevel {
    let (Some(bodyweight), Some(squat), Some(deadlift)) = (
        profile.bodyweight_kg.filter(|bw| *bw > 0.0),
        record.known(Lift::Squat),
        record.known(Lift::Deadlift),
    ) else {
        return profile.experience_level;
    };

    thresholds(profile.gender)
        .into_iter()
        .find(|(_, t)| squat >= bodyweight * t.squat && deadlift >= bodyweight * t.deadlift)
        .map(|(level, _)| level)
        .unwrap_or(ExperienceLevel::Beginner)
}

/// Returns a copy of the profile with its level replaced by the inferred one.
pub fn with_inferred_level(
    profile: &UserTrainingProfile,
    record: &OneRepMaxRecord,
) -> UserTrainingProfile {
    let level = infer_experience_level(profile, record);
    if level != profile.experience_level {
        log::info!(
            "Experience level adjusted from {} to {} by strength ratios",
            profile.experience_level,
            level
        );
    }
    UserTrainingProfile {
        experience_level: level,
        ..profile.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(gender: Gender, bodyweight: Option<f64>) -> UserTrainingProfile {
        UserTrainingProfile {
            gender,
            age: 30,
            experience_level: ExperienceLevel::Intermediate,
            training_years: 2,
            bodyweight_kg: bodyweight,
        }
    }

    fn record(squat: f64, deadlift: f64) -> OneRepMaxRecord {
        OneRepMaxRecord {
            squat,
            deadlift,
            ..Default::default()
        }
    }

    #[test]
    fn test_male_levels() {
        let p = profile(Gender::Male, Some(80.0));
        assert_eq!(
            infer_experience_level(&p, &record(150.0, 190.0)),
            ExperienceLevel::Advanced
        );
        assert_eq!(
            infer_experience_level(&p, &record(110.0, 140.0)),
            ExperienceLevel::Intermediate
        );
        assert_eq!(
            infer_experience_level(&p, &record(80.0, 100.0)),
            ExperienceLevel::Beginner
        );
    }

    #[test]
    fn test_both_ratios_required() {
        // Advanced squat but intermediate deadlift
        let p = profile(Gender::Male, Some(80.0));
        assert_eq!(
            infer_experience_level(&p, &record(150.0, 140.0)),
            ExperienceLevel::Intermediate
        );
    }

    #[test]
    fn test_female_levels() {
        let p = profile(Gender::Female, Some(60.0));
        assert_eq!(
            infer_experience_level(&p, &record(80.0, 110.0)),
            ExperienceLevel::Advanced
        );
        assert_eq!(
            infer_experience_level(&p, &record(56.0, 80.0)),
            ExperienceLevel::Intermediate
        );
        assert_eq!(
            infer_experience_level(&p, &record(40.0, 60.0)),
            ExperienceLevel::Beginner
        );
    }

    #[test]
    fn test_missing_data_keeps_declared_level() {
        let p = profile(Gender::Male, None);
        assert_eq!(
            infer_experience_level(&p, &record(200.0, 250.0)),
            ExperienceLevel::Intermediate
        );

        let p = profile(Gender::Male, Some(80.0));
        assert_eq!(
            infer_experience_level(&p, &record(0.0, 250.0)),
            ExperienceLevel::Intermediate
        );
    }

    #[test]
    fn test_with_inferred_level_keeps_other_fields() {
        let p = profile(Gender::Male, Some(80.0));
        let adjusted = with_inferred_level(&p, &record(80.0, 100.0));
        assert_eq!(adjusted.experience_level, ExperienceLevel::Beginner);
        assert_eq!(adjusted.age, p.age);
        assert_eq!(adjusted.bodyweight_kg, p.bodyweight_kg);
    }
}
