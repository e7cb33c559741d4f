use crate::models::{CategoryScores, ExperienceLevel, HasKids, OtherPets, QuestionnaireAnswers};

/// Minimum category score (inclusive) that earns an explanation
pub const REASON_THRESHOLD: f64 = 0.8;

/// Explain which categories make a breed a good fit
///
/// Order is fixed: living, activity, family (up to two), experience,
/// preferences. Categories below the threshold contribute nothing.
pub fn generate_match_reasons(answers: &QuestionnaireAnswers, scores: &CategoryScores) -> Vec<String> {
    let mut reasons = Vec::new();

    if scores.living >= REASON_THRESHOLD {
        reasons.push(format!(
            "Great fit for your {} living situation",
            answers.living_situation
        ));
    }

    if scores.activity >= REASON_THRESHOLD {
        reasons.push(format!(
            "Matches your {} activity level perfectly",
            answers.activity_level
        ));
    }

    if scores.family >= REASON_THRESHOLD {
        if answers.has_kids != HasKids::None {
            reasons.push("Excellent with children".to_string());
        }
        if answers.other_pets != OtherPets::None {
            reasons.push("Gets along well with other pets".to_string());
        }
    }

    if scores.experience >= REASON_THRESHOLD {
        if answers.experience_level == ExperienceLevel::Beginner {
            reasons.push("Easy to train for first-time owners".to_string());
        } else {
            reasons.push("Suitable for your experience level".to_string());
        }
    }

    if scores.preferences >= REASON_THRESHOLD {
        reasons.push(format!(
            "Low maintenance grooming fits your {} tolerance",
            answers.grooming_tolerance
        ));
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers() -> QuestionnaireAnswers {
        QuestionnaireAnswers {
            living_situation: "house".into(),
            activity_level: "moderate".into(),
            climate: "hot".into(),
            other_pets: "dogs".into(),
            experience_level: "some".into(),
            has_kids: "young".into(),
            grooming_tolerance: "high".into(),
        }
    }

    fn uniform(score: f64) -> CategoryScores {
        CategoryScores {
            living: score,
            activity: score,
            experience: score,
            family: score,
            preferences: score,
        }
    }

    #[test]
    fn test_all_reasons_in_fixed_order() {
        let reasons = generate_match_reasons(&answers(), &uniform(1.0));
        assert_eq!(
            reasons,
            vec![
                "Great fit for your house living situation",
                "Matches your moderate activity level perfectly",
                "Excellent with children",
                "Gets along well with other pets",
                "Suitable for your experience level",
                "Low maintenance grooming fits your high tolerance",
            ]
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let reasons = generate_match_reasons(&answers(), &uniform(0.8));
        assert_eq!(reasons.len(), 6);
    }

    #[test]
    fn test_below_threshold_gives_no_reasons() {
        let reasons = generate_match_reasons(&answers(), &uniform(0.79));
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_beginner_reason() {
        let mut answers = answers();
        answers.experience_level = ExperienceLevel::Beginner;
        let scores = CategoryScores {
            experience: 1.0,
            ..uniform(0.0)
        };
        assert_eq!(
            generate_match_reasons(&answers, &scores),
            vec!["Easy to train for first-time owners"]
        );
    }

    #[test]
    fn test_family_without_kids_or_pets_adds_nothing() {
        let mut answers = answers();
        answers.has_kids = HasKids::None;
        answers.other_pets = OtherPets::None;
        let scores = CategoryScores {
            family: 1.0,
            ..uniform(0.0)
        };
        assert!(generate_match_reasons(&answers, &scores).is_empty());
    }

    #[test]
    fn test_unknown_family_answers_count_as_present() {
        let mut answers = answers();
        answers.has_kids = "teenagers".into();
        answers.other_pets = OtherPets::None;
        let scores = CategoryScores {
            family: 0.9,
            ..uniform(0.0)
        };
        assert_eq!(generate_match_reasons(&answers, &scores), vec!["Excellent with children"]);
    }

    #[test]
    fn test_templates_echo_raw_unknown_answers() {
        let mut answers = answers();
        answers.living_situation = "houseboat".into();
        let scores = CategoryScores {
            living: 0.9,
            ..uniform(0.0)
        };
        assert_eq!(
            generate_match_reasons(&answers, &scores),
            vec!["Great fit for your houseboat living situation"]
        );
    }
}
