use crate::core::rules::{ACTIVITY, EXPERIENCE, GROOMING, KIDS, LIVING, NEUTRAL_SCORE, PETS};
use crate::models::{
    ActivityLevel, BreedRecord, CategoryScores, CategoryWeights, ExperienceLevel,
    GroomingTolerance, HasKids, LivingSituation, OtherPets, QuestionnaireAnswers,
};

/// Score all five questionnaire categories for one breed
///
/// Each category is independent; `climate` is collected by the questionnaire
/// but deliberately not scored.
pub fn calculate_category_scores(answers: &QuestionnaireAnswers, breed: &BreedRecord) -> CategoryScores {
    CategoryScores {
        living: score_living_situation(&answers.living_situation, breed),
        activity: score_activity_level(&answers.activity_level, breed),
        experience: score_experience_level(&answers.experience_level, breed),
        family: score_family_factors(&answers.has_kids, &answers.other_pets, breed),
        preferences: score_preferences(&answers.grooming_tolerance, breed),
    }
}

/// Fold category scores into a whole percentage (0-100)
///
/// score = (
///     living * 0.20 +
///     activity * 0.25 +
///     experience * 0.15 +
///     family * 0.25 +
///     preferences * 0.15
/// ) * 100, rounded half away from zero
pub fn calculate_match_percentage(scores: &CategoryScores, weights: &CategoryWeights) -> u8 {
    let weighted = scores.living * weights.living
        + scores.activity * weights.activity
        + scores.experience * weights.experience
        + scores.family * weights.family
        + scores.preferences * weights.preferences;

    (weighted * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Living situation fit (20% weight by default)
pub fn score_living_situation(situation: &LivingSituation, breed: &BreedRecord) -> f64 {
    match situation {
        LivingSituation::Apartment => LIVING.apartment.apply(breed.apartment_friendly()),
        LivingSituation::House => {
            let size = breed.size.to_lowercase();
            if size.contains("medium") || size.contains("large") {
                LIVING.house_roomy
            } else {
                LIVING.house_compact
            }
        }
        LivingSituation::Farm => {
            let energy = breed.energy_level();
            if breed.size.to_lowercase().contains("large") && energy >= LIVING.farm_working_energy {
                LIVING.farm_working
            } else if energy >= LIVING.farm_active_energy {
                LIVING.farm_active
            } else {
                LIVING.farm_calm
            }
        }
        LivingSituation::Unknown(_) => NEUTRAL_SCORE,
    }
}

/// Activity level fit (25% weight by default)
pub fn score_activity_level(level: &ActivityLevel, breed: &BreedRecord) -> f64 {
    let energy = breed.energy_level();
    match level {
        ActivityLevel::Low => ACTIVITY.low.apply(energy),
        ActivityLevel::Moderate => ACTIVITY.moderate.apply(energy),
        ActivityLevel::High => ACTIVITY.high.apply(energy),
        ActivityLevel::Unknown(_) => NEUTRAL_SCORE,
    }
}

/// Experience level fit (15% weight by default)
pub fn score_experience_level(level: &ExperienceLevel, breed: &BreedRecord) -> f64 {
    let ease = breed.training_ease();
    match level {
        ExperienceLevel::Beginner => EXPERIENCE.beginner.apply(ease),
        ExperienceLevel::Some => EXPERIENCE.some.apply(ease),
        ExperienceLevel::Expert => EXPERIENCE.expert.apply(ease),
        ExperienceLevel::Unknown(_) => NEUTRAL_SCORE,
    }
}

/// Family factors fit (25% weight by default): kids and pets weigh equally
pub fn score_family_factors(has_kids: &HasKids, other_pets: &OtherPets, breed: &BreedRecord) -> f64 {
    let kids = score_kids_compatibility(has_kids, breed);
    let pets = score_pets_compatibility(other_pets, breed);
    (kids + pets) / 2.0
}

pub fn score_kids_compatibility(has_kids: &HasKids, breed: &BreedRecord) -> f64 {
    let rating = breed.good_with_kids();
    match has_kids {
        HasKids::None => KIDS.none.apply(rating),
        HasKids::Young => KIDS.young.apply(rating),
        HasKids::Older => KIDS.older.apply(rating),
        HasKids::Both => KIDS.both.apply(rating),
        HasKids::Unknown(_) => NEUTRAL_SCORE,
    }
}

pub fn score_pets_compatibility(other_pets: &OtherPets, breed: &BreedRecord) -> f64 {
    let rating = breed.good_with_pets();
    match other_pets {
        OtherPets::None => PETS.none.apply(rating),
        OtherPets::Dogs | OtherPets::Cats | OtherPets::Mixed => PETS.any.apply(rating),
        OtherPets::Unknown(_) => NEUTRAL_SCORE,
    }
}

/// Grooming preference fit (15% weight by default)
pub fn score_preferences(tolerance: &GroomingTolerance, breed: &BreedRecord) -> f64 {
    let needs = breed.grooming_needs();
    match tolerance {
        GroomingTolerance::Minimal => GROOMING.minimal.apply(needs),
        GroomingTolerance::Moderate => GROOMING.moderate.apply(needs),
        GroomingTolerance::High => GROOMING.high.apply(needs),
        GroomingTolerance::Unknown(_) => NEUTRAL_SCORE,
    }
}
