// Core algorithm exports
pub mod matcher;
pub mod reasons;
pub mod rules;
pub mod scoring;

pub use matcher::{MatchResult, Matcher};
pub use reasons::{generate_match_reasons, REASON_THRESHOLD};
pub use rules::{RatingRule, NEUTRAL_SCORE};
pub use scoring::{
    calculate_category_scores, calculate_match_percentage, score_activity_level,
    score_experience_level, score_family_factors, score_kids_compatibility,
    score_living_situation, score_pets_compatibility, score_preferences,
};
