//! Breed Match - questionnaire-driven dog breed recommendations
//!
//! This library scores every breed in a catalogue against a prospective
//! owner's answers and ranks them by a weighted match percentage with
//! human-readable reasons. It also carries the HTTP service around the
//! engine: breed store, quiz history and admin editing.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_category_scores, calculate_match_percentage, generate_match_reasons, MatchResult, Matcher};
pub use crate::models::{BreedMatch, BreedRecord, CategoryScores, CategoryWeights, MatchLabel, QuestionnaireAnswers};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        let breed = BreedRecord {
            id: "1".to_string(),
            name: "Labrador Retriever".to_string(),
            ..Default::default()
        };

        let result = matcher.recommend(&QuestionnaireAnswers::default(), &[breed], 20);
        assert_eq!(result.total_breeds, 1);
        assert!(result.matches[0].match_percentage <= 100);
    }
}
