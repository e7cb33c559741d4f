use crate::core::{
    reasons::generate_match_reasons,
    scoring::{calculate_category_scores, calculate_match_percentage},
};
use crate::models::{BreedMatch, BreedRecord, CategoryScores, CategoryWeights, MatchLabel, QuestionnaireAnswers};

/// Result of a recommendation run
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<BreedMatch>,
    pub total_breeds: usize,
}

/// Breed recommendation engine
///
/// # Pipeline
/// 1. Score five questionnaire categories per breed
/// 2. Fold them into a weighted percentage
/// 3. Explain the categories that scored well
/// 4. Rank all breeds, highest percentage first
///
/// The matcher holds no state besides its weights; the same inputs always
/// produce the same output.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: CategoryWeights,
}

impl Matcher {
    pub fn new(weights: CategoryWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: CategoryWeights::default(),
        }
    }

    /// Per-category scores for one breed
    pub fn score_breed(&self, answers: &QuestionnaireAnswers, breed: &BreedRecord) -> CategoryScores {
        calculate_category_scores(answers, breed)
    }

    /// Score and explain a single breed
    pub fn match_breed(&self, answers: &QuestionnaireAnswers, breed: &BreedRecord) -> BreedMatch {
        let scores = self.score_breed(answers, breed);
        let match_percentage = calculate_match_percentage(&scores, &self.weights);
        let match_reasons = generate_match_reasons(answers, &scores);

        BreedMatch {
            breed: breed.clone(),
            match_percentage,
            match_reasons,
            match_label: MatchLabel::from_percentage(match_percentage),
        }
    }

    /// Match every breed against the answers
    ///
    /// Returns exactly one entry per input breed, sorted by percentage
    /// (descending). Equal percentages keep their input order.
    pub fn calculate_breed_matches(
        &self,
        answers: &QuestionnaireAnswers,
        breeds: &[BreedRecord],
    ) -> Vec<BreedMatch> {
        let mut matches: Vec<BreedMatch> = breeds
            .iter()
            .map(|breed| self.match_breed(answers, breed))
            .collect();

        // Vec::sort_by is stable
        matches.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));

        tracing::debug!(
            "Scored {} breeds, best match {:?}",
            matches.len(),
            matches.first().map(|m| (&m.breed.name, m.match_percentage))
        );

        matches
    }

    /// Rank all breeds and keep the top `limit`
    pub fn recommend(
        &self,
        answers: &QuestionnaireAnswers,
        breeds: &[BreedRecord],
        limit: usize,
    ) -> MatchResult {
        let mut matches = self.calculate_breed_matches(answers, breeds);
        matches.truncate(limit);

        MatchResult {
            matches,
            total_breeds: breeds.len(),
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
