// Model exports
pub mod answers;
pub mod domain;
pub mod requests;
pub mod responses;

pub use answers::{
    ActivityLevel, Climate, ExperienceLevel, GroomingTolerance, HasKids, LivingSituation,
    OtherPets, QuestionnaireAnswers,
};
pub use domain::{
    sanitize_breed_payload, BreedFilter, BreedMatch, BreedPage, BreedRecord, CategoryScores,
    CategoryWeights, MatchLabel, NewQuizResult, QuizResult, EDITABLE_BREED_COLUMNS, NEUTRAL_RATING,
};
pub use requests::{AdminBreedQuery, RecommendationRequest, SaveQuizResultRequest};
pub use responses::{
    AdminBreedsResponse, BreedResponse, BreedsResponse, ErrorResponse, HealthResponse,
    QuizResultsResponse, RecommendationsResponse, SaveQuizResultResponse,
};
