use serde::{Deserialize, Serialize};

use crate::models::answers::QuestionnaireAnswers;
use crate::models::domain::{BreedMatch, BreedRecord, QuizResult};

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsResponse {
    pub success: bool,
    pub matches: Vec<BreedMatch>,
    pub total_breeds: usize,
    pub questionnaire: QuestionnaireAnswers,
}

/// Public breed listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedsResponse {
    pub success: bool,
    pub breeds: Vec<BreedRecord>,
    pub total: u64,
}

/// Paginated admin breed listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminBreedsResponse {
    pub success: bool,
    pub breeds: Vec<BreedRecord>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u64,
}

/// Single breed create/update result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedResponse {
    pub success: bool,
    pub breed: BreedRecord,
}

/// Saved quiz result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveQuizResultResponse {
    pub success: bool,
    pub result: QuizResult,
    pub session_id: String,
    pub message: String,
}

/// Quiz history for the signed-in user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResultsResponse {
    pub success: bool,
    pub results: Vec<QuizResult>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub database: String,
    pub breed_store: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(status_code: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
        }
    }
}
