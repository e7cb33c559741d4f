//! Collaborator interfaces the HTTP layer depends on.
//!
//! The engine itself never touches these; route handlers fetch breeds,
//! resolve the caller and persist quiz results through them so the backing
//! services can be swapped (or faked in tests).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{BreedFilter, BreedPage, BreedRecord, NewQuizResult, QuizResult};

/// Errors surfaced by any collaborator store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Rejected by store: {0}")]
    Rejected(String),

    #[error("Invalid store response: {0}")]
    InvalidResponse(String),
}

/// Errors from the authentication provider
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Auth provider error: {0}")]
    Provider(String),
}

/// Caller identity as reported by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Read/write access to breed records
#[async_trait]
pub trait BreedStore: Send + Sync {
    /// Filtered, name-ordered page of breeds plus the unpaginated total
    async fn list_breeds(&self, filter: &BreedFilter) -> Result<BreedPage, StoreError>;

    /// Every breed, ordered by name
    async fn all_breeds(&self) -> Result<Vec<BreedRecord>, StoreError>;

    async fn get_breed(&self, id: &str) -> Result<BreedRecord, StoreError>;

    async fn create_breed(&self, payload: Map<String, Value>) -> Result<BreedRecord, StoreError>;

    /// Apply an already-sanitised column update
    async fn update_breed(&self, id: &str, payload: Map<String, Value>) -> Result<BreedRecord, StoreError>;

    async fn count_breeds(&self) -> Result<u64, StoreError>;
}

/// Persistence for finished questionnaires
#[async_trait]
pub trait QuizResultSink: Send + Sync {
    async fn save_result(&self, result: NewQuizResult) -> Result<QuizResult, StoreError>;

    /// Newest first
    async fn results_for_user(&self, user_id: &str) -> Result<Vec<QuizResult>, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}

/// Identity and privilege lookup
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<AuthUser, AuthError>;

    async fn is_admin(&self, user: &AuthUser) -> Result<bool, AuthError>;
}
