// Route exports
pub mod admin;
pub mod breeds;
pub mod health;
pub mod quiz_results;
pub mod recommendations;

use actix_web::{http::header, web, HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::core::Matcher;
use crate::models::ErrorResponse;
use crate::services::{AuthError, AuthProvider, AuthUser, BreedCatalog, BreedStore, QuizResultSink, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub breeds: Arc<dyn BreedStore>,
    pub catalog: BreedCatalog,
    pub results: Arc<dyn QuizResultSink>,
    pub auth: Arc<dyn AuthProvider>,
    pub matcher: Matcher,
    pub default_limit: usize,
    pub max_limit: usize,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure)
            .configure(recommendations::configure)
            .configure(breeds::configure)
            .configure(admin::configure)
            .configure(quiz_results::configure),
    );
}

/// Token from an `Authorization: Bearer <token>` header
pub(crate) fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn unauthorized(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(401, "Unauthorized", message))
}

/// Caller identity when a valid token is present; guests get `None`
pub(crate) async fn optional_user(state: &AppState, req: &HttpRequest) -> Option<AuthUser> {
    let token = bearer_token(req)?;
    match state.auth.authenticate(token).await {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::debug!("Treating caller as guest: {}", e);
            None
        }
    }
}

pub(crate) async fn require_user(state: &AppState, req: &HttpRequest) -> Result<AuthUser, HttpResponse> {
    let token = bearer_token(req).ok_or_else(|| unauthorized("Not authenticated"))?;

    state.auth.authenticate(token).await.map_err(|e| match e {
        AuthError::Provider(_) => auth_provider_failure(&e),
        _ => {
            tracing::info!("Rejected token on {}: {}", req.path(), e);
            unauthorized(e.to_string())
        }
    })
}

pub(crate) async fn require_admin(state: &AppState, req: &HttpRequest) -> Result<AuthUser, HttpResponse> {
    let user = require_user(state, req).await?;

    match state.auth.is_admin(&user).await {
        Ok(true) => Ok(user),
        Ok(false) => {
            tracing::info!("User {} is not an admin", user.id);
            Err(unauthorized("Not authorized"))
        }
        Err(e @ AuthError::Provider(_)) => Err(auth_provider_failure(&e)),
        Err(e) => {
            tracing::warn!("Admin check failed for {}: {}", user.id, e);
            Err(unauthorized("Not authorized"))
        }
    }
}

/// The provider itself failed, so the caller's identity is unknown
fn auth_provider_failure(err: &AuthError) -> HttpResponse {
    tracing::error!("{}", err);
    HttpResponse::InternalServerError().json(ErrorResponse::new(500, "Auth provider error", err.to_string()))
}

/// Map a store failure onto an HTTP error body
pub(crate) fn store_error_response(error: &str, err: &StoreError) -> HttpResponse {
    match err {
        StoreError::NotFound(msg) => HttpResponse::NotFound().json(ErrorResponse::new(404, "Not found", msg.clone())),
        StoreError::Rejected(msg) => HttpResponse::BadRequest().json(ErrorResponse::new(400, error, msg.clone())),
        other => {
            tracing::error!("{}: {}", error, other);
            HttpResponse::InternalServerError().json(ErrorResponse::new(500, error, other.to_string()))
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory collaborators for route tests

    use async_trait::async_trait;
    use serde_json::{Map, Value};
    use std::sync::Mutex;

    use super::*;
    use crate::models::{BreedFilter, BreedPage, BreedRecord, NewQuizResult, QuizResult};
    use crate::services::{AuthError, CacheManager};

    pub const USER_TOKEN: &str = "user-token";
    pub const ADMIN_TOKEN: &str = "admin-token";
    /// Authenticates, but the admin lookup fails upstream
    pub const FLAKY_TOKEN: &str = "flaky-token";

    #[derive(Default)]
    pub struct MemoryBreeds {
        pub breeds: Mutex<Vec<BreedRecord>>,
    }

    #[async_trait]
    impl BreedStore for MemoryBreeds {
        async fn list_breeds(&self, filter: &BreedFilter) -> Result<BreedPage, StoreError> {
            let mut matching: Vec<BreedRecord> = self
                .breeds
                .lock()
                .unwrap()
                .iter()
                .filter(|b| filter.matches(b))
                .cloned()
                .collect();
            matching.sort_by(|a, b| a.name.cmp(&b.name));
            let total = matching.len() as u64;
            let breeds = matching
                .into_iter()
                .skip(filter.offset() as usize)
                .take(filter.limit as usize)
                .collect();
            Ok(BreedPage { breeds, total })
        }

        async fn all_breeds(&self) -> Result<Vec<BreedRecord>, StoreError> {
            let mut breeds = self.breeds.lock().unwrap().clone();
            breeds.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(breeds)
        }

        async fn get_breed(&self, id: &str) -> Result<BreedRecord, StoreError> {
            self.breeds
                .lock()
                .unwrap()
                .iter()
                .find(|b| b.id == id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(format!("Breed {} not found", id)))
        }

        async fn create_breed(&self, payload: Map<String, Value>) -> Result<BreedRecord, StoreError> {
            let mut breeds = self.breeds.lock().unwrap();
            let mut row = payload;
            row.insert("id".to_string(), Value::from(breeds.len() as u64 + 1));
            let breed: BreedRecord = serde_json::from_value(Value::Object(row))
                .map_err(|e| StoreError::Rejected(e.to_string()))?;
            breeds.push(breed.clone());
            Ok(breed)
        }

        async fn update_breed(&self, id: &str, payload: Map<String, Value>) -> Result<BreedRecord, StoreError> {
            let mut breeds = self.breeds.lock().unwrap();
            let existing = breeds
                .iter_mut()
                .find(|b| b.id == id)
                .ok_or_else(|| StoreError::NotFound(format!("Breed {} not found", id)))?;

            let mut row = match serde_json::to_value(&*existing) {
                Ok(Value::Object(row)) => row,
                _ => return Err(StoreError::InvalidResponse("bad row".to_string())),
            };
            row.extend(payload);
            *existing = serde_json::from_value(Value::Object(row))
                .map_err(|e| StoreError::Rejected(e.to_string()))?;
            Ok(existing.clone())
        }

        async fn count_breeds(&self) -> Result<u64, StoreError> {
            Ok(self.breeds.lock().unwrap().len() as u64)
        }
    }

    #[derive(Default)]
    pub struct MemoryResults {
        pub results: Mutex<Vec<QuizResult>>,
    }

    #[async_trait]
    impl QuizResultSink for MemoryResults {
        async fn save_result(&self, result: NewQuizResult) -> Result<QuizResult, StoreError> {
            let now = chrono::Utc::now();
            let stored = QuizResult {
                id: uuid::Uuid::new_v4(),
                user_id: result.user_id,
                session_id: result.session_id,
                answers: result.answers,
                matches: result.matches,
                is_guest: result.is_guest,
                created_at: now,
                updated_at: now,
            };
            self.results.lock().unwrap().push(stored.clone());
            Ok(stored)
        }

        async fn results_for_user(&self, user_id: &str) -> Result<Vec<QuizResult>, StoreError> {
            let mut results: Vec<QuizResult> = self
                .results
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.user_id.as_deref() == Some(user_id))
                .cloned()
                .collect();
            results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(results)
        }

        async fn health_check(&self) -> Result<bool, StoreError> {
            Ok(true)
        }
    }

    /// Accepts fixed tokens for a plain user, an admin, and a failing admin lookup
    pub struct StaticAuth;

    #[async_trait]
    impl AuthProvider for StaticAuth {
        async fn authenticate(&self, token: &str) -> Result<AuthUser, AuthError> {
            match token {
                USER_TOKEN => Ok(AuthUser {
                    id: "user-1".to_string(),
                    email: Some("user@example.com".to_string()),
                }),
                ADMIN_TOKEN => Ok(AuthUser {
                    id: "admin-1".to_string(),
                    email: Some("admin@example.com".to_string()),
                }),
                FLAKY_TOKEN => Ok(AuthUser {
                    id: "flaky-1".to_string(),
                    email: None,
                }),
                _ => Err(AuthError::InvalidToken),
            }
        }

        async fn is_admin(&self, user: &AuthUser) -> Result<bool, AuthError> {
            match user.id.as_str() {
                "flaky-1" => Err(AuthError::Provider("profiles lookup timed out".to_string())),
                id => Ok(id == "admin-1"),
            }
        }
    }

    pub fn breed(id: &str, name: &str) -> BreedRecord {
        BreedRecord {
            id: id.to_string(),
            name: name.to_string(),
            size: "Medium".to_string(),
            group: "Sporting".to_string(),
            ..Default::default()
        }
    }

    pub fn app_state(breeds: Vec<BreedRecord>) -> (AppState, Arc<MemoryBreeds>, Arc<MemoryResults>) {
        let store = Arc::new(MemoryBreeds {
            breeds: Mutex::new(breeds),
        });
        let results = Arc::new(MemoryResults::default());
        let catalog = BreedCatalog::new(store.clone(), Arc::new(CacheManager::in_memory(10, 60)));

        let state = AppState {
            breeds: store.clone(),
            catalog,
            results: results.clone(),
            auth: Arc::new(StaticAuth),
            matcher: Matcher::default(),
            default_limit: 20,
            max_limit: 100,
        };

        (state, store, results)
    }
}
