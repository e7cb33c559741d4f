use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;

use crate::models::{BreedFilter, BreedPage, BreedRecord};
use crate::services::store::{AuthError, AuthProvider, AuthUser, BreedStore, StoreError};

/// Errors that can occur when interacting with Supabase
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl From<SupabaseError> for StoreError {
    fn from(value: SupabaseError) -> Self {
        match value {
            SupabaseError::NotFound(what) => StoreError::NotFound(what),
            SupabaseError::InvalidResponse(msg) => StoreError::InvalidResponse(msg),
            SupabaseError::ApiError { status, message } if (400..500).contains(&status) => {
                StoreError::Rejected(message)
            }
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

/// Table names in the Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub breeds: String,
    pub profiles: String,
}

/// Supabase REST client
///
/// Talks to PostgREST for breed records and admin roles, and to the auth
/// service to resolve bearer tokens into users:
/// - Listing, filtering and fetching breeds
/// - Admin breed writes
/// - Token verification and admin checks
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    service_role_key: String,
    tables: SupabaseTables,
    admin_emails: Vec<String>,
    client: Client,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(
        base_url: String,
        anon_key: String,
        service_role_key: String,
        tables: SupabaseTables,
        admin_emails: Vec<String>,
    ) -> Result<Self, SupabaseError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            service_role_key,
            tables,
            admin_emails: admin_emails.into_iter().map(|e| e.to_lowercase()).collect(),
            client,
        })
    }

    fn rest_url(&self, table: &str, params: &[(&str, String)]) -> String {
        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        if query.is_empty() {
            format!("{}/rest/v1/{}", self.base_url, table)
        } else {
            format!("{}/rest/v1/{}?{}", self.base_url, table, query)
        }
    }

    /// Attach service-role credentials; breed writes bypass row level security
    fn with_service_auth(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.service_role_key)
            .header("Authorization", format!("Bearer {}", self.service_role_key))
    }

    async fn ensure_success(response: Response, context: &str) -> Result<Response, SupabaseError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
        tracing::error!("Supabase {} failed: {} - {}", context, status, body);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(SupabaseError::Unauthorized),
            StatusCode::NOT_FOUND => Err(SupabaseError::NotFound(context.to_string())),
            _ => Err(SupabaseError::ApiError {
                status: status.as_u16(),
                message: extract_message(&body),
            }),
        }
    }

    async fn fetch_breed_rows(&self, url: &str) -> Result<(Vec<BreedRecord>, Option<u64>), SupabaseError> {
        let response = self
            .with_service_auth(self.client.get(url))
            .header("Prefer", "count=exact")
            .send()
            .await?;

        let response = Self::ensure_success(response, "breed query").await?;

        let total = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total);

        let rows: Value = response.json().await?;
        let breeds = parse_breed_rows(rows)?;

        Ok((breeds, total))
    }

    async fn write_breed(&self, request: RequestBuilder, payload: &Map<String, Value>, context: &str) -> Result<BreedRecord, SupabaseError> {
        let response = self
            .with_service_auth(request)
            .header("Prefer", "return=representation")
            .json(payload)
            .send()
            .await?;

        let response = Self::ensure_success(response, context).await?;
        let rows: Value = response.json().await?;

        parse_breed_rows(rows)?
            .into_iter()
            .next()
            .ok_or_else(|| SupabaseError::NotFound(context.to_string()))
    }

    /// Look up a user's role in the profiles table
    async fn profile_role(&self, user_id: &str) -> Result<Option<String>, SupabaseError> {
        let url = self.rest_url(
            &self.tables.profiles,
            &[("select", "role".to_string()), ("id", format!("eq.{}", user_id))],
        );

        let response = self.with_service_auth(self.client.get(&url)).send().await?;
        let response = Self::ensure_success(response, "profile lookup").await?;
        let rows: Value = response.json().await?;

        Ok(rows
            .as_array()
            .and_then(|rows| rows.first())
            .and_then(|row| row.get("role"))
            .and_then(|role| role.as_str())
            .map(str::to_string))
    }
}

#[async_trait]
impl BreedStore for SupabaseClient {
    async fn list_breeds(&self, filter: &BreedFilter) -> Result<BreedPage, StoreError> {
        let mut params = vec![
            ("select", "*".to_string()),
            ("order", "name.asc".to_string()),
            ("limit", filter.limit.to_string()),
            ("offset", filter.offset().to_string()),
        ];
        if let Some(search) = &filter.search {
            params.push(("name", format!("ilike.*{}*", search)));
        }
        if let Some(size) = &filter.size {
            params.push(("size", format!("eq.{}", size)));
        }
        if let Some(group) = &filter.group {
            params.push(("group", format!("eq.{}", group)));
        }
        if filter.missing_images {
            params.push(("or", "(image_url.is.null,image_url.eq.\"\")".to_string()));
        }

        let url = self.rest_url(&self.tables.breeds, &params);
        tracing::debug!("Listing breeds: {}", url);

        let (breeds, total) = self.fetch_breed_rows(&url).await?;
        let total = total.unwrap_or(breeds.len() as u64);

        Ok(BreedPage { breeds, total })
    }

    async fn all_breeds(&self) -> Result<Vec<BreedRecord>, StoreError> {
        let url = self.rest_url(
            &self.tables.breeds,
            &[("select", "*".to_string()), ("order", "name.asc".to_string())],
        );

        let (breeds, _) = self.fetch_breed_rows(&url).await?;
        tracing::debug!("Fetched {} breeds", breeds.len());

        Ok(breeds)
    }

    async fn get_breed(&self, id: &str) -> Result<BreedRecord, StoreError> {
        let url = self.rest_url(
            &self.tables.breeds,
            &[("select", "*".to_string()), ("id", format!("eq.{}", id))],
        );

        let (breeds, _) = self.fetch_breed_rows(&url).await?;

        breeds
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("Breed {} not found", id)))
    }

    async fn create_breed(&self, payload: Map<String, Value>) -> Result<BreedRecord, StoreError> {
        let url = self.rest_url(&self.tables.breeds, &[]);
        let breed = self
            .write_breed(self.client.post(&url), &payload, "breed insert")
            .await?;

        tracing::info!("Created breed {} ({})", breed.name, breed.id);
        Ok(breed)
    }

    async fn update_breed(&self, id: &str, payload: Map<String, Value>) -> Result<BreedRecord, StoreError> {
        let url = self.rest_url(&self.tables.breeds, &[("id", format!("eq.{}", id))]);
        let breed = self
            .write_breed(self.client.patch(&url), &payload, "breed update")
            .await
            .map_err(|e| match e {
                SupabaseError::NotFound(_) => SupabaseError::NotFound(format!("Breed {} not found", id)),
                other => other,
            })?;

        tracing::info!("Updated breed {} ({} columns)", id, payload.len());
        Ok(breed)
    }

    async fn count_breeds(&self) -> Result<u64, StoreError> {
        let url = self.rest_url(
            &self.tables.breeds,
            &[("select", "id".to_string()), ("limit", "1".to_string())],
        );

        let (rows, total) = self.fetch_breed_rows(&url).await?;
        Ok(total.unwrap_or(rows.len() as u64))
    }
}

#[async_trait]
impl AuthProvider for SupabaseClient {
    async fn authenticate(&self, token: &str) -> Result<AuthUser, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::MissingToken);
        }

        let url = format!("{}/auth/v1/user", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        match Self::ensure_success(response, "token verification").await {
            Ok(response) => response
                .json::<AuthUser>()
                .await
                .map_err(|e| AuthError::Provider(format!("Failed to parse user: {}", e))),
            Err(SupabaseError::Unauthorized) => Err(AuthError::InvalidToken),
            Err(e) => Err(AuthError::Provider(e.to_string())),
        }
    }

    async fn is_admin(&self, user: &AuthUser) -> Result<bool, AuthError> {
        if let Some(email) = &user.email {
            if self.admin_emails.contains(&email.to_lowercase()) {
                return Ok(true);
            }
        }

        let role = self
            .profile_role(&user.id)
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        Ok(role.as_deref() == Some("admin"))
    }
}

/// Decode a PostgREST row array into breeds, skipping rows that fail to parse
fn parse_breed_rows(rows: Value) -> Result<Vec<BreedRecord>, SupabaseError> {
    let rows = match rows {
        Value::Array(rows) => rows,
        _ => return Err(SupabaseError::InvalidResponse("Expected an array of rows".into())),
    };

    Ok(rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value::<BreedRecord>(row) {
            Ok(breed) => Some(breed.normalized()),
            Err(e) => {
                tracing::warn!("Skipping malformed breed row: {}", e);
                None
            }
        })
        .collect())
}

/// Total row count from a `Content-Range: 0-19/57` header
fn parse_content_range_total(header: &str) -> Option<u64> {
    header.rsplit('/').next().and_then(|total| total.trim().parse().ok())
}

/// PostgREST errors carry a `message` field; fall back to the raw body
fn extract_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
