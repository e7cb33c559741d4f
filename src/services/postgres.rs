use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

use crate::models::{NewQuizResult, QuestionnaireAnswers, QuizResult};
use crate::services::store::{QuizResultSink, StoreError};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

impl From<PostgresError> for StoreError {
    fn from(value: PostgresError) -> Self {
        match value {
            PostgresError::SqlxError(sqlx::Error::RowNotFound) => {
                StoreError::NotFound("quiz result".to_string())
            }
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

/// PostgreSQL client for quiz result history
///
/// Every finished questionnaire is written here together with the matches
/// it produced, keyed by user for signed-in callers and by session id for
/// guests.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Store a quiz submission and return the stored row
    pub async fn insert_result(&self, result: &NewQuizResult) -> Result<QuizResult, PostgresError> {
        let query = r#"
            INSERT INTO quiz_results (id, user_id, session_id, answers, matches, is_guest, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING id, user_id, session_id, answers, matches, is_guest, created_at, updated_at
        "#;

        let row = sqlx::query(query)
            .bind(uuid::Uuid::new_v4())
            .bind(&result.user_id)
            .bind(&result.session_id)
            .bind(Json(&result.answers))
            .bind(Json(&result.matches))
            .bind(result.is_guest)
            .fetch_one(&self.pool)
            .await?;

        let stored = quiz_result_from_row(&row)?;

        tracing::debug!(
            "Stored quiz result {} (session {}, guest: {})",
            stored.id,
            stored.session_id,
            stored.is_guest
        );

        Ok(stored)
    }

    /// All quiz results for a user, newest first
    pub async fn get_results_for_user(&self, user_id: &str) -> Result<Vec<QuizResult>, PostgresError> {
        let query = r#"
            SELECT id, user_id, session_id, answers, matches, is_guest, created_at, updated_at
            FROM quiz_results
            WHERE user_id = $1
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;

        let results = rows
            .iter()
            .map(quiz_result_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("User {} has {} quiz results", user_id, results.len());

        Ok(results)
    }

    /// Health check for the database connection
    pub async fn ping(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn quiz_result_from_row(row: &PgRow) -> Result<QuizResult, sqlx::Error> {
    let answers: Json<QuestionnaireAnswers> = row.try_get("answers")?;
    let matches: Json<serde_json::Value> = row.try_get("matches")?;

    Ok(QuizResult {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        session_id: row.try_get("session_id")?,
        answers: answers.0,
        matches: matches.0,
        is_guest: row.try_get("is_guest")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl QuizResultSink for PostgresClient {
    async fn save_result(&self, result: NewQuizResult) -> Result<QuizResult, StoreError> {
        Ok(self.insert_result(&result).await?)
    }

    async fn results_for_user(&self, user_id: &str) -> Result<Vec<QuizResult>, StoreError> {
        Ok(self.get_results_for_user(user_id).await?)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(self.ping().await?)
    }
}
