use actix_web::{web, HttpResponse, Responder};

use crate::models::HealthResponse;
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/ping", web::get().to(ping));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let database = match state.results.health_check().await {
        Ok(true) => "ok",
        Ok(false) => "error",
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            "error"
        }
    };

    let breed_store = match state.breeds.count_breeds().await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::warn!("Breed store health check failed: {}", e);
            "error"
        }
    };

    let status = if database == "ok" && breed_store == "ok" { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        database: database.to_string(),
        breed_store: breed_store.to_string(),
    })
}

/// Liveness check with breed count
async fn ping(state: web::Data<AppState>) -> impl Responder {
    match state.breeds.count_breeds().await {
        Ok(count) => HttpResponse::Ok().json(serde_json::json!({ "ok": true, "breeds": count })),
        Err(e) => {
            tracing::error!("Ping failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "ok": false, "error": e.to_string() }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::{app_state, breed};
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check_response() {
        let (state, _, _) = app_state(vec![breed("1", "Beagle")]);
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "healthy");
        assert_eq!(body.database, "ok");
        assert_eq!(body.breed_store, "ok");
    }

    #[actix_web::test]
    async fn test_ping_counts_breeds() {
        let (state, _, _) = app_state(vec![breed("1", "Beagle"), breed("2", "Pug")]);
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

        let req = test::TestRequest::get().uri("/ping").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["ok"], true);
        assert_eq!(body["breeds"], 2);
    }
}
