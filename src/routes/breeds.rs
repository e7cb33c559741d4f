use actix_web::{web, HttpResponse, Responder};

use crate::models::BreedsResponse;
use crate::routes::{store_error_response, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/breeds", web::get().to(list_breeds))
        .route("/breeds/{id}", web::get().to(get_breed));
}

/// Public breed list, ordered by name
///
/// GET /api/v1/breeds
async fn list_breeds(state: web::Data<AppState>) -> impl Responder {
    match state.catalog.all_breeds().await {
        Ok(breeds) => HttpResponse::Ok().json(BreedsResponse {
            success: true,
            total: breeds.len() as u64,
            breeds,
        }),
        Err(e) => store_error_response("Failed to fetch breeds from database", &e),
    }
}

/// GET /api/v1/breeds/{id}
async fn get_breed(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.breeds.get_breed(&id).await {
        Ok(breed) => HttpResponse::Ok().json(breed),
        Err(e) => store_error_response("Failed to fetch breed", &e),
    }
}
