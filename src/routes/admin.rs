use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::{json, Map, Value};

use crate::models::{sanitize_breed_payload, AdminBreedQuery, AdminBreedsResponse, BreedResponse, ErrorResponse};
use crate::routes::{require_admin, require_user, store_error_response, AppState};
use crate::services::AuthUser;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/admin/breeds", web::get().to(list_breeds))
        .route("/admin/breeds", web::post().to(create_breed))
        .route("/admin/breeds/{id}", web::put().to(update_breed));
}

/// Audit stamp written alongside every admin change
fn last_updated(user: &AuthUser) -> Value {
    json!({
        "updated_at": chrono::Utc::now().to_rfc3339(),
        "updated_by": user.email.clone().unwrap_or_else(|| user.id.clone()),
    })
}

/// Paginated, filterable breed listing
///
/// GET /api/v1/admin/breeds?page=1&limit=20&search=&size=&group=&filter=missing-images
async fn list_breeds(
    state: web::Data<AppState>,
    query: web::Query<AdminBreedQuery>,
    req: HttpRequest,
) -> impl Responder {
    if let Err(resp) = require_user(&state, &req).await {
        return resp;
    }

    let filter = query.to_filter(state.max_limit as u32);

    match state.breeds.list_breeds(&filter).await {
        Ok(page) => {
            let total_pages = page.total.div_ceil(u64::from(filter.limit));
            HttpResponse::Ok().json(AdminBreedsResponse {
                success: true,
                breeds: page.breeds,
                total: page.total,
                page: filter.page,
                total_pages,
            })
        }
        Err(e) => store_error_response("Failed to fetch breeds", &e),
    }
}

/// POST /api/v1/admin/breeds
async fn create_breed(
    state: web::Data<AppState>,
    body: web::Json<Map<String, Value>>,
    req: HttpRequest,
) -> impl Responder {
    let user = match require_admin(&state, &req).await {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    let mut payload = sanitize_breed_payload(body.into_inner());
    if payload.get("name").and_then(Value::as_str).is_none() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            400,
            "Failed to create breed",
            "A breed needs a name",
        ));
    }
    payload.insert("last_updated".to_string(), last_updated(&user));

    match state.breeds.create_breed(payload).await {
        Ok(breed) => {
            state.catalog.invalidate().await;
            tracing::info!("{} created breed {}", user.id, breed.name);
            HttpResponse::Ok().json(BreedResponse { success: true, breed })
        }
        Err(e) => store_error_response("Failed to create breed", &e),
    }
}

/// PUT /api/v1/admin/breeds/{id}
async fn update_breed(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Map<String, Value>>,
    req: HttpRequest,
) -> impl Responder {
    let user = match require_admin(&state, &req).await {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    let id = path.into_inner();
    let mut payload = sanitize_breed_payload(body.into_inner());
    if payload.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            400,
            "Failed to update breed",
            "No editable columns in payload",
        ));
    }
    payload.insert("last_updated".to_string(), last_updated(&user));

    match state.breeds.update_breed(&id, payload).await {
        Ok(breed) => {
            state.catalog.invalidate().await;
            tracing::info!("{} updated breed {}", user.id, id);
            HttpResponse::Ok().json(BreedResponse { success: true, breed })
        }
        Err(e) => store_error_response("Failed to update breed", &e),
    }
}
