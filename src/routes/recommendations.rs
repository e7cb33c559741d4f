use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{ErrorResponse, RecommendationRequest, RecommendationsResponse};
use crate::routes::{store_error_response, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/recommendations", web::post().to(recommend))
        .route("/recommendations", web::get().to(recommendations_info));
}

/// Breed recommendations endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "livingSituation": "apartment|house|farm",
///   "activityLevel": "low|moderate|high",
///   "climate": "hot|moderate|cold",
///   "otherPets": "none|dogs|cats|mixed",
///   "experienceLevel": "beginner|some|expert",
///   "hasKids": "none|young|older|both",
///   "groomingTolerance": "minimal|moderate|high",
///   "limit": 20
/// }
/// ```
async fn recommend(state: web::Data<AppState>, req: web::Json<RecommendationRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Rejected questionnaire: {}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            400,
            "Missing required questionnaire data",
            errors.to_string(),
        ));
    }

    let breeds = match state.catalog.all_breeds().await {
        Ok(breeds) => breeds,
        Err(e) => return store_error_response("Failed to fetch breeds from database", &e),
    };

    if breeds.is_empty() {
        return HttpResponse::NotFound().json(ErrorResponse::new(
            404,
            "No breeds found in database",
            "The breed store returned no records",
        ));
    }

    let limit = req
        .limit
        .map(usize::from)
        .unwrap_or(state.default_limit)
        .min(state.max_limit);

    let answers = req.answers();
    let result = state.matcher.recommend(&answers, &breeds, limit);

    tracing::info!(
        "Returning {} of {} breeds for {} / {} / {}",
        result.matches.len(),
        result.total_breeds,
        answers.living_situation,
        answers.activity_level,
        answers.experience_level
    );

    HttpResponse::Ok().json(RecommendationsResponse {
        success: true,
        matches: result.matches,
        total_breeds: result.total_breeds,
        questionnaire: answers,
    })
}

/// Self-check: reports how many breeds the engine would score
async fn recommendations_info(state: web::Data<AppState>) -> impl Responder {
    match state.breeds.count_breeds().await {
        Ok(count) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Recommendations API is working",
            "breedCount": count,
            "endpoints": {
                "POST": "/api/v1/recommendations - Submit questionnaire for breed recommendations"
            }
        })),
        Err(e) => store_error_response("Database connection failed", &e),
    }
}
