use actix_web::{web, HttpRequest, HttpResponse, Responder};

use crate::models::{NewQuizResult, QuizResultsResponse, SaveQuizResultRequest, SaveQuizResultResponse};
use crate::routes::{optional_user, require_user, store_error_response, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/quiz-results", web::post().to(save_result))
        .route("/quiz-results", web::get().to(list_results));
}

/// Save a finished questionnaire
///
/// POST /api/v1/quiz-results
///
/// Signed-in callers get the result attached to their account. Guests get a
/// session id back so the client can find the result again.
async fn save_result(
    state: web::Data<AppState>,
    body: web::Json<SaveQuizResultRequest>,
    req: HttpRequest,
) -> impl Responder {
    let user = optional_user(&state, &req).await;
    let body = body.into_inner();

    let session_id = body
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let new_result = NewQuizResult {
        user_id: user.as_ref().map(|u| u.id.clone()),
        session_id,
        answers: body.answers,
        matches: body.matches,
        is_guest: user.is_none(),
    };

    match state.results.save_result(new_result).await {
        Ok(result) => {
            let message = if result.is_guest {
                "Results saved temporarily"
            } else {
                "Results saved to your account"
            };
            tracing::info!("Saved quiz result {} (guest: {})", result.id, result.is_guest);

            HttpResponse::Ok().json(SaveQuizResultResponse {
                success: true,
                session_id: result.session_id.clone(),
                message: message.to_string(),
                result,
            })
        }
        Err(e) => store_error_response("Failed to save quiz results", &e),
    }
}

/// GET /api/v1/quiz-results
async fn list_results(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let user = match require_user(&state, &req).await {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    match state.results.results_for_user(&user.id).await {
        Ok(results) => HttpResponse::Ok().json(QuizResultsResponse { success: true, results }),
        Err(e) => store_error_response("Failed to fetch quiz results", &e),
    }
}
