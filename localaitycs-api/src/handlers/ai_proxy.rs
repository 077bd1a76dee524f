use crate::handlers::missing_field;
use actix_web::{post, web, HttpResponse, Responder};
use localaitycs_gateway::AiGateway;
use shared_types::{ProxyErrorResponse, RecommendationResponse, Submission};
use std::sync::Arc;
use tracing::{error, warn};

/// One-shot recommendation for a complete submission, without a conversation.
#[post("/api/proxy/ai")]
pub async fn recommend(
    gateway: web::Data<Arc<AiGateway>>,
    body: web::Json<Submission>,
) -> impl Responder {
    let submission = match body.into_inner().complete() {
        Ok(submission) => submission,
        Err(field) => {
            warn!(field = %field, "Rejected incomplete recommendation request");
            return HttpResponse::BadRequest().json(missing_field(field));
        }
    };

    match gateway.recommend(&submission).await {
        Ok(message) => HttpResponse::Ok().json(RecommendationResponse { message }),
        Err(e) => {
            error!(error = %e, details = %e.details(), "AI proxy request failed");
            HttpResponse::InternalServerError().json(ProxyErrorResponse {
                error: "Failed to process AI request".to_string(),
                details: e.details(),
                timestamp: e.occurred_at,
            })
        }
    }
}
