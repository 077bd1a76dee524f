use crate::handlers::missing_field;
use actix_web::{get, post, web, HttpResponse, Responder};
use localaitycs_dialogue::RecordStore;
use shared_types::{ErrorResponse, Submission};
use std::sync::Arc;
use tracing::{error, info, warn};

#[post("/api/user-data")]
pub async fn save_user_data(
    store: web::Data<Arc<dyn RecordStore>>,
    body: web::Json<Submission>,
) -> impl Responder {
    let submission = match body.into_inner().complete() {
        Ok(submission) => submission,
        Err(field) => {
            warn!(field = %field, "Rejected incomplete user data");
            return HttpResponse::BadRequest().json(missing_field(field));
        }
    };

    match store.save(&submission).await {
        Ok(stored) => {
            info!(record_id = stored.id, city = %stored.city, "User data saved");
            HttpResponse::Ok().json(stored)
        }
        Err(e) => {
            error!(error = %e, "Failed to save user data");
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to save user data"))
        }
    }
}

#[get("/api/user-data")]
pub async fn list_user_data(store: web::Data<Arc<dyn RecordStore>>) -> impl Responder {
    match store.list_all().await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            error!(error = %e, "Failed to fetch user data");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to fetch user data"))
        }
    }
}
