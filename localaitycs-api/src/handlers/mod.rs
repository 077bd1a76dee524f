pub mod ai_proxy;
pub mod conversations;
pub mod user_data;

use shared_types::{ErrorResponse, SubmissionField};

pub(crate) fn missing_field(field: SubmissionField) -> ErrorResponse {
    ErrorResponse::new(format!("Missing required field: {}", field))
}

/// Register every route served by the API.
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(user_data::save_user_data)
        .service(user_data::list_user_data)
        .service(ai_proxy::recommend)
        .service(conversations::create_conversation)
        .service(conversations::get_conversation)
        .service(conversations::send_turn);
}
