use crate::state::{ConversationRegistry, RegistryError};
use actix_web::{get, post, web, HttpResponse, Responder};
use localaitycs_dialogue::DialogueEngine;
use shared_types::{ErrorResponse, SendTurnRequest, SendTurnResponse};
use std::sync::Arc;
use tracing::{error, info, warn};

fn registry_error(e: RegistryError) -> HttpResponse {
    match e {
        RegistryError::NotFound(_) => {
            warn!(error = %e, "Conversation lookup failed");
            HttpResponse::NotFound().json(ErrorResponse::new(e.to_string()))
        }
        RegistryError::Busy(_) => {
            warn!(error = %e, "Turn refused");
            HttpResponse::Conflict().json(ErrorResponse::new(e.to_string()))
        }
        RegistryError::Poisoned => {
            error!(error = %e, "Conversation registry unavailable");
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}

#[post("/api/conversations")]
pub async fn create_conversation(
    engine: web::Data<Arc<DialogueEngine>>,
    registry: web::Data<ConversationRegistry>,
) -> impl Responder {
    match registry.insert(engine.start()) {
        Ok(view) => HttpResponse::Created().json(view),
        Err(e) => registry_error(e),
    }
}

#[get("/api/conversations/{conversation_id}")]
pub async fn get_conversation(
    conversation_id: web::Path<String>,
    registry: web::Data<ConversationRegistry>,
) -> impl Responder {
    match registry.get(&conversation_id) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => registry_error(e),
    }
}

#[post("/api/conversations/{conversation_id}/turns")]
pub async fn send_turn(
    conversation_id: web::Path<String>,
    engine: web::Data<Arc<DialogueEngine>>,
    registry: web::Data<ConversationRegistry>,
    body: web::Json<SendTurnRequest>,
) -> impl Responder {
    let id = conversation_id.into_inner();

    let (state, claim) = match registry.begin_turn(&id) {
        Ok(claimed) => claimed,
        Err(e) => return registry_error(e),
    };

    let outcome = engine
        .accept_turn_with(state, &body.text, |in_flight| claim.progress(in_flight))
        .await;

    info!(
        conversation_id = %id,
        stage = outcome.state.stage.name(),
        emitted = outcome.emitted.len(),
        "Turn processed"
    );

    match claim.finish(&outcome.state) {
        Ok(conversation) => HttpResponse::Ok().json(SendTurnResponse {
            conversation,
            emitted: outcome.emitted,
        }),
        Err(e) => registry_error(e),
    }
}
