mod common;

use actix_web::test;
use actix_web::test::TestRequest;
use common::{setup_test_app, setup_test_app_with, MockUpstream, RECOMMENDATION};
use localaitycs_dialogue::messages;
use serde_json::{json, Value};

async fn create_conversation<S>(app: &S) -> String
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
{
    let req = TestRequest::post().uri("/api/conversations").to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = test::read_body_json(resp).await;
    body["id"].as_str().unwrap().to_string()
}

async fn send<S>(app: &S, id: &str, text: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
{
    let req = TestRequest::post()
        .uri(&format!("/api/conversations/{}/turns", id))
        .set_json(json!({ "text": text }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

fn emitted_texts(body: &Value) -> Vec<String> {
    body["emitted"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["text"].as_str().unwrap().to_string())
        .collect()
}

#[actix_rt::test]
async fn test_new_conversation_is_seeded() -> anyhow::Result<()> {
    let test_app = setup_test_app().await?;

    let req = TestRequest::post().uri("/api/conversations").to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert_eq!(resp.status().as_u16(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["stage"], "awaiting_budget");
    assert_eq!(body["loading"], false);
    let turns = body["turns"].as_array().unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0]["text"], messages::GREETING);
    assert_eq!(turns[1]["text"], messages::ASK_BUDGET);
    assert!(turns.iter().all(|t| t["role"] == "assistant"));

    let id = body["id"].as_str().unwrap();
    let req = TestRequest::get()
        .uri(&format!("/api/conversations/{}", id))
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert!(resp.status().is_success());

    Ok(())
}

#[actix_rt::test]
async fn test_unknown_conversation_is_not_found() -> anyhow::Result<()> {
    let test_app = setup_test_app().await?;

    let req = TestRequest::get()
        .uri("/api/conversations/does-not-exist")
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert_eq!(resp.status().as_u16(), 404);

    let (status, body) = send(&test_app.app, "does-not-exist", "1000").await;
    assert_eq!(status, 404);
    assert!(body["error"].as_str().unwrap().contains("does-not-exist"));

    Ok(())
}

#[actix_rt::test]
async fn test_full_conversation_saves_and_recommends() -> anyhow::Result<()> {
    let test_app = setup_test_app().await?;
    let id = create_conversation(&test_app.app).await;

    let (status, body) = send(&test_app.app, &id, "muito").await;
    assert_eq!(status, 200);
    assert_eq!(emitted_texts(&body), vec![messages::INVALID_BUDGET]);
    assert_eq!(body["conversation"]["stage"], "awaiting_budget");

    let (_, body) = send(&test_app.app, &id, " 15000.50 ").await;
    assert_eq!(emitted_texts(&body), vec![messages::ASK_CITY]);
    assert_eq!(body["conversation"]["submission"]["budget"], 15000.5);

    let (_, body) = send(&test_app.app, &id, "Florianópolis").await;
    assert_eq!(emitted_texts(&body), vec![messages::ASK_INVESTMENT_TYPE]);

    let (_, body) = send(&test_app.app, &id, "Sorveteria").await;
    assert_eq!(emitted_texts(&body), vec![messages::ASK_TARGET_AUDIENCE]);

    let (status, body) = send(&test_app.app, &id, "Famílias").await;
    assert_eq!(status, 200);
    assert_eq!(
        emitted_texts(&body),
        vec![messages::PROCESSING, RECOMMENDATION]
    );

    let conversation = &body["conversation"];
    assert_eq!(conversation["stage"], "completed");
    assert_eq!(conversation["loading"], false);
    assert_eq!(conversation["submission"]["city"], "Florianópolis");
    assert_eq!(conversation["submission"]["investmentType"], "Sorveteria");
    assert_eq!(conversation["submission"]["targetAudience"], "Famílias");
    // 2 seeded + 5 user + 6 assistant replies
    assert_eq!(conversation["turns"].as_array().unwrap().len(), 13);

    let rows = test_app.store.list_all().await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].budget, 15000.5);
    assert_eq!(rows[0].city, "Florianópolis");

    assert_eq!(test_app.mock_upstream.get_prompts().len(), 1);

    Ok(())
}

#[actix_rt::test]
async fn test_unavailable_service_still_saves() -> anyhow::Result<()> {
    let test_app = setup_test_app_with(MockUpstream::unavailable()).await?;
    let id = create_conversation(&test_app.app).await;

    for answer in ["2000", "Recife", "Padaria"] {
        send(&test_app.app, &id, answer).await;
    }
    let (status, body) = send(&test_app.app, &id, "Moradores do bairro").await;

    assert_eq!(status, 200);
    assert_eq!(
        emitted_texts(&body),
        vec![messages::PROCESSING, messages::GENERIC_FAILURE]
    );
    assert_eq!(body["conversation"]["loading"], false);
    assert_eq!(test_app.store.list_all().await?.len(), 1);
    assert!(test_app.mock_upstream.get_prompts().is_empty());

    Ok(())
}

#[actix_rt::test]
async fn test_completed_conversation_rejects_further_turns() -> anyhow::Result<()> {
    let test_app = setup_test_app().await?;
    let id = create_conversation(&test_app.app).await;

    for answer in ["3000", "Salvador", "Academia", "Adultos"] {
        send(&test_app.app, &id, answer).await;
    }

    let (status, body) = send(&test_app.app, &id, "E agora?").await;

    assert_eq!(status, 200);
    assert_eq!(emitted_texts(&body), vec![messages::ALREADY_COMPLETED]);
    assert_eq!(body["conversation"]["stage"], "completed");
    assert_eq!(test_app.store.list_all().await?.len(), 1);
    assert_eq!(test_app.mock_upstream.get_health_check_count(), 1);

    Ok(())
}

#[actix_rt::test]
async fn test_turn_refused_while_previous_is_in_flight() -> anyhow::Result<()> {
    let test_app = setup_test_app().await?;
    let id = create_conversation(&test_app.app).await;

    let (_state, claim) = test_app.registry.begin_turn(&id)?;

    let (status, body) = send(&test_app.app, &id, "1000").await;
    assert_eq!(status, 409);
    assert!(body["error"].is_string());

    drop(claim);

    let (status, body) = send(&test_app.app, &id, "1000").await;
    assert_eq!(status, 200);
    assert_eq!(emitted_texts(&body), vec![messages::ASK_CITY]);

    Ok(())
}
