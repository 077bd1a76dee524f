#![allow(dead_code)]

use actix_web::{test, web, App};
use localaitycs_api::handlers;
use localaitycs_api::helpers::database::initialize_database;
use localaitycs_api::state::ConversationRegistry;
use localaitycs_api::storage::SqliteRecordStore;
use localaitycs_dialogue::{DialogueEngine, RecordStore};
use localaitycs_gateway::{AiGateway, GatewayError, UpstreamClient};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const RECOMMENDATION: &str = "Recomendo o bairro Batel, com alto fluxo de pedestres.";

pub struct TestApp<S> {
    pub store: Arc<dyn RecordStore>,
    pub registry: web::Data<ConversationRegistry>,
    pub mock_upstream: Arc<MockUpstream>,
    pub app: S,
}

pub struct MockUpstream {
    pub alive: bool,
    pub reply: String,
    pub health_check_count: Arc<Mutex<usize>>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    pub fn new() -> Self {
        MockUpstream {
            alive: true,
            reply: RECOMMENDATION.to_string(),
            health_check_count: Arc::new(Mutex::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn unavailable() -> Self {
        MockUpstream {
            alive: false,
            ..Self::new()
        }
    }

    pub fn get_health_check_count(&self) -> usize {
        *self.health_check_count.lock().unwrap()
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockUpstream {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl UpstreamClient for MockUpstream {
    async fn health_check(&self) -> Result<(), GatewayError> {
        *self.health_check_count.lock().unwrap() += 1;
        if self.alive {
            Ok(())
        } else {
            Err(GatewayError::unavailable("error sending request: connection refused"))
        }
    }

    async fn run(&self, prompt: &str) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

pub async fn setup_test_app() -> anyhow::Result<
    TestApp<
        impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    >,
> {
    setup_test_app_with(MockUpstream::new()).await
}

pub async fn setup_test_app_with(
    mock_upstream: MockUpstream,
) -> anyhow::Result<
    TestApp<
        impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    >,
> {
    let db_conn = initialize_database(Path::new(":memory:"))?;
    let store: Arc<dyn RecordStore> = Arc::new(SqliteRecordStore::new(db_conn));

    let mock_upstream = Arc::new(mock_upstream);
    let gateway = Arc::new(AiGateway::new(
        mock_upstream.clone() as Arc<dyn UpstreamClient>
    ));
    let engine = Arc::new(DialogueEngine::new(store.clone(), gateway.clone()));
    let registry = web::Data::new(ConversationRegistry::new());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(gateway))
            .app_data(web::Data::new(engine))
            .app_data(registry.clone())
            .configure(handlers::configure),
    )
    .await;

    Ok(TestApp {
        store,
        registry,
        mock_upstream,
        app,
    })
}

pub fn submission_json() -> serde_json::Value {
    serde_json::json!({
        "budget": 50000.0,
        "city": "Curitiba",
        "investmentType": "Cafeteria",
        "targetAudience": "Estudantes universitários"
    })
}
