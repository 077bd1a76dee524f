use actix_cors::Cors;
use actix_web::{http::header, web, App, HttpServer};
use clap::Parser;
use localaitycs_api::config::ApiConfig;
use localaitycs_api::handlers;
use localaitycs_api::helpers::{
    database::initialize_database, gateway::create_ai_gateway, logging::init_logging,
};
use localaitycs_api::state::ConversationRegistry;
use localaitycs_api::storage::SqliteRecordStore;
use localaitycs_dialogue::{DialogueEngine, RecordStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file (created with defaults if missing)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on, overrides config and PORT
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (mut config, config_path) = ApiConfig::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let _log_guard = init_logging(args.verbose, config.logging.directory.as_deref())?;
    info!(path = %config_path.display(), "Loaded configuration");

    let db_conn = initialize_database(&config.database.path)?;
    let store: Arc<dyn RecordStore> = Arc::new(SqliteRecordStore::new(db_conn));
    let gateway = create_ai_gateway(&config.upstream)?;
    let engine = Arc::new(DialogueEngine::new(store.clone(), gateway.clone()));
    let registry = web::Data::new(ConversationRegistry::new());

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting localaitycs-api server at http://{}", bind_addr);

    let allowed_origins = config.cors.allowed_origins.clone();

    HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                header::HeaderName::from_static("x-api-key"),
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(gateway.clone()))
            .app_data(web::Data::new(engine.clone()))
            .app_data(registry.clone())
            .configure(handlers::configure)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
