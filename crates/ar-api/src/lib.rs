use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    http::header::{HeaderValue, CONTENT_TYPE},
    http::Method,
    routing::{get, post},
    Router,
};
use clap::Parser;
use dotenvy::dotenv;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use ar_engine::logging::{init_tracing_subscriber, install_tracing_panic_hook};
use ar_engine::RecommendationEngine;

pub mod error;
pub mod handlers;

use error::ApiError;
use handlers::{assessments, health, recommendations};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "ar-api",
    about = "HTTP API for the assessment recommendation engine"
)]
struct Cli {
    /// Path to the product catalogue JSON snapshot
    #[arg(
        long,
        env = "AR_CATALOGUE_PATH",
        default_value = "data/product_catalogue.json"
    )]
    catalogue: PathBuf,

    /// Server port
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// Comma separated list of allowed CORS origins
    #[arg(long, env = "AR_CORS_ORIGINS", default_value = "http://localhost:3000")]
    cors_origins: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalogue: PathBuf,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    fn from_cli(cli: Cli) -> Self {
        let cors_origins = cli
            .cors_origins
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Self {
            catalogue: cli.catalogue,
            port: cli.port,
            cors_origins,
        }
    }
}

pub struct AppState {
    pub engine: RecommendationEngine,
    pub config: AppConfig,
}

pub type SharedState = Arc<AppState>;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

pub fn create_router(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health))
        .route("/assessments", get(assessments::list))
        .route("/assessments/search", get(assessments::search))
        .route("/assessments/:id", get(assessments::get_by_id))
        .route(
            "/recommendations",
            get(recommendations::recommend_get).post(recommendations::recommend),
        )
        .route(
            "/text_recommendations",
            post(recommendations::text_recommendations),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn run() -> Result<(), ApiError> {
    dotenv().ok();
    init_tracing_subscriber("ar-api");
    install_tracing_panic_hook("ar-api");

    let cli = Cli::parse();
    let config = AppConfig::from_cli(cli);

    // A broken catalogue is fatal at boot; refreshing it means starting
    // a new process with the new snapshot (atomic swap, no live rebuild).
    let engine = RecommendationEngine::load(&config.catalogue)?;

    let state = Arc::new(AppState {
        engine,
        config: config.clone(),
    });

    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    let app = create_router(state);

    info!(%addr, catalogue = %config.catalogue.display(), "ar-api listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    axum::serve(listener, app)
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    Ok(())
}
