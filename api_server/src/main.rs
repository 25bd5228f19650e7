use std::process::Command;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use config_manager::SystemConfig;
use helius_client::HeliusClient;
use pnl_core::TransactionSource;
use report_renderer::{ReportRenderer, RenderError};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::{info, warn};

mod handlers;
mod pages;
mod types;

use handlers::*;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: SystemConfig,
    pub source: Arc<dyn TransactionSource>,
    pub renderer: Arc<ReportRenderer>,
}

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Report rendering error: {0}")]
    Render(#[from] RenderError),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = Html(pages::error_page(status, &self.to_string()));
        (status, body).into_response()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,api_server=debug".into()),
        )
        .init();

    info!("Starting Solana wallet PnL report server...");

    // Load configuration
    let config = SystemConfig::load()?;
    info!("Configuration loaded successfully");

    let source: Arc<dyn TransactionSource> = Arc::new(HeliusClient::new(config.helius.clone())?);
    info!("Helius client initialized");

    let renderer = Arc::new(ReportRenderer::new(config.report.clone()));
    info!("Report renderer initialized (output: {})", config.report.output_dir);

    let app_state = AppState {
        config: config.clone(),
        source,
        renderer,
    };

    let app = create_router(app_state);

    info!("📋 Available endpoints:");
    info!("   • GET  / - Wallet address form");
    info!("   • POST /run - Run an analysis and redirect to its report");
    info!("   • GET  /report/:wallet - Report landing page");
    info!("   • GET  /serve_report/<file> - Rendered report files");
    info!("   • GET  /health - Health check");

    // Bind and serve
    let bind_addr = format!("{}:{}", config.api.host, config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("🚀 Server listening on {}", bind_addr);

    if config.api.open_browser {
        spawn_browser_open(format!("http://{}/", bind_addr));
    }

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Analysis workflow
        .route("/", get(index_page))
        .route("/run", post(run_report))
        .route("/report/:wallet", get(report_page))
        // Health check
        .route("/health", get(health_check))
        // Rendered report files
        .nest_service(
            "/serve_report",
            ServeDir::new(&state.config.report.output_dir),
        )
        // Add CORS middleware
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .into_inner(),
        )
        .with_state(state)
}

/// Open the operator's browser on the index page shortly after startup.
fn spawn_browser_open(url: String) {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1250)).await;
        info!("Opening browser on {}", url);
        if let Err(e) = open_in_browser(&url) {
            warn!("Could not open browser on {}: {}", url, e);
        }
    });
}

fn open_in_browser(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "windows")]
    let child = Command::new("cmd").args(["/C", "start", "", url]).spawn();
    #[cfg(target_os = "macos")]
    let child = Command::new("open").arg(url).spawn();
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let child = Command::new("xdg-open").arg(url).spawn();

    child.map(|_| ())
}
