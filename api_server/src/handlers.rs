use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Json, Redirect},
    Form,
};
use pnl_core::{aggregate, PortfolioStats};
use tracing::info;

use crate::pages;
use crate::types::*;
use crate::{ApiError, AppState};

/// Index page with the wallet address form.
pub async fn index_page() -> impl IntoResponse {
    Html(pages::INDEX_PAGE)
}

/// Run a full analysis for the posted wallet and redirect to its report.
///
/// Fetch failures surface as an empty transaction sequence, so the only
/// errors left here are a rejected wallet value and a report that could
/// not be written.
pub async fn run_report(
    State(state): State<AppState>,
    Form(request): Form<RunReportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let wallet_address = request.wallet.trim();
    if wallet_address.is_empty() {
        return Err(ApiError::Validation(
            "Wallet address must not be empty".to_string(),
        ));
    }
    if !wallet_address.chars().all(|c| c.is_ascii_graphic()) {
        return Err(ApiError::Validation(
            "Wallet address may only contain visible ASCII characters".to_string(),
        ));
    }

    info!("Running PnL analysis for wallet {}", wallet_address);

    let transactions = state
        .source
        .get_transactions(wallet_address, state.config.helius.transaction_limit)
        .await;

    let ledger = aggregate(&transactions);
    let stats = PortfolioStats::compute(&ledger, state.config.report.sol_fiat_rate);
    let ranked = ledger.ranked_by_latest_trade();

    state.renderer.render(wallet_address, &ranked, &stats)?;

    info!(
        "Analysis finished for wallet {}: {} token(s), total PnL {} SOL",
        wallet_address, stats.total_tokens, stats.total_pnl
    );

    Ok(Redirect::to(&format!("/report/{}", wallet_address)))
}

/// Landing page for a wallet's rendered report.
pub async fn report_page(
    State(state): State<AppState>,
    Path(wallet): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.renderer.report_path(&wallet).exists() {
        return Err(ApiError::NotFound(format!(
            "No report found for wallet {}",
            wallet
        )));
    }

    Ok(Html(pages::interstitial_page(&wallet)))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(SuccessResponse::new(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
