//! Helius API client for fetching enriched wallet transactions.
//!
//! The client implements [`TransactionSource`] with the degrade-to-empty
//! contract: every failure mode, from an implausible address to exhausted
//! retries, is logged and reported as an empty transaction sequence so the
//! analysis pipeline never aborts on upstream trouble.

use std::time::Duration;

use async_trait::async_trait;
use config_manager::HeliusConfig;
use pnl_core::{RawTransaction, TransactionSource};
use reqwest::{Client, RequestBuilder};
use thiserror::Error;
use tokio::time;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug)]
pub enum HeliusError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
    #[error("Rate limit exceeded after {attempts} attempts")]
    RateLimitExceeded { attempts: u32 },
    #[error("Invalid wallet address: {0}")]
    InvalidWalletAddress(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, HeliusError>;

/// Client for the Helius enhanced-transactions endpoint.
#[derive(Debug, Clone)]
pub struct HeliusClient {
    /// HTTP client for making requests
    http_client: Client,

    /// Helius API configuration
    config: HeliusConfig,
}

impl HeliusClient {
    /// Create a new Helius client with the given configuration.
    ///
    /// An empty API key is accepted here; requests made with it will fail
    /// upstream and degrade to an empty sequence like any other failure.
    pub fn new(config: HeliusConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent("wallet-pnl-analyzer/0.1")
            .build()
            .map_err(|e| HeliusError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        if config.api_key.is_empty() {
            warn!("Helius API key is empty; transaction fetches will fail until one is configured");
        }

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Transaction limit configured for this client.
    pub fn transaction_limit(&self) -> u32 {
        self.config.transaction_limit
    }

    /// Fetch up to `limit` enriched transactions for a wallet.
    pub async fn fetch_transactions(
        &self,
        wallet_address: &str,
        limit: u32,
    ) -> Result<Vec<RawTransaction>> {
        self.validate_wallet_address(wallet_address)?;

        let url = self.build_transactions_url(wallet_address, limit);
        let request = self.http_client.get(&url);
        let response = self.make_request(request, wallet_address).await?;

        let transactions: Vec<RawTransaction> = response.json().await.map_err(|e| {
            error!("Failed to parse Helius response as JSON: {}", e);
            HeliusError::RequestFailed(e)
        })?;

        info!(
            "Fetched {} transaction(s) for wallet {}",
            transactions.len(),
            wallet_address
        );
        Ok(transactions)
    }

    /// Make a retried HTTP request to the Helius API.
    async fn make_request(
        &self,
        request_builder: RequestBuilder,
        wallet_address: &str,
    ) -> Result<reqwest::Response> {
        let mut attempt = 0;
        let max_attempts = self.config.max_retry_attempts;

        loop {
            attempt += 1;

            // Clone the request for retry attempts
            let request = request_builder
                .try_clone()
                .ok_or_else(|| HeliusError::ConfigError("Failed to clone request".to_string()))?
                .build()
                .map_err(HeliusError::RequestFailed)?;

            debug!(
                "Requesting transactions for wallet {} (attempt {}/{})",
                wallet_address, attempt, max_attempts
            );

            let response = self.http_client.execute(request).await;

            match response {
                Ok(resp) => {
                    let status = resp.status();

                    if status.is_success() {
                        return Ok(resp);
                    } else if status.as_u16() == 429 {
                        if attempt >= max_attempts {
                            return Err(HeliusError::RateLimitExceeded { attempts: attempt });
                        }
                        let backoff_ms = self.config.retry_delay_ms * 2;
                        warn!("Helius rate limit hit, retrying after {}ms", backoff_ms);
                        time::sleep(Duration::from_millis(backoff_ms)).await;
                        continue;
                    } else {
                        let error_text = resp
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        error!("Helius API error: {} - {}", status, error_text);

                        if attempt >= max_attempts {
                            return Err(HeliusError::ApiError {
                                status: status.as_u16(),
                                message: error_text,
                            });
                        }

                        let delay_ms = self.config.retry_delay_ms * attempt as u64;
                        time::sleep(Duration::from_millis(delay_ms)).await;
                        continue;
                    }
                }
                Err(e) => {
                    error!("Helius API request failed: {}", e);

                    if attempt >= max_attempts {
                        return Err(HeliusError::RequestFailed(e));
                    }

                    let delay_ms = self.config.retry_delay_ms * attempt as u64;
                    time::sleep(Duration::from_millis(delay_ms)).await;
                    continue;
                }
            }
        }
    }

    /// Validate wallet address plausibility. Base58 Solana addresses decode
    /// to 32 bytes and render as 32 to 44 characters.
    fn validate_wallet_address(&self, wallet_address: &str) -> Result<()> {
        if wallet_address.is_empty() {
            return Err(HeliusError::InvalidWalletAddress(
                "Wallet address cannot be empty".to_string(),
            ));
        }

        if wallet_address.len() < 32 || wallet_address.len() > 44 {
            return Err(HeliusError::InvalidWalletAddress(format!(
                "Invalid wallet address length: {}",
                wallet_address.len()
            )));
        }

        Ok(())
    }

    /// Build the Helius API URL for fetching wallet transactions.
    fn build_transactions_url(&self, wallet_address: &str, limit: u32) -> String {
        format!(
            "{}/addresses/{}/transactions?api-key={}&limit={}",
            self.config.api_base_url, wallet_address, self.config.api_key, limit
        )
    }
}

#[async_trait]
impl TransactionSource for HeliusClient {
    async fn get_transactions(&self, wallet_address: &str, limit: u32) -> Vec<RawTransaction> {
        match self.fetch_transactions(wallet_address, limit).await {
            Ok(transactions) => transactions,
            Err(e) => {
                warn!(
                    "Transaction fetch for wallet {} failed, analyzing as empty history: {}",
                    wallet_address, e
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> HeliusConfig {
        HeliusConfig {
            api_key: "test-key".to_string(),
            api_base_url: "https://api.helius.xyz/v0".to_string(),
            transaction_limit: 100,
            request_timeout_seconds: 5,
            max_retry_attempts: 1,
            retry_delay_ms: 10,
        }
    }

    fn test_client() -> HeliusClient {
        HeliusClient::new(test_config()).expect("client should build")
    }

    const PLAUSIBLE_WALLET: &str = "DYw8jCTfwHNRJhhmFcbXvVDTqWMEVFBX6ZKUmG5CNSKK";

    #[test]
    fn builds_expected_transactions_url() {
        let url = test_client().build_transactions_url(PLAUSIBLE_WALLET, 100);
        assert_eq!(
            url,
            format!(
                "https://api.helius.xyz/v0/addresses/{}/transactions?api-key=test-key&limit=100",
                PLAUSIBLE_WALLET
            )
        );
    }

    #[test]
    fn rejects_empty_and_implausible_addresses() {
        let client = test_client();
        assert!(client.validate_wallet_address("").is_err());
        assert!(client.validate_wallet_address("too-short").is_err());
        assert!(client
            .validate_wallet_address(&"x".repeat(45))
            .is_err());
        assert!(client.validate_wallet_address(PLAUSIBLE_WALLET).is_ok());
    }

    #[tokio::test]
    async fn invalid_address_degrades_to_empty_sequence() {
        let client = test_client();
        let transactions = client.get_transactions("nope", 100).await;
        assert!(transactions.is_empty());
    }

    #[tokio::test]
    async fn unreachable_api_degrades_to_empty_sequence() {
        // Reserved TEST-NET-1 address, nothing listens there.
        let mut config = test_config();
        config.api_base_url = "http://192.0.2.1:9".to_string();
        config.request_timeout_seconds = 1;
        let client = HeliusClient::new(config).expect("client should build");

        let transactions = client.get_transactions(PLAUSIBLE_WALLET, 10).await;
        assert!(transactions.is_empty());
    }
}
