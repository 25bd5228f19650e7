//! Core realized-PnL engine for Solana wallet analysis.
//!
//! The pipeline is a pure function of its input sequence: fetched
//! transactions are classified into swap legs ([`classifier`]), folded into
//! per-token ledgers ([`ledger`]), and summarized into portfolio statistics
//! ([`stats`]). Feeding the same sequence twice produces bit-identical
//! ledgers, statistics, and rankings.
//!
//! Fetching itself lives behind [`TransactionSource`] so the engine never
//! touches the network.

pub mod classifier;
pub mod ledger;
pub mod stats;
pub mod transaction;

pub use classifier::{classify, SwapLeg, TradeDirection};
pub use ledger::{aggregate, TokenLedger, WalletLedger};
pub use stats::{round2, PortfolioStats};
pub use transaction::{
    NativeLeg, RawTransaction, SwapEvent, TokenLeg, TransactionEvents, LAMPORTS_PER_SOL,
    MALFORMED_AMOUNT_SOL, MISSING_BLOCK_TIME, UNKNOWN_MINT,
};

use async_trait::async_trait;

/// Supplier of wallet transaction history.
///
/// Implementations must degrade gracefully: a fetch that fails for any
/// reason reports an empty sequence (after logging), never an error, so a
/// wallet with an unreachable upstream analyzes like a wallet without swap
/// activity.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch up to `limit` recent transactions for `wallet_address`, newest
    /// first as the upstream returns them.
    async fn get_transactions(&self, wallet_address: &str, limit: u32) -> Vec<RawTransaction>;
}

#[cfg(test)]
mod pipeline_tests;
