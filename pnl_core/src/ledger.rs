//! Per-token realized-PnL ledgers.
//!
//! The ledger model is deliberately simple: every buy leg is SOL gone,
//! every sell leg is SOL back, and the running difference is the realized
//! PnL per token. There is no cost-basis matching and no accounting for
//! tokens still held, so a position that was bought but never sold shows
//! as a loss of the full buy amount.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::{classify, SwapLeg, TradeDirection};
use crate::transaction::RawTransaction;

/// Aggregated swap activity for a single mint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenLedger {
    /// Total SOL spent buying this token.
    pub total_bought: f64,
    /// Total SOL received selling this token.
    pub total_sold: f64,
    /// `total_sold - total_bought`, accumulated leg by leg.
    pub net_pnl: f64,
    /// Block timestamp of the oldest leg touching this token.
    pub earliest_trade: i64,
    /// Block timestamp of the newest leg touching this token.
    pub latest_trade: i64,
}

impl TokenLedger {
    fn opened_at(block_time: i64) -> Self {
        Self {
            total_bought: 0.0,
            total_sold: 0.0,
            net_pnl: 0.0,
            earliest_trade: block_time,
            latest_trade: block_time,
        }
    }

    /// Realized return on investment in percent, defined only once SOL was
    /// actually spent on the token. Sell-only entries have no ROI.
    pub fn roi(&self) -> Option<f64> {
        if self.total_bought > 0.0 {
            Some(self.net_pnl / self.total_bought * 100.0)
        } else {
            None
        }
    }
}

/// All per-token ledgers of one wallet, keyed by mint.
///
/// Entries iterate in first-appearance order regardless of hash state, so
/// folding the same transaction sequence always accumulates floats in the
/// same order and ranking ties always break the same way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletLedger {
    entries: HashMap<String, TokenLedger>,
    order: Vec<String>,
}

impl WalletLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, mint: &str) -> Option<&TokenLedger> {
        self.entries.get(mint)
    }

    /// Entries in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenLedger)> {
        self.order
            .iter()
            .map(move |mint| (mint.as_str(), &self.entries[mint]))
    }

    /// Fold one classified leg into the ledger.
    ///
    /// Exactly one entry is touched. It is created on first reference with
    /// both trade-time bounds at the leg's timestamp; afterwards the bounds
    /// only ever widen.
    pub fn apply(&mut self, leg: &SwapLeg) {
        let entry = match self.entries.entry(leg.mint.clone()) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => {
                self.order.push(vacant.key().clone());
                vacant.insert(TokenLedger::opened_at(leg.block_time))
            }
        };

        match leg.direction {
            TradeDirection::Buy => {
                entry.total_bought += leg.amount_sol;
                entry.net_pnl -= leg.amount_sol;
            }
            TradeDirection::Sell => {
                entry.total_sold += leg.amount_sol;
                entry.net_pnl += leg.amount_sol;
            }
        }
        entry.earliest_trade = entry.earliest_trade.min(leg.block_time);
        entry.latest_trade = entry.latest_trade.max(leg.block_time);
    }

    /// Entries ranked for display: most recent trade first. The sort is
    /// stable, so tokens sharing a `latest_trade` keep first-appearance
    /// order.
    pub fn ranked_by_latest_trade(&self) -> Vec<(String, TokenLedger)> {
        let mut ranked: Vec<(String, TokenLedger)> = self
            .iter()
            .map(|(mint, entry)| (mint.to_string(), entry.clone()))
            .collect();
        ranked.sort_by(|a, b| b.1.latest_trade.cmp(&a.1.latest_trade));
        ranked
    }
}

/// Classify and fold a whole transaction sequence into a fresh ledger.
///
/// This is a pure left-fold in sequence order; transactions without swap
/// events simply contribute nothing.
pub fn aggregate(transactions: &[RawTransaction]) -> WalletLedger {
    let mut ledger = WalletLedger::new();
    for leg in transactions.iter().flat_map(classify) {
        ledger.apply(&leg);
    }
    debug!(
        "Aggregated {} transaction(s) into {} token ledger(s)",
        transactions.len(),
        ledger.len()
    );
    ledger
}
