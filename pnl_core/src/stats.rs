//! Portfolio-level statistics over a completed wallet ledger.

use serde::{Deserialize, Serialize};

use crate::ledger::WalletLedger;

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Headline figures summarizing every token a wallet traded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStats {
    /// Number of distinct ledger entries, the `UNKNOWN` bucket included.
    #[serde(rename = "totalTokens")]
    pub total_tokens: usize,
    /// Percentage of tokens with positive realized PnL, rounded to two
    /// decimals. Zero for an empty ledger.
    #[serde(rename = "winRate")]
    pub win_rate: f64,
    /// Mean per-token ROI over tokens with SOL spent on them. Absent when
    /// no token qualifies.
    #[serde(rename = "avgRoi", skip_serializing_if = "Option::is_none")]
    pub avg_roi: Option<f64>,
    /// Mean SOL spent per token, over the same set of tokens as `avg_roi`.
    #[serde(rename = "avgBuyAmount", skip_serializing_if = "Option::is_none")]
    pub avg_buy_amount: Option<f64>,
    /// Sum of per-token realized PnL in SOL, rounded to two decimals.
    #[serde(rename = "totalPnl")]
    pub total_pnl: f64,
    /// `total_pnl` converted at a fixed configured rate. A rough indication,
    /// not a market valuation.
    #[serde(rename = "totalPnlFiat")]
    pub total_pnl_fiat: f64,
}

impl PortfolioStats {
    /// Derive the headline figures from a ledger.
    ///
    /// All folds run in the ledger's first-appearance order, so the same
    /// ledger always produces bit-identical statistics.
    pub fn compute(ledger: &WalletLedger, sol_fiat_rate: f64) -> Self {
        let total_tokens = ledger.len();

        let winning = ledger
            .iter()
            .filter(|(_, entry)| entry.net_pnl > 0.0)
            .count();
        let win_rate = if total_tokens > 0 {
            round2(winning as f64 / total_tokens as f64 * 100.0)
        } else {
            0.0
        };

        let mut rois = Vec::new();
        let mut buy_amounts = Vec::new();
        for (_, entry) in ledger.iter() {
            if let Some(roi) = entry.roi() {
                rois.push(roi);
                buy_amounts.push(entry.total_bought);
            }
        }
        let avg_roi = mean(&rois).map(round2);
        let avg_buy_amount = mean(&buy_amounts).map(round2);

        let total_pnl = round2(ledger.iter().map(|(_, entry)| entry.net_pnl).sum());
        let total_pnl_fiat = round2(total_pnl * sol_fiat_rate);

        Self {
            total_tokens,
            win_rate,
            avg_roi,
            avg_buy_amount,
            total_pnl,
            total_pnl_fiat,
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
