//! Wire-shaped transaction payloads.
//!
//! These types mirror the enriched-transaction JSON returned by the Helius
//! API closely enough to deserialize real responses, while treating every
//! field as optional. Payloads in the wild routinely omit `events`, carry
//! swaps with only one native leg, or send amounts in unexpected shapes,
//! and none of that may abort an analysis run.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ledger bucket for swap legs whose token side carries no usable mint.
///
/// Distinct tokens can land in this bucket together, so its per-token
/// figures are only meaningful as a "could not attribute" remainder.
pub const UNKNOWN_MINT: &str = "UNKNOWN";

/// Block timestamp recorded when a payload omits `blockTime`.
pub const MISSING_BLOCK_TIME: i64 = 0;

/// SOL amount recorded for a native leg whose amount is missing or
/// non-numeric. The leg still counts as a trade for time-bound purposes.
pub const MALFORMED_AMOUNT_SOL: f64 = 0.0;

/// Lamports in one SOL.
pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

/// One enriched transaction as fetched for a wallet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(rename = "blockTime", default, skip_serializing_if = "Option::is_none")]
    pub block_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<TransactionEvents>,
}

impl RawTransaction {
    /// Block timestamp with the missing-value sentinel applied.
    pub fn block_time_or_default(&self) -> i64 {
        self.block_time.unwrap_or(MISSING_BLOCK_TIME)
    }

    /// The swap event, if this transaction carries one.
    pub fn swap_event(&self) -> Option<&SwapEvent> {
        self.events.as_ref().and_then(|events| events.swap.as_ref())
    }
}

/// Event section of an enriched transaction. Only swaps are of interest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionEvents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap: Option<SwapEvent>,
}

/// A decoded swap. Native legs describe the SOL side, token legs the
/// SPL-token side. Either native leg may be absent, and both may be present
/// in a single event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwapEvent {
    #[serde(rename = "nativeInput", default, skip_serializing_if = "Option::is_none")]
    pub native_input: Option<NativeLeg>,
    #[serde(rename = "nativeOutput", default, skip_serializing_if = "Option::is_none")]
    pub native_output: Option<NativeLeg>,
    #[serde(rename = "tokenInputs", default, skip_serializing_if = "Vec::is_empty")]
    pub token_inputs: Vec<TokenLeg>,
    #[serde(rename = "tokenOutputs", default, skip_serializing_if = "Vec::is_empty")]
    pub token_outputs: Vec<TokenLeg>,
}

/// SOL side of a swap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeLeg {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// Lamport amount. The API sends a decimal string, but bare numbers are
    /// tolerated too; anything else degrades to [`MALFORMED_AMOUNT_SOL`].
    #[serde(default)]
    pub amount: Value,
}

impl NativeLeg {
    /// Lamports converted to SOL, with malformed amounts degraded to the
    /// zero sentinel rather than an error.
    pub fn amount_sol(&self) -> f64 {
        let lamports = match &self.amount {
            Value::String(text) => text.trim().parse::<f64>().ok(),
            Value::Number(number) => number.as_f64(),
            _ => None,
        };
        match lamports {
            Some(lamports) => lamports / LAMPORTS_PER_SOL,
            None => MALFORMED_AMOUNT_SOL,
        }
    }
}

/// SPL-token side of a swap. Only the mint matters for attribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenLeg {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mint: Option<String>,
}
