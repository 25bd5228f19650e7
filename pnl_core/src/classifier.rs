//! Swap-leg classification.
//!
//! A transaction contributes to the ledger only through its swap event, and
//! each native leg of that event becomes at most one [`SwapLeg`]. SOL spent
//! (`nativeInput`) is a buy of the first output token; SOL received
//! (`nativeOutput`) is a sell of the first input token. A swap carrying both
//! native legs yields two legs, classified independently.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::transaction::{NativeLeg, RawTransaction, SwapEvent, TokenLeg, UNKNOWN_MINT};

/// Which way SOL moved in a swap leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeDirection {
    Buy,
    Sell,
}

/// One classified swap leg, ready to fold into a ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapLeg {
    pub direction: TradeDirection,
    /// Mint the leg is attributed to, or [`UNKNOWN_MINT`].
    pub mint: String,
    /// SOL moved by this leg. Zero when the wire amount was malformed.
    pub amount_sol: f64,
    /// Block timestamp of the enclosing transaction.
    pub block_time: i64,
}

/// Classify one transaction into zero, one, or two swap legs.
///
/// Transactions without a swap event and swaps that never touch SOL yield
/// no legs. When both native legs are present the buy is emitted first.
pub fn classify(tx: &RawTransaction) -> Vec<SwapLeg> {
    let Some(swap) = tx.swap_event() else {
        return Vec::new();
    };
    let block_time = tx.block_time_or_default();

    let legs = match (swap.native_input.as_ref(), swap.native_output.as_ref()) {
        (None, None) => Vec::new(),
        (Some(input), None) => vec![buy_leg(swap, input, block_time)],
        (None, Some(output)) => vec![sell_leg(swap, output, block_time)],
        (Some(input), Some(output)) => vec![
            buy_leg(swap, input, block_time),
            sell_leg(swap, output, block_time),
        ],
    };

    if !legs.is_empty() {
        trace!(
            "Classified {} swap leg(s) from transaction {}",
            legs.len(),
            tx.signature.as_deref().unwrap_or("<unsigned>")
        );
    }
    legs
}

fn buy_leg(swap: &SwapEvent, input: &NativeLeg, block_time: i64) -> SwapLeg {
    SwapLeg {
        direction: TradeDirection::Buy,
        mint: first_mint(&swap.token_outputs),
        amount_sol: input.amount_sol(),
        block_time,
    }
}

fn sell_leg(swap: &SwapEvent, output: &NativeLeg, block_time: i64) -> SwapLeg {
    SwapLeg {
        direction: TradeDirection::Sell,
        mint: first_mint(&swap.token_inputs),
        amount_sol: output.amount_sol(),
        block_time,
    }
}

fn first_mint(tokens: &[TokenLeg]) -> String {
    tokens
        .first()
        .and_then(|token| token.mint.as_deref())
        .unwrap_or(UNKNOWN_MINT)
        .to_string()
}
