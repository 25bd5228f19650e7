//! End-to-end tests of the classify, fold, summarize pipeline, driven from
//! wire-shaped JSON payloads the way a live analysis run would see them.

use serde_json::json;

use crate::ledger::aggregate;
use crate::stats::PortfolioStats;
use crate::transaction::{RawTransaction, UNKNOWN_MINT};

const TEST_FIAT_RATE: f64 = 200.0;

fn tx(payload: serde_json::Value) -> RawTransaction {
    serde_json::from_value(payload).expect("test payload should deserialize")
}

fn buy_tx(mint: &str, lamports: &str, block_time: i64) -> RawTransaction {
    tx(json!({
        "blockTime": block_time,
        "events": {"swap": {
            "nativeInput": {"account": "wallet", "amount": lamports},
            "tokenOutputs": [{"mint": mint}]
        }}
    }))
}

fn sell_tx(mint: &str, lamports: &str, block_time: i64) -> RawTransaction {
    tx(json!({
        "blockTime": block_time,
        "events": {"swap": {
            "nativeOutput": {"account": "wallet", "amount": lamports},
            "tokenInputs": [{"mint": mint}]
        }}
    }))
}

#[test]
fn single_buy_produces_expected_ledger_entry() {
    let ledger = aggregate(&[buy_tx("TOKA", "2000000000", 100)]);

    let entry = ledger.get("TOKA").expect("TOKA entry should exist");
    assert_eq!(entry.total_bought, 2.0);
    assert_eq!(entry.total_sold, 0.0);
    assert_eq!(entry.net_pnl, -2.0);
    assert_eq!(entry.earliest_trade, 100);
    assert_eq!(entry.latest_trade, 100);
}

#[test]
fn buy_then_sell_realizes_profit_and_roi() {
    let ledger = aggregate(&[
        buy_tx("TOKA", "2000000000", 100),
        sell_tx("TOKA", "3000000000", 200),
    ]);

    let entry = ledger.get("TOKA").expect("TOKA entry should exist");
    assert_eq!(entry.total_bought, 2.0);
    assert_eq!(entry.total_sold, 3.0);
    assert_eq!(entry.net_pnl, 1.0);
    assert_eq!(entry.earliest_trade, 100);
    assert_eq!(entry.latest_trade, 200);
    assert_eq!(entry.roi(), Some(50.0));
}

#[test]
fn mixed_wallet_produces_expected_headline_stats() {
    // WIN: bought 2, sold 3 -> +1 SOL, ROI +50.
    // LOSS: bought 2, never sold -> -2 SOL, ROI -100.
    let ledger = aggregate(&[
        buy_tx("WIN", "2000000000", 100),
        sell_tx("WIN", "3000000000", 200),
        buy_tx("LOSS", "2000000000", 300),
    ]);
    let stats = PortfolioStats::compute(&ledger, TEST_FIAT_RATE);

    assert_eq!(stats.total_tokens, 2);
    assert_eq!(stats.win_rate, 50.0);
    assert_eq!(stats.avg_roi, Some(-25.0));
    assert_eq!(stats.avg_buy_amount, Some(2.0));
    assert_eq!(stats.total_pnl, -1.0);
    assert_eq!(stats.total_pnl_fiat, -200.0);
}

#[test]
fn empty_sequence_analyzes_to_neutral_results() {
    // The fetch-failure contract reports an empty sequence, which must land
    // here rather than abort anything.
    let ledger = aggregate(&[]);
    let stats = PortfolioStats::compute(&ledger, TEST_FIAT_RATE);

    assert!(ledger.is_empty());
    assert!(ledger.ranked_by_latest_trade().is_empty());
    assert_eq!(stats.total_tokens, 0);
    assert_eq!(stats.win_rate, 0.0);
    assert_eq!(stats.avg_roi, None);
    assert_eq!(stats.total_pnl, 0.0);
}

#[test]
fn malformed_amount_mid_sequence_does_not_abort_the_run() {
    let ledger = aggregate(&[
        buy_tx("TOKA", "2000000000", 100),
        buy_tx("TOKB", "garbage", 150),
        sell_tx("TOKA", "3000000000", 200),
    ]);

    // The malformed leg degrades to a zero-amount trade but still opens the
    // entry and pins its time bounds.
    let broken = ledger.get("TOKB").expect("TOKB entry should exist");
    assert_eq!(broken.total_bought, 0.0);
    assert_eq!(broken.net_pnl, 0.0);
    assert_eq!(broken.earliest_trade, 150);
    assert_eq!(broken.latest_trade, 150);

    let good = ledger.get("TOKA").expect("TOKA entry should exist");
    assert_eq!(good.net_pnl, 1.0);
}

#[test]
fn ranking_orders_tokens_by_most_recent_trade() {
    let ledger = aggregate(&[
        buy_tx("OLD", "1000000000", 100),
        buy_tx("NEW", "1000000000", 300),
        buy_tx("MID", "1000000000", 200),
    ]);

    let mints: Vec<String> = ledger
        .ranked_by_latest_trade()
        .into_iter()
        .map(|(mint, _)| mint)
        .collect();
    assert_eq!(mints, vec!["NEW", "MID", "OLD"]);
}

#[test]
fn unattributed_legs_share_the_unknown_bucket() {
    let ledger = aggregate(&[
        tx(json!({
            "blockTime": 10,
            "events": {"swap": {"nativeInput": {"amount": "1000000000"}, "tokenOutputs": []}}
        })),
        tx(json!({
            "blockTime": 20,
            "events": {"swap": {"nativeInput": {"amount": "1000000000"}}}
        })),
    ]);

    assert_eq!(ledger.len(), 1);
    let bucket = ledger.get(UNKNOWN_MINT).expect("UNKNOWN bucket should exist");
    assert_eq!(bucket.total_bought, 2.0);
    assert_eq!(bucket.earliest_trade, 10);
    assert_eq!(bucket.latest_trade, 20);
}

#[test]
fn swap_with_both_native_legs_updates_two_tokens() {
    let ledger = aggregate(&[tx(json!({
        "blockTime": 40,
        "events": {"swap": {
            "nativeInput": {"amount": "1000000000"},
            "nativeOutput": {"amount": "2000000000"},
            "tokenInputs": [{"mint": "SOLD"}],
            "tokenOutputs": [{"mint": "BOUGHT"}]
        }}
    }))]);

    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.get("BOUGHT").map(|e| e.net_pnl), Some(-1.0));
    assert_eq!(ledger.get("SOLD").map(|e| e.net_pnl), Some(2.0));
}

#[test]
fn identical_input_produces_identical_results() {
    let history = || {
        vec![
            buy_tx("TOKA", "2000000000", 100),
            buy_tx("TOKB", "1000000000", 100),
            sell_tx("TOKA", "3000000000", 200),
            buy_tx("TOKC", "500000000", 200),
            tx(json!({
                "blockTime": 250,
                "events": {"swap": {"nativeInput": {"amount": "250000000"}}}
            })),
            sell_tx("TOKB", "400000000", 300),
        ]
    };

    let first = aggregate(&history());
    let second = aggregate(&history());
    assert_eq!(first, second);
    assert_eq!(
        first.ranked_by_latest_trade(),
        second.ranked_by_latest_trade()
    );
    assert_eq!(
        PortfolioStats::compute(&first, TEST_FIAT_RATE),
        PortfolioStats::compute(&second, TEST_FIAT_RATE)
    );
}
