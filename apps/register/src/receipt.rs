//! # Receipt Rendering
//!
//! ```text
//! Nexus POS
//! ----------------------------------------
//! Date:     2026-10-18 09:12:44 UTC
//! Receipt:  0192f3c1-...
//! ----------------------------------------
//! 2x Espresso @ €2.50 = €5.00
//! ----------------------------------------
//! TOTAL: €5.00
//! Prev:  0000000000000000
//! Hash:  5d1e...
//! ```

use nexus_core::{Money, Transaction};

use crate::config::StoreConfig;
use crate::error::AppResult;

const RULE: &str = "----------------------------------------";

fn amount(symbol: &str, money: Money) -> String {
    if money.is_negative() {
        format!("-{}{}", symbol, Money::from_cents(-money.cents()))
    } else {
        format!("{}{}", symbol, money)
    }
}

/// Plain-text receipt for the console.
pub fn render_text(tx: &Transaction, store: &StoreConfig) -> String {
    let symbol = store.currency_symbol.as_str();
    let mut out = Vec::new();

    out.push(store.name.clone());
    out.push(RULE.to_string());
    out.push(format!(
        "Date:     {}",
        tx.timestamp().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push(format!("Receipt:  {}", tx.id()));
    out.push(RULE.to_string());

    for line in tx.lines() {
        out.push(format!(
            "{}x {} @ {} = {}",
            line.quantity,
            line.name,
            amount(symbol, line.unit_price),
            amount(symbol, line.total())
        ));
    }

    out.push(RULE.to_string());
    out.push(format!("TOTAL: {}", amount(symbol, tx.grand_total())));
    out.push(format!("Prev:  {}", tx.previous_receipt_hash()));
    out.push(format!("Hash:  {}", tx.current_receipt_hash()));

    out.join("\n")
}

/// Pretty JSON export. Re-importing it and calling
/// [`Transaction::verify_hash`] detects later edits.
pub fn render_json(tx: &Transaction) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(tx)?)
}
