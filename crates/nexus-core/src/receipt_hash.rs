//! # Receipt Hash
//!
//! SHA-256 digest that links each receipt to the one before it.
//!
//! ## What Goes Into The Digest
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "nexus-receipt-v1"                                                     │
//! │  previous_receipt_hash        ◄── the chain link                        │
//! │  transaction id               ◄── v7 UUID, textual form                 │
//! │  timestamp                    ◄── RFC 3339, nanoseconds, UTC            │
//! │  line count                                                             │
//! │  for each line:                                                         │
//! │     product id, sku, name, unit price (cents), tax category, quantity   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every field is written as a little-endian u64 byte length followed by its
//! UTF-8 bytes, so `"ab" + "c"` and `"a" + "bc"` never collide.

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::transaction::SaleLine;

/// Domain label mixed into every receipt digest.
pub const RECEIPT_HASH_LABEL: &str = "nexus-receipt-v1";

/// Lowercase hex SHA-256 of arbitrary bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

struct FieldHasher(Sha256);

impl FieldHasher {
    fn new() -> Self {
        FieldHasher(Sha256::new())
    }

    fn field(&mut self, value: &str) {
        self.0.update((value.len() as u64).to_le_bytes());
        self.0.update(value.as_bytes());
    }

    fn finish(self) -> String {
        hex::encode(self.0.finalize())
    }
}

/// Computes the chained digest of a receipt.
pub fn receipt_hash(
    previous_hash: &str,
    id: Uuid,
    timestamp: &DateTime<Utc>,
    lines: &[SaleLine],
) -> String {
    let mut hasher = FieldHasher::new();
    hasher.field(RECEIPT_HASH_LABEL);
    hasher.field(previous_hash);
    hasher.field(&id.to_string());
    hasher.field(&timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true));
    hasher.field(&lines.len().to_string());

    for line in lines {
        hasher.field(&line.product_id.to_string());
        hasher.field(&line.sku);
        hasher.field(&line.name);
        hasher.field(&line.unit_price.cents().to_string());
        hasher.field(&line.tax_category_id.to_string());
        hasher.field(&line.quantity.to_string());
    }

    hasher.finish()
}
