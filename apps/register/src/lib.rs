//! # Nexus Register
//!
//! Command-line front end for `nexus-core`. Loads configuration, sets up
//! logging, rings up a sale and prints the receipt.
//!
//! ## Startup Sequence
//! 1. Parse command line
//! 2. Load config (defaults → TOML file → `NEXUS_*` environment)
//! 3. Initialize tracing (logging)
//! 4. Build catalog, inventory and history behind a [`Register`]
//! 5. Checkout, verify the receipt chain, print the receipt
//!
//! ## Usage
//! ```bash
//! nexus-register
//! nexus-register --config ./register.toml --json
//! RUST_LOG=trace nexus-register
//! ```

pub mod config;
pub mod error;
pub mod receipt;

use std::path::PathBuf;

use nexus_core::{
    Cart, Inventory, Money, Product, ProductCatalog, Register, Transaction, TransactionHistory,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::RegisterConfig;
use crate::error::{AppError, AppResult};

pub const USAGE: &str = "\
Nexus POS Register

Usage: nexus-register [OPTIONS]

Options:
  -c, --config <PATH>  Config file (default: platform config dir, register.toml)
      --json           Print the receipt as JSON
  -h, --help           Show this help message";

// =============================================================================
// Command Line
// =============================================================================

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub json: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parses `args` as given by `std::env::args()`, program name first.
    pub fn parse(args: &[String]) -> AppResult<Self> {
        let mut parsed = CliArgs::default();
        let mut i = 1;

        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    let path = args.get(i + 1).ok_or_else(|| {
                        AppError::Usage(format!("{} requires a path\n\n{}", args[i], USAGE))
                    })?;
                    parsed.config = Some(PathBuf::from(path));
                    i += 1;
                }
                "--json" => parsed.json = true,
                "--help" | "-h" => parsed.help = true,
                other => {
                    return Err(AppError::Usage(format!(
                        "unknown argument: {}\n\n{}",
                        other, USAGE
                    )));
                }
            }
            i += 1;
        }

        Ok(parsed)
    }
}

// =============================================================================
// Logging
// =============================================================================

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` wins over `filter`. Output goes to stderr so stdout carries
/// only the receipt.
pub fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// =============================================================================
// Demo Sale
// =============================================================================

/// Result of [`ring_up_demo_sale`].
#[derive(Debug, Clone)]
pub struct DemoOutcome {
    pub transaction: Transaction,
    pub remaining_stock: i64,
}

/// Stocks one espresso line (100 units at 2.50), sells two, and checks that
/// the history chain still verifies.
pub fn ring_up_demo_sale(config: &RegisterConfig) -> AppResult<DemoOutcome> {
    let espresso = Product::new("KAF-01", "Espresso", Money::from_major_minor(2, 50), 1);

    let mut catalog = ProductCatalog::new();
    catalog.add_product(espresso.clone())?;

    let mut inventory = Inventory::new();
    inventory.set_stock(espresso.id, 100);

    let register = Register::new(
        catalog,
        inventory,
        TransactionHistory::with_seed(config.receipt.seed_hash.clone()),
    );

    let mut cart = Cart::new();
    cart.set_item_quantity(espresso.id, 2);

    let transaction = register.checkout(&cart)?;

    let remaining_stock = register.with_state(|state| -> AppResult<i64> {
        state.history.verify_chain()?;
        Ok(state.inventory.stock(espresso.id)?)
    })?;

    info!(
        transaction_id = %transaction.id(),
        total = %transaction.grand_total(),
        remaining_stock,
        "Demo sale complete"
    );

    Ok(DemoOutcome {
        transaction,
        remaining_stock,
    })
}

// =============================================================================
// Entry Point
// =============================================================================

/// Runs the register with the given command line.
pub fn run(args: &[String]) -> AppResult<()> {
    let cli = CliArgs::parse(args)?;
    if cli.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = RegisterConfig::load(cli.config)?;
    init_tracing(&config.logging.filter);
    info!(store = %config.store.name, "Register starting");

    let outcome = ring_up_demo_sale(&config)?;

    if cli.json {
        println!("{}", receipt::render_json(&outcome.transaction)?);
    } else {
        println!("{}", receipt::render_text(&outcome.transaction, &config.store));
        println!("Remaining stock: {}", outcome.remaining_stock);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(rest: &[&str]) -> Vec<String> {
        std::iter::once("nexus-register")
            .chain(rest.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(CliArgs::parse(&argv(&[])).unwrap(), CliArgs::default());
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = CliArgs::parse(&argv(&["--json", "-c", "store.toml"])).unwrap();
        assert!(cli.json);
        assert!(!cli.help);
        assert_eq!(cli.config, Some(PathBuf::from("store.toml")));

        assert!(CliArgs::parse(&argv(&["-h"])).unwrap().help);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            CliArgs::parse(&argv(&["--config"])),
            Err(AppError::Usage(_))
        ));
        assert!(matches!(
            CliArgs::parse(&argv(&["--verbose"])),
            Err(AppError::Usage(_))
        ));
    }

    #[test]
    fn test_demo_sale() {
        let outcome = ring_up_demo_sale(&RegisterConfig::default()).unwrap();
        let tx = &outcome.transaction;

        assert_eq!(tx.lines().len(), 1);
        assert_eq!(tx.lines()[0].sku, "KAF-01");
        assert_eq!(tx.grand_total(), Money::from_cents(500));
        assert_eq!(tx.previous_receipt_hash(), "0000000000000000");
        assert_eq!(outcome.remaining_stock, 98);
    }

    #[test]
    fn test_demo_sale_chains_onto_configured_seed() {
        let mut config = RegisterConfig::default();
        config.receipt.seed_hash = "abcdef".to_string();

        let outcome = ring_up_demo_sale(&config).unwrap();
        assert_eq!(outcome.transaction.previous_receipt_hash(), "abcdef");
        assert!(outcome.transaction.verify_hash().is_ok());
    }

    #[test]
    fn test_help_short_circuits() {
        assert!(run(&argv(&["--help"])).is_ok());
    }
}
