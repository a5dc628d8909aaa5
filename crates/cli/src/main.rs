//! Cartkeeper CLI - Browse the catalog and manage the shopping cart.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog with "in cart" quantities
//! cartkeeper catalog
//!
//! # Show the cart
//! cartkeeper cart show
//!
//! # Add one unit of product 1
//! cartkeeper cart add 1
//!
//! # Set product 1's quantity to 3
//! cartkeeper cart update 1 3
//!
//! # Remove product 1
//! cartkeeper cart remove 1
//! ```
//!
//! # Environment Variables
//!
//! See `cartkeeper_cart::config` for service and storage settings.
//! - `RUST_LOG` - Log filter (default: `cartkeeper_cart=info,cartkeeper_cli=info`)
//! - `CARTKEEPER_LOG_FORMAT` - `json` for structured logs and notices, text otherwise

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use cartkeeper_cart::{
    CartConfig, CartStore, FileStorage, HttpInventoryGateway, Notifier, TracingNotifier,
};
use cartkeeper_core::ProductId;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::{CliError, Outcome};
use output::TerminalNotifier;

#[derive(Parser)]
#[command(name = "cartkeeper")]
#[command(author, version, about = "Cartkeeper catalog browser and cart manager")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products with their quantity in the cart
    Catalog,
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and subtotal
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        product_id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: ProductId,
    },
    /// Set the quantity of a product already in the cart
    Update {
        /// Product ID
        product_id: ProductId,

        /// New quantity (zero or less is ignored; use `remove` instead)
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

/// Whether logs (and notices) should be emitted as JSON.
fn json_logging() -> bool {
    std::env::var("CARTKEEPER_LOG_FORMAT").is_ok_and(|format| format == "json")
}

/// Initialize tracing. Logs go to stderr so stdout stays clean for output.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cartkeeper_cart=info,cartkeeper_cli=info".into());

    let use_json = json_logging();
    let json_layer = use_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!use_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        // On rejection the notifier has already told the user what went wrong
        Ok(outcome) => ExitCode::from(outcome.exit_status()),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<Outcome, CliError> {
    let config = CartConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    let gateway = HttpInventoryGateway::new(&config)?;
    let storage = FileStorage::new(&config.storage_dir);
    // In JSON mode notices become structured log events instead of plain text
    let notifier: Box<dyn Notifier> = if json_logging() {
        Box::new(TracingNotifier)
    } else {
        Box::new(TerminalNotifier)
    };
    let store = CartStore::open(gateway, storage, notifier);

    match cli.command {
        Commands::Catalog => commands::catalog::list(&store).await,
        Commands::Cart { action } => match action {
            CartAction::Show => Ok(commands::cart::show(&store).await),
            CartAction::Add { product_id } => Ok(commands::cart::add(&store, product_id).await),
            CartAction::Remove { product_id } => {
                Ok(commands::cart::remove(&store, product_id).await)
            }
            CartAction::Update { product_id, amount } => {
                Ok(commands::cart::update(&store, product_id, amount).await)
            }
        },
    }
}
