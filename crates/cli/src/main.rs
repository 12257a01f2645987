//! rabbit-cart CLI - Browse the catalog and manage the local cart.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog (needs RABBIT_CART_CATALOG_PATH)
//! rc-cli catalog
//!
//! # Add a product, then bump and trim quantities
//! rc-cli add 3f2a9c
//! rc-cli inc 3f2a9c
//! rc-cli set 3f2a9c 5
//! rc-cli dec 3f2a9c
//!
//! # Show or empty the cart
//! rc-cli show
//! rc-cli clear
//! ```
//!
//! # Commands
//!
//! - `catalog` - List catalog products
//! - `show` - Show the cart with totals
//! - `add`, `remove`, `set`, `inc`, `dec`, `clear` - Cart mutations
//!
//! Configuration comes from the environment; see
//! `rabbit_cart_storefront::config`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rabbit_cart_core::ProductId;
use rabbit_cart_storefront::config::StorefrontConfig;
use rabbit_cart_storefront::error::{AppError, Result};
use rabbit_cart_storefront::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "rc-cli")]
#[command(author, version, about = "rabbit-cart cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Catalog,
    /// Show the cart
    Show,
    /// Add one unit of a catalog product
    Add {
        /// Product ID
        product_id: String,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: String,
    },
    /// Set the quantity of a cart line (zero or less removes it)
    Set {
        /// Product ID
        product_id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Increase a cart line by one
    Inc {
        /// Product ID
        product_id: String,
    },
    /// Decrease a cart line by one
    Dec {
        /// Product ID
        product_id: String,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rabbit_cart_cli=info,rabbit_cart_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().without_time().with_target(false))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        if e.mutation_applied() {
            // The cart changed; only the saved copy is behind.
            tracing::warn!("Cart updated but not saved: {e}");
        } else {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = StorefrontConfig::from_env()?;
    let state = AppState::from_config(config).await?;

    let outcome = match cli.command {
        Commands::Catalog => return commands::catalog::list(&state),
        Commands::Show => {
            commands::cart::show(&state).await;
            return Ok(());
        }
        Commands::Add { product_id } => state.add_product(&ProductId::new(product_id)).await,
        Commands::Remove { product_id } => state
            .cart()
            .await
            .remove_item(&ProductId::new(product_id))
            .map_err(AppError::from),
        Commands::Set {
            product_id,
            quantity,
        } => state
            .cart()
            .await
            .update_quantity(&ProductId::new(product_id), quantity)
            .map_err(AppError::from),
        Commands::Inc { product_id } => state
            .cart()
            .await
            .increment(&ProductId::new(product_id))
            .map_err(AppError::from),
        Commands::Dec { product_id } => state
            .cart()
            .await
            .decrement(&ProductId::new(product_id))
            .map_err(AppError::from),
        Commands::Clear => state.cart().await.clear_cart().map_err(AppError::from),
    };

    commands::cart::show_after(&state, outcome).await
}
