//! Minishop CLI - Database migrations and catalog management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! minishop-cli migrate
//!
//! # Seed the catalog with sample products
//! minishop-cli seed
//!
//! # Add a single product
//! minishop-cli product add -n "Enamel Mug" -d "A sturdy mug." -p 12.50 -i mug.png
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "minishop-cli")]
#[command(author, version, about = "Minishop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the catalog with sample products
    Seed,
    /// Manage the product catalog
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Add a product to the catalog
    Add {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Product description
        #[arg(short, long)]
        description: String,

        /// Price, e.g. 12.50
        #[arg(short, long)]
        price: String,

        /// Image filename under the product image directory
        #[arg(short, long)]
        image: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Product { action } => match action {
            ProductAction::Add {
                name,
                description,
                price,
                image,
            } => {
                commands::product::add(&name, &description, &price, image.as_deref()).await?;
            }
        },
    }
    Ok(())
}
