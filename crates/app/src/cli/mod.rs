use bloom_app::config::AppConfig;
use clap::{Parser, Subcommand};

mod quote;
mod status;

#[derive(Debug, Parser)]
#[command(name = "bloom-app", about = "Bloom storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Price an order line: bulk discount, delivery and payment status
    Quote(quote::QuoteArgs),

    /// Print the status that follows the given one
    NextStatus(status::NextStatusArgs),
}

impl Cli {
    /// Parse arguments after loading `.env`, if present.
    pub(crate) fn load() -> Self {
        _ = dotenvy::dotenv();

        Self::parse()
    }

    pub(crate) fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Quote(args) => quote::run(&self.config, &args),
            Commands::NextStatus(args) => status::run(&args),
        }
    }
}
