use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "vantage-intake")]
#[command(about = "Client intake submissions and order dashboard for portfolio projects")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "vantage.toml")]
    pub config: PathBuf,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Replay an intake file through the form, validate it and submit the order
    Submit {
        /// Path to the intake TOML file
        intake: PathBuf,

        /// Validate and report without uploading or writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// List submitted orders, newest first
    Orders {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Oldest first instead
        #[arg(long)]
        ascending: bool,
    },

    /// Show price plans, features and portfolio sections with their tiers
    Catalog,

    /// Print the UPI payment QR URL for a plan (amount, label or tier)
    PaymentQr { plan: String },
}

impl Command {
    /// Whether the command reaches a store or reads the `[payment]` section.
    /// Catalog listing and dry runs work without a configuration file.
    pub fn needs_config(&self) -> bool {
        !matches!(
            self,
            Command::Catalog | Command::Submit { dry_run: true, .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}
