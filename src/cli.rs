//! Command-line argument parsing for ecom-synth.
//!
//! Flags override values from the config file, which override the built-in
//! defaults.

use crate::config::{GeneratorConfig, RunnerConfig};
use crate::query::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Synthetic e-commerce dataset generator and SQL analytics query runner.
#[derive(Parser, Debug)]
#[command(name = "ecom-synth")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the dataset and write it as CSV files
    Generate(GenerateArgs),

    /// Run the numbered queries of a SQL file against a SQLite database
    Verify(VerifyArgs),
}

/// Options of `generate`.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Random seed
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Number of customers
    #[arg(long, value_name = "N")]
    pub customers: Option<usize>,

    /// Number of products
    #[arg(long, value_name = "N")]
    pub products: Option<usize>,

    /// Number of orders
    #[arg(long, value_name = "N")]
    pub orders: Option<usize>,

    /// Number of reviews
    #[arg(long, value_name = "N")]
    pub reviews: Option<usize>,

    /// Directory the CSV files are written to
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

impl GenerateArgs {
    /// Applies the flags that were given on top of `config`.
    pub fn apply_to(&self, config: &mut GeneratorConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(customers) = self.customers {
            config.customers = customers;
        }
        if let Some(products) = self.products {
            config.products = products;
        }
        if let Some(orders) = self.orders {
            config.orders = orders;
        }
        if let Some(reviews) = self.reviews {
            config.reviews = reviews;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
    }
}

/// Options of `verify`.
#[derive(Args, Debug, Default)]
pub struct VerifyArgs {
    /// SQLite database file
    #[arg(short = 'd', long, env = "ECOM_SYNTH_DATABASE", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Query file with numbered blocks
    #[arg(short = 'q', long, env = "ECOM_SYNTH_QUERIES", value_name = "PATH")]
    pub queries: Option<PathBuf>,

    /// Rows shown per result
    #[arg(short = 'n', long, value_name = "N")]
    pub limit: Option<usize>,

    /// Output format: text or json
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: OutputFormat,
}

impl VerifyArgs {
    /// Applies the flags that were given on top of `config`.
    pub fn apply_to(&self, config: &mut RunnerConfig) {
        if let Some(database) = &self.database {
            config.database = database.clone();
        }
        if let Some(queries) = &self.queries {
            config.queries = queries.clone();
        }
        if let Some(limit) = self.limit {
            config.preview_rows = limit;
        }
    }
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }
}
