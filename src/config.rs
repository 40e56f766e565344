//! Configuration management for ecom-synth.
//!
//! Handles loading configuration from a TOML file. Every field is optional;
//! the defaults reproduce the stock dataset and the stock verification run.

use crate::error::{SynthError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Highest accepted product price. Keeps every order total within i64 cents.
pub const MAX_PRICE: f64 = 1_000_000_000.0;

/// Highest accepted row count for any generated table.
pub const MAX_ROWS: usize = 10_000_000;

/// Main configuration structure for ecom-synth.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Dataset generation settings.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Query runner settings.
    #[serde(default)]
    pub runner: RunnerConfig,
}

/// Settings for the dataset synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed for the random generator. The same seed always yields the same files.
    pub seed: u64,

    /// Number of customers to generate.
    pub customers: usize,

    /// Number of products to generate.
    pub products: usize,

    /// Number of orders to generate.
    pub orders: usize,

    /// Number of reviews to generate.
    pub reviews: usize,

    /// First possible signup date.
    pub start_date: NaiveDate,

    /// Last possible order date.
    pub end_date: NaiveDate,

    /// Signup dates fall within this many days after `start_date`.
    pub signup_window_days: u32,

    /// Lowest product price.
    pub price_min: f64,

    /// Highest product price.
    pub price_max: f64,

    /// Directory the CSV files are written to.
    pub output_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            customers: 500,
            products: 50,
            orders: 2000,
            reviews: 999,
            start_date: default_start_date(),
            end_date: default_end_date(),
            signup_window_days: 365,
            price_min: 10.0,
            price_max: 500.0,
            output_dir: PathBuf::from("."),
        }
    }
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn default_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 31).unwrap_or(NaiveDate::MIN)
}

impl GeneratorConfig {
    /// Checks that the configuration can produce a consistent dataset.
    ///
    /// Orders need customers and products to reference, and reviews need at
    /// least one order item.
    pub fn validate(&self) -> Result<()> {
        for (table, count) in [
            ("customers", self.customers),
            ("products", self.products),
            ("orders", self.orders),
            ("reviews", self.reviews),
        ] {
            if count > MAX_ROWS {
                return Err(SynthError::generation(format!(
                    "{count} {table} requested, at most {MAX_ROWS} are supported"
                )));
            }
        }
        if self.orders > 0 && self.customers == 0 {
            return Err(SynthError::generation(
                "cannot place orders without customers",
            ));
        }
        if self.orders > 0 && self.products == 0 {
            return Err(SynthError::generation("cannot place orders without products"));
        }
        if self.reviews > 0 && self.orders == 0 {
            return Err(SynthError::generation("cannot write reviews without orders"));
        }
        if !self.price_min.is_finite() || !self.price_max.is_finite() {
            return Err(SynthError::generation("price range must be finite"));
        }
        if self.price_min < 0.0 || self.price_min > self.price_max {
            return Err(SynthError::generation(format!(
                "invalid price range {:.2}..{:.2}",
                self.price_min, self.price_max
            )));
        }
        if self.price_max > MAX_PRICE {
            return Err(SynthError::generation(format!(
                "price_max {:.2} exceeds the supported maximum {MAX_PRICE:.2}",
                self.price_max
            )));
        }
        Ok(())
    }
}

/// Settings for the query runner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunnerConfig {
    /// SQLite database file the queries run against.
    pub database: PathBuf,

    /// Query file with numbered blocks.
    pub queries: PathBuf,

    /// Number of rows printed per result.
    pub preview_rows: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("ecommerce.db"),
            queries: PathBuf::from("analytics_queries.sql"),
            preview_rows: 10,
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ecom-synth")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file is not an error and yields the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| SynthError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            SynthError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
