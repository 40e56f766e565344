//! ecom-synth - synthetic e-commerce data and SQL analytics verification.
//!
//! This library exposes the core modules for use in integration tests.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod db;
pub mod error;
pub mod logging;
pub mod query;
