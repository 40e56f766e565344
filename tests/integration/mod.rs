//! Integration tests for ecom-synth.

pub mod cli_test;
pub mod generate_test;
