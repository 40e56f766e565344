//! End-to-end tests of the `ecom-synth` binary.

use super::common::{bundled_queries_path, load_into_sqlite, small_config};
use ecom_synth::dataset::generate;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// Runs the binary with the given arguments and returns (exit code, stdout, stderr).
///
/// `HOME` and `XDG_CONFIG_HOME` point into `home` so a developer's own config
/// file is never picked up.
fn run(home: &Path, args: &[&str]) -> (i32, String, String) {
    run_with_env(home, args, &[])
}

/// Like [`run`], with the given `ECOM_SYNTH_*` variables set.
fn run_with_env(home: &Path, args: &[&str], envs: &[(&str, &Path)]) -> (i32, String, String) {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ecom-synth"));
    command
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env_remove("ECOM_SYNTH_DATABASE")
        .env_remove("ECOM_SYNTH_QUERIES");
    for (key, value) in envs {
        command.env(key, value);
    }
    let output = command.output().expect("Failed to execute ecom-synth");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (exit_code, stdout, stderr)
}

#[test]
fn test_generate_writes_csv_files() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("data");
    let out_str = out.to_str().unwrap();

    let (code, stdout, stderr) = run(
        dir.path(),
        &[
            "generate",
            "--customers",
            "20",
            "--products",
            "5",
            "--orders",
            "30",
            "--reviews",
            "10",
            "-o",
            out_str,
        ],
    );

    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("Data generation complete"));
    for file in [
        "customers.csv",
        "products.csv",
        "orders.csv",
        "order_items.csv",
        "reviews.csv",
    ] {
        assert!(out.join(file).is_file(), "{file} was not written");
    }

    let customers = std::fs::read_to_string(out.join("customers.csv")).unwrap();
    assert_eq!(customers.lines().count(), 21);
}

#[test]
fn test_generate_reads_config_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("from-config");
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "[generator]\ncustomers = 3\nproducts = 2\norders = 4\nreviews = 1\noutput_dir = {:?}\n",
            out.to_str().unwrap()
        ),
    )
    .unwrap();

    let (code, _, stderr) = run(
        dir.path(),
        &["--config", config_path.to_str().unwrap(), "generate"],
    );

    assert_eq!(code, 0, "stderr: {stderr}");
    let orders = std::fs::read_to_string(out.join("orders.csv")).unwrap();
    assert_eq!(orders.lines().count(), 5);
}

#[test]
fn test_generate_rejects_orders_without_customers() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("data");

    let (code, _, stderr) = run(
        dir.path(),
        &["generate", "--customers", "0", "-o", out.to_str().unwrap()],
    );

    assert_eq!(code, 1);
    assert!(stderr.contains("Generation"), "stderr: {stderr}");
}

#[tokio::test]
async fn test_verify_prints_every_bundled_query() {
    let dir = tempdir().unwrap();
    let dataset = generate(&small_config(42)).unwrap();
    let db_path = load_into_sqlite(&dataset, dir.path()).await;
    let queries = bundled_queries_path();

    let (code, stdout, stderr) = run(
        dir.path(),
        &[
            "verify",
            "-d",
            db_path.to_str().unwrap(),
            "-q",
            queries.to_str().unwrap(),
            "-n",
            "3",
        ],
    );

    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(stdout.matches("--- Running Query: ").count(), 6);
    assert!(stdout.contains("6 queries: 6 succeeded, 0 failed"));
}

#[test]
fn test_verify_missing_database_fails() {
    let dir = tempdir().unwrap();
    let queries = bundled_queries_path();
    let missing = dir.path().join("missing.db");

    let (code, stdout, stderr) = run(
        dir.path(),
        &[
            "verify",
            "-d",
            missing.to_str().unwrap(),
            "-q",
            queries.to_str().unwrap(),
        ],
    );

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Connection"), "stderr: {stderr}");
    assert!(!missing.exists());
}

#[test]
fn test_verify_missing_query_file_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.sql");

    let (code, _, stderr) = run(
        dir.path(),
        &["verify", "-q", missing.to_str().unwrap()],
    );

    assert_eq!(code, 1);
    assert!(stderr.contains("nope.sql"), "stderr: {stderr}");
}

/// Writes a config file whose `[runner]` section names `database` and `queries`.
fn write_runner_config(dir: &Path, database: &Path, queries: &Path) -> std::path::PathBuf {
    let path = dir.join("runner.toml");
    std::fs::write(
        &path,
        format!(
            "[runner]\ndatabase = {:?}\nqueries = {:?}\n",
            database.to_str().unwrap(),
            queries.to_str().unwrap()
        ),
    )
    .unwrap();
    path
}

#[tokio::test]
async fn test_verify_env_database_beats_config_file() {
    let dir = tempdir().unwrap();
    let dataset = generate(&small_config(42)).unwrap();
    let db_path = load_into_sqlite(&dataset, dir.path()).await;
    let config_db = dir.path().join("from-config.db");
    let config = write_runner_config(dir.path(), &config_db, &bundled_queries_path());
    let config_arg = config.to_str().unwrap();

    // The config file alone points at a database that does not exist.
    let (code, _, stderr) = run(dir.path(), &["--config", config_arg, "verify"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("from-config.db"), "stderr: {stderr}");

    // The environment variable wins over the config file.
    let (code, stdout, stderr) = run_with_env(
        dir.path(),
        &["--config", config_arg, "verify"],
        &[("ECOM_SYNTH_DATABASE", db_path.as_path())],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(stdout.matches("--- Running Query: ").count(), 6);
}

#[tokio::test]
async fn test_verify_flag_beats_env_database() {
    let dir = tempdir().unwrap();
    let dataset = generate(&small_config(42)).unwrap();
    let db_path = load_into_sqlite(&dataset, dir.path()).await;
    let queries = bundled_queries_path();
    let flag_db = dir.path().join("from-flag.db");

    let (code, stdout, stderr) = run_with_env(
        dir.path(),
        &[
            "verify",
            "-d",
            flag_db.to_str().unwrap(),
            "-q",
            queries.to_str().unwrap(),
        ],
        &[("ECOM_SYNTH_DATABASE", db_path.as_path())],
    );

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("from-flag.db"), "stderr: {stderr}");
}

#[tokio::test]
async fn test_verify_env_queries_beats_config_file() {
    let dir = tempdir().unwrap();
    let dataset = generate(&small_config(42)).unwrap();
    let db_path = load_into_sqlite(&dataset, dir.path()).await;
    let env_queries = dir.path().join("env.sql");
    std::fs::write(&env_queries, "-- 1. Env Only\nSELECT COUNT(*) FROM orders;\n").unwrap();
    let config = write_runner_config(dir.path(), &db_path, &bundled_queries_path());

    let (code, stdout, stderr) = run_with_env(
        dir.path(),
        &["--config", config.to_str().unwrap(), "verify"],
        &[("ECOM_SYNTH_QUERIES", env_queries.as_path())],
    );

    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("--- Running Query: Env Only ---"));
    assert_eq!(stdout.matches("--- Running Query: ").count(), 1);
}
