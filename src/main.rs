//! ecom-synth - synthetic e-commerce data and SQL analytics verification.

use ecom_synth::cli::{Cli, Command, GenerateArgs, VerifyArgs};
use ecom_synth::config::Config;
use ecom_synth::error::Result;
use ecom_synth::query::{load_query_file, run_queries, ReportWriter};
use ecom_synth::{dataset, db, logging};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    logging::init(cli.log_file.as_deref());

    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    match &cli.command {
        Command::Generate(args) => generate(args, config),
        Command::Verify(args) => verify(args, config).await,
    }
}

fn generate(args: &GenerateArgs, config: Config) -> Result<()> {
    let mut generator = config.generator;
    args.apply_to(&mut generator);

    info!("Generating dataset with seed {}", generator.seed);
    let dataset = dataset::generate(&generator)?;
    info!("Generated {}", dataset.summary());

    let files = dataset::write_dataset(&dataset, &generator.output_dir)?;
    println!(
        "Data generation complete. {} CSV files saved to {}.",
        files.len(),
        generator.output_dir.display()
    );
    Ok(())
}

async fn verify(args: &VerifyArgs, config: Config) -> Result<()> {
    let mut runner = config.runner;
    args.apply_to(&mut runner);

    let content = load_query_file(&runner.queries)?;
    info!("Connecting to {}", runner.database.display());
    let client = db::connect(&runner.database).await?;

    let stdout = std::io::stdout();
    let mut writer = ReportWriter::new(stdout.lock(), args.format, runner.preview_rows);
    let outcome = run_queries(client.as_ref(), &content, &mut writer).await;
    client.close().await?;

    let summary = outcome?;
    if summary.failed > 0 {
        info!("{} of {} queries failed", summary.failed, summary.total);
    }
    Ok(())
}
