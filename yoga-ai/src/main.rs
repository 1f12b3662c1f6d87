//! yoga-ai - AI enhancement of the Bali yoga business dataset
//!
//! Scores every business for completeness, asks the generative service to
//! fill in what is missing for the incomplete ones, and writes a new
//! timestamped snapshot. The input file is never modified.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yoga_ai::config::{
    load_env_files, log_filter, resolve_api_key, resolve_batch_config, resolve_service_config,
    CliOverrides,
};
use yoga_ai::models::RunPhase;
use yoga_ai::services::{
    analyze_dataset, default_input_path, default_output_path, AutoConfirm, BatchController,
    Confirmation, EnhancementClient, OpenAiChatService, StdinConfirmation,
};
use yoga_common::config::{load_toml_config, resolve_config_path};

/// Command-line arguments for yoga-ai
#[derive(Parser, Debug)]
#[command(name = "yoga-ai")]
#[command(about = "Enhance Bali yoga business data using AI")]
#[command(version)]
struct Args {
    /// Path to input JSON file [default: yoga_businesses_enriched_full.json]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to output JSON file [default: yoga_businesses_enhanced_<timestamp>.json]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum cost in USD [default: 30.0]
    #[arg(short = 'c', long)]
    max_cost: Option<f64>,

    /// Businesses per batch [default: 50]
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Only analyze data, don't enhance
    #[arg(short, long)]
    analyze_only: bool,

    /// Completeness score below which a business is enhanced [default: 70]
    #[arg(short, long)]
    threshold: Option<u8>,

    /// Model name [default: gpt-4o-mini]
    #[arg(long)]
    model: Option<String>,

    /// Pause between requests in milliseconds [default: 500]
    #[arg(long)]
    request_pause_ms: Option<u64>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            max_cost: self.max_cost,
            batch_size: self.batch_size,
            threshold: self.threshold,
            request_pause_ms: self.request_pause_ms,
            model: self.model.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    load_env_files();
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref());
    let toml_config =
        load_toml_config(config_path.as_deref()).context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter(&toml_config).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting {}", yoga_ai::build_info());
    if let Some(path) = &config_path {
        info!("Config file: {}", path.display());
    }

    let overrides = args.overrides();
    let batch_config =
        resolve_batch_config(&overrides, &toml_config).context("Invalid run settings")?;
    let input = args.input.clone().unwrap_or_else(default_input_path);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(Local::now()));

    if args.analyze_only {
        let mut analysis =
            analyze_dataset(&input, &batch_config).context("Failed to load dataset")?;
        analysis.session.transition_to(RunPhase::AnalyzedOnly);
        return Ok(());
    }

    let api_key = resolve_api_key(&toml_config)?;
    let service_config = resolve_service_config(api_key, &overrides, &toml_config);
    info!(model = %service_config.model, base_url = %service_config.base_url, "Generative service");
    let service = OpenAiChatService::new(service_config)
        .context("Failed to initialize generative service client")?;

    let confirmation: Box<dyn Confirmation> = if args.yes {
        Box::new(AutoConfirm)
    } else {
        Box::new(StdinConfirmation)
    };

    let controller = BatchController::new(
        EnhancementClient::new(Arc::new(service)),
        confirmation,
        batch_config,
    );

    let outcome = controller
        .run(&input, &output)
        .await
        .context("Enhancement run failed")?;

    match outcome.session.phase {
        RunPhase::NothingToDo => {
            println!("All businesses have sufficient data quality. No enhancement needed!");
            return Ok(());
        }
        RunPhase::Cancelled => {
            println!("Enhancement cancelled by user.");
            return Ok(());
        }
        _ => {}
    }

    if let Some(path) = &outcome.output_path {
        println!("Enhanced data saved to {}", path.display());
    }

    println!("Enhancement statistics:");
    for line in outcome.stats.display_lines() {
        println!("   {}", line);
    }
    println!("Total cost: ${:.2}", outcome.cost_usd);

    if let Some(e) = outcome.write_failure {
        return Err(e).context("Failed to save output");
    }

    Ok(())
}
