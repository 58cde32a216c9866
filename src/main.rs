//! patchviz - charts and summary reports for patch results
//!
//! Loads a JSON document mapping issue identifiers to patch candidates,
//! renders one chart per aggregate and writes a markdown summary.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any error (missing input, malformed JSON, empty results, I/O)

mod analysis;
mod chart;
mod cli;
mod config;
mod error;
mod loader;
mod models;
mod pipeline;
mod report;

use anyhow::{Context, Result};
use cli::Args;
use config::{Config, CONFIG_FILE};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    init_logging(&args);

    info!("patchviz v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("Run failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .patchviz.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE);

    if path.exists() {
        anyhow::bail!("{} already exists. Remove it first or edit it manually.", CONFIG_FILE);
    }

    std::fs::write(path, Config::default_toml())
        .with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load config, run the pipeline and print a summary.
fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();

    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate()?;

    let results_path = args.results_path().to_path_buf();
    let out_dir = config
        .general
        .output_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| cli::default_output_dir(&results_path));

    if !args.quiet {
        println!("📥 Loading results: {}", results_path.display());
    }

    let outcome = pipeline::run(&results_path, &out_dir, &config, !args.quiet)?;

    if args.quiet {
        return Ok(());
    }

    let summary = &outcome.summary;
    println!("\n📊 Results Summary:");
    println!("   Issues: {}", summary.issue_count);
    println!("   Patches: {}", summary.patch_count);
    if let Some(stats) = summary.score_stats {
        println!(
            "   Relevance: mean {:.3} | median {:.3} | min {:.3} | max {:.3}",
            stats.mean, stats.median, stats.min, stats.max
        );
    }
    println!(
        "   Class methods: {} | Standalone functions: {}",
        summary.function_kinds.class_methods, summary.function_kinds.standalone
    );
    println!("   Charts written: {}", outcome.charts.len());
    for path in &outcome.reports {
        println!("   Report: {}", path.display());
    }
    println!(
        "\n✅ Done in {:.2}s. Output saved to: {}",
        start_time.elapsed().as_secs_f64(),
        out_dir.display()
    );

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
