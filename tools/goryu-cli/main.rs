use clap::Parser;
use goryu::prelude::*;
use log::{LevelFilter, debug, info};
use std::fs;
use std::str::FromStr;
use std::time::Instant;

/// Merge a generator proposal into a class diagram
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the generator response JSON file
    proposal_path: String,

    /// Path to the current diagram state JSON file (starts empty if omitted)
    #[arg(short, long)]
    state: Option<String>,

    /// Where to write the merged state (prints to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    config: Option<String>,

    /// Print the run statistics as JSON instead of a summary
    #[arg(long)]
    stats_json: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", cli.log_level);
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
    debug!(cli:?; "Parsed arguments");

    let total_start = Instant::now();
    let pipeline = build_pipeline(cli.config.as_deref());
    let current = load_state(cli.state.as_deref());
    let raw = fs::read_to_string(&cli.proposal_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read proposal file '{}': {}",
            cli.proposal_path, e
        ))
    });

    let (state, stats) = match pipeline.process_json(&current, &raw) {
        ProcessingOutcome::Done { state, stats } => (state, stats),
        ProcessingOutcome::Rejected(rejection) => {
            eprintln!("\nProposal rejected ({:?}):", rejection.class);
            for error in &rejection.errors {
                eprintln!("  -> {}", error);
            }
            if rejection.is_recoverable() {
                eprintln!("The generator can be asked again.");
                std::process::exit(2);
            }
            std::process::exit(1);
        }
    };

    let rendered = state
        .to_json_pretty()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize state: {}", e)));
    match &cli.output {
        Some(path) => fs::write(path, rendered).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to write output file '{}': {}", path, e))
        }),
        None => println!("{}", rendered),
    }

    if cli.stats_json {
        let json = serde_json::to_string_pretty(&stats)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize stats: {}", e)));
        eprintln!("{}", json);
    } else {
        print_summary(&stats);
    }
    info!(elapsed:? = total_start.elapsed(); "Completed successfully");
}

fn build_pipeline(config_path: Option<&str>) -> Pipeline {
    let config = match config_path {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read config file '{}': {}", path, e))
            });
            toml::from_str::<PipelineConfig>(&text).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to parse config file '{}': {}", path, e))
            })
        }
        None => PipelineConfig::default(),
    };
    Pipeline::builder()
        .with_config(config)
        .build()
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid configuration: {}", e)))
}

fn load_state(state_path: Option<&str>) -> DiagramState {
    let Some(path) = state_path else {
        return DiagramState::default();
    };
    let json = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read state file '{}': {}", path, e))
    });
    DiagramState::from_json(&json).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to parse state file '{}': {}", path, e))
    })
}

fn print_summary(stats: &ProcessingStats) {
    eprintln!("\n--- Merge Summary ---");
    eprintln!("Shapes Added:         {}", stats.shapes_added);
    eprintln!("Shapes Updated:       {}", stats.shapes_updated);
    eprintln!("Connections Added:    {}", stats.connections_added);
    eprintln!("Duplicates Removed:   {}", stats.duplicates_removed);
    eprintln!("Processing Time:      {} ms", stats.processing_time_ms);
    if !stats.warnings.is_empty() {
        eprintln!("\nWarnings ({}):", stats.warnings.len());
        for warning in &stats.warnings {
            eprintln!("  -> {}", warning);
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
