mod cli;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use embedeval::config::{default_config_path, EvalConfig};
use embedeval::embedding::Format;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "embedeval", version, about = "NLP word embedding evaluation tool")]
struct Cli {
    /// Config file to use instead of ~/.embedeval/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate an embedding with one or more tasks
    Evaluate {
        /// Path to the word-vector file
        path: PathBuf,
        /// File format (default: by extension, `.bin` is binary)
        #[arg(long)]
        format: Option<Format>,
        /// Task to run (repeatable; default: all registered tasks)
        #[arg(short, long = "task")]
        tasks: Vec<String>,
        /// Additional directory to discover task plugins in (repeatable)
        #[arg(long = "task-path")]
        task_paths: Vec<PathBuf>,
        /// Per-task timeout in seconds (0 disables)
        #[arg(long)]
        timeout: Option<u64>,
        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all available tasks
    Tasks {
        /// Additional directory to discover task plugins in (repeatable)
        #[arg(long = "task-path")]
        task_paths: Vec<PathBuf>,
    },
    /// Show the shape and first words of an embedding
    Inspect {
        /// Path to the word-vector file
        path: PathBuf,
        /// File format (default: by extension, `.bin` is binary)
        #[arg(long)]
        format: Option<Format>,
        /// Number of words to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = EvalConfig::load_from(&config_path)?;

    // Log to stderr so stdout stays clean for reports.
    let filter = EnvFilter::try_new(&config.logging.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &config.source {
        Some(path) => info!("loaded config from {}", path.display()),
        None => info!("no config file at {}, using defaults", config_path.display()),
    }

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let result = runtime.block_on(run(cli.command, config));
    // Timed-out tasks may still hold blocking threads; don't wait for them.
    runtime.shutdown_background();
    result
}

async fn run(command: Command, config: EvalConfig) -> Result<()> {
    match command {
        Command::Evaluate {
            path,
            format,
            tasks,
            task_paths,
            timeout,
            json,
        } => {
            let request = cli::evaluate::EvaluateRequest {
                path,
                format,
                tasks,
                task_paths,
                timeout_secs: timeout,
                json,
            };
            cli::evaluate::evaluate(&config, request).await?;
        }
        Command::Tasks { task_paths } => {
            cli::tasks::list_tasks(&config, &task_paths)?;
        }
        Command::Inspect {
            path,
            format,
            limit,
        } => {
            cli::inspect::inspect(&config, &path, format, limit)?;
        }
    }

    Ok(())
}
