//! fixture-app command line.
//!
//! Usage:
//!   cargo run -- run [MODE]
//!   cargo run -- method 7 x 12
//!   cargo run -- generate --param1 x --param2 12 --output fixture.jsonl
//!   cargo run -- classify 7.5

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

use fixture_app::config::Config;
use fixture_app::methods::{self, METHOD_COUNT};
use fixture_app::record::Category;

#[derive(Parser)]
#[command(name = "fixture-app")]
#[command(about = "Repetitive record fixture with a single networked run", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// GET the configured endpoint and print the outcome envelope
    Run {
        #[arg(default_value = "test")]
        mode: String,
    },
    /// Invoke a single test method
    Method {
        n: u32,
        param1: String,
        #[arg(allow_negative_numbers = true)]
        param2: f64,
    },
    /// Write every test method's record as JSON lines
    Generate {
        #[arg(long, default_value = "sample")]
        param1: String,
        #[arg(long, default_value_t = 7.0, allow_negative_numbers = true)]
        param2: f64,
        /// Output file (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the category a value falls into
    Classify {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    // Logs go to stderr so JSON on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(config.logging.level.as_str())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    match cli.command.unwrap_or(Commands::Run {
        mode: "test".to_string(),
    }) {
        Commands::Run { mode } => run(config, &mode).await,
        Commands::Method { n, param1, param2 } => {
            let record = methods::test_method(n, &param1, param2)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Commands::Generate {
            param1,
            param2,
            output,
        } => generate(&param1, param2, output),
        Commands::Classify { value } => {
            println!("{}", Category::classify(value));
            Ok(())
        }
    }
}

async fn run(config: Config, mode: &str) -> Result<()> {
    let app = fixture_app::init_with(config)?;
    info!("Endpoint: {}", app.config().api.endpoint);
    let outcome = app.run(mode).await;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn generate(param1: &str, param2: f64, output: Option<PathBuf>) -> Result<()> {
    let records = methods::generate_all(param1, param2);
    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let n = methods::write_json_lines(&records, BufWriter::new(file))?;
            info!("Wrote {} of {} records to {}", n, METHOD_COUNT, path.display());
        }
        None => {
            methods::write_json_lines(&records, std::io::stdout().lock())?;
        }
    }
    Ok(())
}
