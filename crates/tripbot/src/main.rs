//! Answer a travel or food query against the loaded datasets.
//!
//! Reads the API key from the `OPENROUTER_KEY` environment variable.
//!
//! # Examples
//!
//! ```sh
//! # Natural-language query via the LLM
//! tripbot --travel-data travel.csv --food-data food.csv \
//!   --query "I want to plan a 5-day trip with a budget of $2000"
//!
//! # Pipe the query from stdin
//! echo "cheap food under 10 dollars" | \
//!   tripbot --travel-data travel.csv --food-data food.csv --stdin
//!
//! # Offline smoke test: dispatch an operation directly, no LLM call
//! tripbot --travel-data travel.csv --food-data food.csv \
//!   --op search_destinations --args '{"duration": 5, "budget": 2000}'
//! ```

use clap::Parser;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use tripbot::data::Datasets;
use tripbot::router::{RouterConfig, route_query};
use tripbot::tools::ToolOp;
use tripbot::{DEFAULT_MODEL, OpenRouterClient};

/// Answer a travel or food query against the loaded datasets.
///
/// Reads the API key from the OPENROUTER_KEY environment variable.
#[derive(Parser)]
#[command(name = "tripbot")]
struct Cli {
    // ── Datasets ───────────────────────────────────────────────
    /// Path to the travel dataset CSV
    #[arg(long)]
    travel_data: PathBuf,

    /// Path to the food dataset CSV
    #[arg(long)]
    food_data: PathBuf,

    // ── Query input ────────────────────────────────────────────
    /// The query to answer
    #[arg(long)]
    query: Option<String>,

    /// Read the query from stdin
    #[arg(long)]
    stdin: bool,

    // ── Model parameters ───────────────────────────────────────
    /// Model to use for routing
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Maximum tokens in the response
    #[arg(long, default_value_t = 1024)]
    max_tokens: u32,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.3)]
    temperature: f32,

    // ── Offline dispatch ───────────────────────────────────────
    /// Dispatch a named operation directly without the LLM
    #[arg(long, conflicts_with_all = ["query", "stdin"])]
    op: Option<String>,

    /// JSON arguments for --op
    #[arg(long, default_value = "{}", requires = "op")]
    args: String,
}

fn read_stdin_query() -> Result<String, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {e}"))?;
    Ok(buf.trim().to_string())
}

fn build_query(cli: &Cli) -> Result<String, String> {
    match (&cli.query, cli.stdin) {
        (Some(q), false) => Ok(q.clone()),
        (None, true) => read_stdin_query(),
        (Some(q), true) => Ok(format!("{q}\n\n{}", read_stdin_query()?)),
        (None, false) => Err("provide --query, --stdin, or --op".to_string()),
    }
}

async fn run(cli: &Cli) -> Result<String, String> {
    let datasets = Datasets::load(&cli.travel_data, &cli.food_data)?;

    // Offline mode bypasses the LLM entirely.
    if let Some(ref name) = cli.op {
        let op = ToolOp::resolve(name).map_err(|e| e.to_string())?;
        return Ok(tripbot::tools::dispatch(op, &cli.args, &datasets));
    }

    let query = build_query(cli)?;
    let api_key = std::env::var("OPENROUTER_KEY")
        .map_err(|_| "OPENROUTER_KEY environment variable is not set".to_string())?;
    let client = OpenRouterClient::new(api_key)?;

    let config = RouterConfig {
        model: cli.model.clone(),
        max_tokens: cli.max_tokens,
        temperature: cli.temperature,
    };

    Ok(route_query(&client, &datasets, &config, &query).await)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(response) => println!("{response}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
