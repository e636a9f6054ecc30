//! Main entrypoint for the HealthBot CLI.
//!
//! Loads configuration from the environment, wires the search and
//! text-generation capabilities into the session engine, and drives one
//! conversational session on the terminal.

mod console;

use anyhow::Result;
use async_openai::config::OpenAIConfig;
use clap::Parser;
use console::ConsoleInterface;
use healthbot_core::capabilities::{SearchProvider, TextGenerator};
use healthbot_core::generation::OpenAiTextGenerator;
use healthbot_core::machine::{DEFAULT_MAX_QUIZ_ATTEMPTS, SessionEngine, SessionOutcome};
use healthbot_core::search::TavilySearchClient;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "healthbot", version, about = "AI-powered patient education system")]
struct Args {
    /// Chat model used for summarization, quiz authoring, and feedback.
    #[arg(long, default_value = "gpt-4o")]
    model: String,

    /// How many times quiz generation is retried on malformed output.
    #[arg(long, default_value_t = DEFAULT_MAX_QUIZ_ATTEMPTS)]
    max_quiz_attempts: usize,
}

fn require_env(name: &str, hint: &str) -> String {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            eprintln!("Error: {name} not found in environment variables.");
            eprintln!("Please create a .env file with your {hint}.");
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let openai_api_key = require_env("OPENAI_API_KEY", "OpenAI API key");
    let tavily_api_key = require_env("TAVILY_API_KEY", "Tavily API key");

    let openai_config = OpenAIConfig::new().with_api_key(openai_api_key);
    let generator: Arc<dyn TextGenerator> =
        Arc::new(OpenAiTextGenerator::new(openai_config, args.model.clone()));
    let search: Arc<dyn SearchProvider> = Arc::new(TavilySearchClient::new(tavily_api_key));
    let ui = Arc::new(ConsoleInterface::new());

    println!("\n=== HealthBot: AI-Powered Patient Education System ===\n");

    let mut engine = SessionEngine::new(search, generator, ui)
        .with_max_quiz_attempts(args.max_quiz_attempts);

    let outcome = tokio::select! {
        result = engine.run() => result,
        _ = tokio::signal::ctrl_c() => Ok(SessionOutcome::Interrupted),
    };

    match outcome {
        Ok(SessionOutcome::Completed) => {
            println!("\nThank you for using HealthBot! Stay healthy!\n");
        }
        Ok(SessionOutcome::Interrupted) => {
            println!("\n\nHealthBot session ended by user. Stay healthy!\n");
        }
        Err(err) => {
            error!(error = %err, "session failed");
            eprintln!("\nAn error occurred: {err}");
            eprintln!("Please check your API keys and internet connection.");
            std::process::exit(1);
        }
    }

    Ok(())
}
