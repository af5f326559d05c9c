use std::num::NonZeroU32;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use aiwrap::config::Config;
use aiwrap::llm::{Client, SendOptions};

#[derive(Parser)]
#[command(name = "aiwrap", version, about = "Send a prompt to a hosted language model")]
struct Cli {
    /// Path to the YAML config file
    #[arg(long, short, default_value = "aiwrap.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the diagnostic request (default)
    Test,
    /// Send a prompt and print the reply
    Send {
        /// Prompt text; read from stdin when omitted
        prompt: Option<String>,
        /// Model identifier
        #[arg(long)]
        model: Option<String>,
        /// Maximum output tokens
        #[arg(long)]
        max_tokens: Option<NonZeroU32>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String> {
    let config = Config::load(&cli.config)
        .await
        .map_err(|e| anyhow!("{}: {e}", cli.config.display()))?;
    let client = Client::from_env(None, &config.llm)?;

    match cli.command.unwrap_or(Command::Test) {
        Command::Test => Ok(client.self_test().await?),
        Command::Send {
            prompt,
            model,
            max_tokens,
        } => {
            let prompt = match prompt {
                Some(p) => p,
                None => read_stdin().await?,
            };
            let options = SendOptions {
                model,
                max_output_tokens: max_tokens,
            };
            Ok(client.send(&prompt, options).await?)
        }
    }
}

async fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buf)
        .await
        .map_err(|e| anyhow!("reading prompt from stdin: {e}"))?;
    Ok(buf)
}
