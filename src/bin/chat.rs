//! Console chat front-end for the response engine.

use clap::Parser;
use solace::choice::SeededChoice;
use solace::{EngineConfig, ResponseEngine};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Solace: emotion-aware supportive chat.
#[derive(Parser)]
#[command(name = "solace-chat", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON response template document (overrides the config file).
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// Write the conversation history as JSON here on exit.
    #[arg(long)]
    save_history: Option<PathBuf>,

    /// Seed for reproducible response choice.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout is the conversation.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("solace=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = if let Some(ref path) = cli.config {
        EngineConfig::from_file(path)?
    } else {
        let default_path = EngineConfig::default_config_path();
        if default_path.exists() {
            EngineConfig::from_file(&default_path)?
        } else {
            EngineConfig::default()
        }
    };
    if let Some(path) = cli.templates {
        config.templates.path = Some(path);
    }

    let mut builder = ResponseEngine::builder().config(config);
    if let Some(seed) = cli.seed {
        builder = builder.chooser(SeededChoice::new(seed));
    }
    let engine = builder.build()?;

    println!("Solace v{}. Type 'quit' to exit.", env!("CARGO_PKG_VERSION"));
    println!("Bot: {}", engine.greeting()?);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("You: ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.eq_ignore_ascii_case("quit") {
            break;
        }

        match engine.generate_response(input) {
            Ok(reply) => {
                println!("\nBot: {}\n", reply.response);
                if reply.is_crisis {
                    println!("CRISIS RESOURCES:");
                    println!("Crisis Helpline: {}\n", engine.crisis_resource());
                }
            }
            Err(solace::EngineError::EmptyInput) => continue,
            Err(e) => {
                tracing::error!(error = %e, "turn failed");
                println!("\n[error] I couldn't process that message: {e}\n");
            }
        }
    }

    if let Some(path) = cli.save_history {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, engine.history_json()?)?;
        tracing::info!(path = %path.display(), "conversation history saved");
    }

    Ok(())
}
