//! # Textbook Ask CLI (`askai`)
//!
//! Ask the Physical AI textbook's answering service questions from a
//! terminal.
//!
//! ## Usage
//!
//! ```bash
//! askai --config ./config/askai.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `askai ask "<question>"` | Ask one question and print the answer |
//! | `askai chat` | Interactive question/answer session |
//! | `askai examples` | List the example questions |
//! | `askai health` | Check that the answering service is up |
//! | `askai status` | Describe the answering service |
//! | `askai debug` | Show what the answering service has indexed |
//!
//! ## Examples
//!
//! ```bash
//! # Ask against a deployed service
//! askai --base-url https://rag.example.org ask "Explain ROS 2 nodes and topics"
//!
//! # Machine-readable result
//! askai ask "What is Gazebo?" --json
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use textbook_ask::config::BASE_URL_ENV;
use textbook_ask::input::ExampleQuestions;
use textbook_ask::render::render_examples;
use textbook_ask::{ask_cmd, chat, config, logging, status};

const DEFAULT_CONFIG: &str = "./config/askai.toml";

/// Textbook Ask CLI: ask the Physical AI textbook's answering service.
///
/// Settings are read from a TOML file (`--config`). Without one, built-in
/// defaults are used and the service address comes from `ASKAI_BASE_URL`
/// or `--base-url`.
#[derive(Parser)]
#[command(
    name = "askai",
    about = "Ask the Physical AI textbook's answering service",
    version,
    long_about = "Sends questions to a retrieval-augmented answering service \
    (GET <base-url>/ask?q=...) and prints the answer together with the textbook \
    sections it was drawn from."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/askai.toml`; if that file does not exist the
    /// built-in defaults are used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the answering service. Overrides the config file and
    /// the `ASKAI_BASE_URL` environment variable.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Enable debug logging on stderr (overridden by `ASKAI_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Ask a single question.
    ///
    /// Prints the answer line by line followed by its sources. Exits with
    /// status 1 if the question is blank or the service call fails.
    Ask {
        /// The question text.
        question: String,

        /// Print the final request state as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive session.
    ///
    /// Enter submits; end a line with `\` to continue the question on the
    /// next line. `/example N` fills in an example question.
    Chat,

    /// List the example questions.
    Examples,

    /// Check the answering service's `/health` endpoint.
    Health,

    /// Show the answering service's description (`GET /`).
    Status,

    /// Show the answering service's index counters (`GET /debug`).
    Debug,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let (path, required) = match &cli.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG), false),
    };
    let cfg = config::resolve_config(&path, required, cli.base_url.clone())?;
    tracing::debug!(
        base_url = %cfg.service.base_url,
        env = BASE_URL_ENV,
        "configuration loaded"
    );

    match cli.command {
        Commands::Ask { question, json } => {
            ask_cmd::run_ask(&cfg, &question, json).await?;
        }
        Commands::Chat => {
            let client = ask_cmd::build_client(&cfg)?;
            let examples = ExampleQuestions::from_config(&cfg.examples);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            chat::run_chat(&client, &examples, stdin, &mut stdout).await?;
        }
        Commands::Examples => {
            let examples = ExampleQuestions::from_config(&cfg.examples);
            print!("{}", render_examples(&examples));
        }
        Commands::Health => {
            status::run_health(&cfg).await?;
        }
        Commands::Status => {
            status::run_status(&cfg).await?;
        }
        Commands::Debug => {
            status::run_debug(&cfg).await?;
        }
    }

    Ok(())
}
