//! One-shot question: `askai ask "<question>"`.
//!
//! Prints the rendered answer (or the terminal state as JSON with `--json`)
//! on stdout. Validation and transport failures exit with status 1.

use anyhow::{bail, Result};
use std::io::Write;

use crate::client::{AnswerClient, Outcome};
use crate::config::Config;
use crate::error::SubmitError;
use crate::models::RequestState;
use crate::render::render_state;
use crate::service::HttpAnswerService;

/// Build a client for the configured service.
pub fn build_client(config: &Config) -> Result<AnswerClient<HttpAnswerService>> {
    let service = HttpAnswerService::new(&config.service)?;
    Ok(AnswerClient::new(service, config.client.overlap_policy))
}

/// CLI entry point.
pub async fn run_ask(config: &Config, question: &str, json: bool) -> Result<()> {
    let client = build_client(config)?;

    if !json && atty::is(atty::Stream::Stderr) {
        eprintln!("Thinking...");
    }

    let state = match client.submit(question).await {
        Ok(Outcome::Settled(state)) => state,
        Ok(Outcome::Superseded { id, latest }) => {
            bail!("request {} was superseded by {}", id, latest)
        }
        Err(SubmitError::Validation(e)) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        Err(e @ SubmitError::Busy) => bail!(e),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print!("{}", render_state(&state));
    }

    if matches!(state, RequestState::Failed { .. }) {
        std::io::stdout().flush()?;
        std::process::exit(1);
    }
    Ok(())
}
