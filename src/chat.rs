//! Interactive session: `askai chat`.
//!
//! Each input line is typed into the [`QuestionInput`] followed by Enter.
//! A line ending in `\` is a modified Enter: the backslash is dropped, a
//! line break is inserted, and nothing is submitted. A blank line submits
//! whatever the field holds, which is how a selected example is asked.
//!
//! | Command | Effect |
//! |---------|--------|
//! | `/examples` | list preset questions |
//! | `/example N` | put preset N into the field (not submitted) |
//! | `/clear` | empty the field |
//! | `/help` | show commands |
//! | `/quit` | leave |

use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::client::{AnswerClient, Outcome};
use crate::error::SubmitError;
use crate::input::{ExampleQuestions, InputAction, Key, KeyEvent, Modifiers, QuestionInput};
use crate::render::{render_examples, render_state};
use crate::service::AnswerService;

const HELP: &str = "Type a question and press Enter. End a line with \\ to continue on the next line.\n\
Commands: /examples, /example N, /clear, /help, /quit\n";

enum Command {
    Quit,
    Help,
    Examples,
    Example(Option<usize>),
    Clear,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let rest = line.strip_prefix('/')?;
    let mut parts = rest.split_whitespace();
    let cmd = match parts.next()? {
        "quit" | "exit" => Command::Quit,
        "help" => Command::Help,
        "examples" => Command::Examples,
        "example" => Command::Example(parts.next().and_then(|n| n.parse().ok())),
        "clear" => Command::Clear,
        _ => return None,
    };
    Some(cmd)
}

pub async fn run_chat<S, R, W>(
    client: &AnswerClient<S>,
    examples: &ExampleQuestions,
    reader: R,
    out: &mut W,
) -> Result<()>
where
    S: AnswerService,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut input = QuestionInput::new();
    let mut lines = reader.lines();

    write!(out, "{}", HELP)?;
    if !examples.is_empty() {
        write!(out, "{}", render_examples(examples))?;
    }

    loop {
        let prompt = if input.text().is_empty() { "ask> " } else { "...> " };
        write!(out, "{}", prompt)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        if let Some(cmd) = parse_command(&line) {
            match cmd {
                Command::Quit => break,
                Command::Help => write!(out, "{}", HELP)?,
                Command::Examples => write!(out, "{}", render_examples(examples))?,
                Command::Example(n) => match n.and_then(|n| examples.get(n)) {
                    Some(q) => {
                        input.select_example(q);
                        writeln!(out, "Selected: {} (press Enter to ask)", q)?;
                    }
                    None => writeln!(out, "Pick a number from 1 to {}", examples.len())?,
                },
                Command::Clear => input.clear(),
            }
            continue;
        }

        let action = match line.strip_suffix('\\') {
            Some(partial) => {
                input.type_str(partial);
                input.handle_key(KeyEvent::with(Key::Enter, Modifiers::SHIFT))
            }
            None => {
                input.type_str(&line);
                input.handle_key(KeyEvent::plain(Key::Enter))
            }
        };

        let InputAction::Submit(text) = action else {
            continue;
        };

        // Mirrors the widget's disabled textarea; stdin is not read until
        // the submission settles.
        input.set_enabled(false);
        let result = client.submit(&text).await;
        input.set_enabled(true);

        match result {
            Ok(Outcome::Settled(state)) => {
                input.clear();
                writeln!(out, "{}", render_state(&state))?;
            }
            Ok(Outcome::Superseded { .. }) => {
                input.clear();
                writeln!(out, "{}", render_state(&client.state()))?;
            }
            Err(SubmitError::Validation(e)) => {
                input.clear();
                writeln!(out, "{}", e)?;
            }
            Err(SubmitError::Busy) => writeln!(out, "Still answering the previous question.")?,
        }
    }

    Ok(())
}
