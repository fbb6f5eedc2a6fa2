//! Plain-text rendering of the client state for a terminal.

use crate::input::ExampleQuestions;
use crate::models::RequestState;

pub fn render_state(state: &RequestState) -> String {
    match state {
        RequestState::Idle => String::new(),
        RequestState::Pending { .. } => "Thinking...\n".to_string(),
        RequestState::Resolved { .. } | RequestState::Failed { .. } => {
            let mut out = String::from("Answer:\n");
            if let Some(answer) = state.answer() {
                for line in answer.lines() {
                    out.push_str("  ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
            let sources = state.sources();
            if !sources.is_empty() {
                out.push_str("\nSources:\n");
                for source in sources {
                    out.push_str(&format!("  - {}\n", source));
                }
            }
            out
        }
    }
}

pub fn render_examples(examples: &ExampleQuestions) -> String {
    let mut out = String::from("Try these questions:\n");
    for (i, q) in examples.iter().enumerate() {
        out.push_str(&format!("  {:>2}. {}\n", i + 1, q));
    }
    out
}
