//! # Textbook Ask
//!
//! The "Ask AI" client for the Physical AI & Humanoid Robotics textbook.
//!
//! Questions go to an external retrieval-augmented answering service over
//! HTTP (`GET /ask?q=...`); the answer text and the textbook sections it was
//! drawn from come back and are shown to the reader. The service itself
//! (indexing, ranking, generation) lives elsewhere.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌─────────────────┐
//! │ QuestionInput│──▶│ AnswerClient │──▶│  AnswerService  │──▶ GET /ask
//! │ Enter/Shift  │   │ Idle→Pending │   │  (HTTP / test)  │
//! └──────────────┘   │ →Resolved    │   └─────────────────┘
//!                    │ →Failed      │
//!                    └──────┬───────┘
//!                           ▼
//!                    ┌──────────────┐
//!                    │    render    │──▶ terminal
//!                    └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! export ASKAI_BASE_URL=http://localhost:8000
//! askai ask "What is Physical AI?"
//! askai chat
//! askai health
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration and base URL overrides |
//! | [`models`] | Query, answer, wire payloads, request state |
//! | [`error`] | Validation and transport errors |
//! | [`service`] | Answering service seam and its HTTP implementation |
//! | [`client`] | Request lifecycle and overlap policy |
//! | [`input`] | Question field key handling and example questions |
//! | [`render`] | Terminal rendering |
//! | [`ask_cmd`] | One-shot `askai ask` |
//! | [`chat`] | Interactive `askai chat` |
//! | [`status`] | `askai health` / `askai status` / `askai debug` probes |
//! | [`logging`] | tracing subscriber setup |

pub mod ask_cmd;
pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod models;
pub mod render;
pub mod service;
pub mod status;
