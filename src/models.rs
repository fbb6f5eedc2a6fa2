//! Core data models used throughout the answer client.
//!
//! These types represent the question, the answering service's wire
//! payloads, and the request lifecycle that flows between the input field,
//! the [`AnswerClient`](crate::client::AnswerClient) and the renderer.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A question accepted for dispatch.
///
/// The only way to build one is [`Query::parse`], so a `Query` value is
/// never blank. The text is kept as typed; trimming is only used for the
/// emptiness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.trim().is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Answer text, either from the service or substituted with an error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Answer(String);

impl Answer {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display lines, split on line breaks.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l))
    }
}

/// Monotonic identifier assigned to each dispatch of one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Success payload of `GET /ask`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AskResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Payload of `GET /health`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Payload of `GET /` describing the running service.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServiceInfo {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub documents: Option<u64>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub endpoints: Vec<String>,
}

/// Payload of `GET /debug`: what the service has indexed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DebugInfo {
    #[serde(default)]
    pub documents_count: Option<u64>,
    #[serde(default)]
    pub files_count: Option<u64>,
    #[serde(default)]
    pub sample_document: Option<String>,
    #[serde(default)]
    pub vectorizer: Option<String>,
    #[serde(default, rename = "X_matrix")]
    pub matrix: Option<String>,
}

/// Lifecycle of the client's current exchange.
///
/// `Idle` → `Pending` on dispatch → `Resolved` or `Failed` on response.
/// Only a new dispatch moves a terminal state back to `Pending`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RequestState {
    Idle,
    Pending {
        id: RequestId,
        query: Query,
    },
    Resolved {
        id: RequestId,
        query: Query,
        answer: Answer,
        sources: Vec<String>,
    },
    Failed {
        id: RequestId,
        query: Query,
        answer: Answer,
        reason: String,
    },
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestState::Resolved { .. } | RequestState::Failed { .. }
        )
    }

    pub fn answer(&self) -> Option<&Answer> {
        match self {
            RequestState::Resolved { answer, .. } | RequestState::Failed { answer, .. } => {
                Some(answer)
            }
            _ => None,
        }
    }

    /// Sources of a resolved answer; empty in every other state.
    pub fn sources(&self) -> &[String] {
        match self {
            RequestState::Resolved { sources, .. } => sources,
            _ => &[],
        }
    }

    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            RequestState::Idle => None,
            RequestState::Pending { id, .. }
            | RequestState::Resolved { id, .. }
            | RequestState::Failed { id, .. } => Some(*id),
        }
    }
}
