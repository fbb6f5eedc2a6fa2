//! The answer client: one question/answer exchange at a time.
//!
//! [`AnswerClient`] owns the [`RequestState`] of a session and drives it
//! through `Idle → Pending → Resolved | Failed`. It validates input before
//! anything goes on the wire, dispatches exactly one request per accepted
//! submission, and never retries.
//!
//! # Overlapping submissions
//!
//! `submit` takes `&self`, so a second question can be submitted while the
//! first is still in flight. Every dispatch gets a monotonic [`RequestId`];
//! a response may only update the state if its id is still the latest one.
//! The configured [`OverlapPolicy`] decides what happens to the newcomer:
//!
//! | Policy | Second submit while pending |
//! |--------|-----------------------------|
//! | `discard_stale` | dispatched; the older response is dropped on arrival |
//! | `reject` | refused with [`SubmitError::Busy`] |
//! | `queue` | waits for the first to settle, then dispatched |
//!
//! Dropping a `submit` future mid-flight (for example under
//! `tokio::time::timeout`) settles that request as `Failed` with a
//! cancellation message, so the client can always take the next question.

use std::sync::{Mutex, MutexGuard};

use crate::config::OverlapPolicy;
use crate::error::{SubmitError, TransportError};
use crate::models::{Answer, AskResponse, Query, RequestId, RequestState};
use crate::service::AnswerService;

/// Result of a submission that made it onto the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The response was applied; carries the new terminal state.
    Settled(RequestState),
    /// A newer submission was dispatched before this response arrived, so
    /// the response was dropped and the state left alone.
    Superseded { id: RequestId, latest: RequestId },
}

impl Outcome {
    pub fn state(&self) -> Option<&RequestState> {
        match self {
            Outcome::Settled(state) => Some(state),
            Outcome::Superseded { .. } => None,
        }
    }
}

struct Session {
    state: RequestState,
    last_id: u64,
}

pub struct AnswerClient<S> {
    service: S,
    policy: OverlapPolicy,
    session: Mutex<Session>,
    turn: tokio::sync::Mutex<()>,
}

impl<S: AnswerService> AnswerClient<S> {
    pub fn new(service: S, policy: OverlapPolicy) -> Self {
        Self {
            service,
            policy,
            session: Mutex::new(Session {
                state: RequestState::Idle,
                last_id: 0,
            }),
            turn: tokio::sync::Mutex::new(()),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> RequestState {
        self.session().state.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.session().state.is_pending()
    }

    /// Ask a question.
    ///
    /// Blank input returns [`SubmitError::Validation`] without touching the
    /// state or the network. Otherwise the state becomes `Pending`, one
    /// request is made, and the response settles the state, unless a newer
    /// submission has been dispatched in the meantime.
    pub async fn submit(&self, raw: &str) -> Result<Outcome, SubmitError> {
        let query = Query::parse(raw)?;

        let _turn = match self.policy {
            OverlapPolicy::Queue => Some(self.turn.lock().await),
            OverlapPolicy::DiscardStale | OverlapPolicy::Reject => None,
        };

        let dispatch = Dispatch {
            client: self,
            id: self.begin(query.clone())?,
            query,
            settled: false,
        };
        let result = self.service.ask(&dispatch.query).await;
        Ok(dispatch.settle(result))
    }

    fn begin(&self, query: Query) -> Result<RequestId, SubmitError> {
        let mut session = self.session();
        if self.policy == OverlapPolicy::Reject && session.state.is_pending() {
            tracing::debug!("submission rejected: a request is pending");
            return Err(SubmitError::Busy);
        }

        session.last_id += 1;
        let id = RequestId(session.last_id);
        tracing::info!(request = %id, query = %query, "question dispatched");
        session.state = RequestState::Pending { id, query };
        Ok(id)
    }

    fn settle(
        &self,
        id: RequestId,
        query: Query,
        result: Result<AskResponse, TransportError>,
    ) -> Outcome {
        let mut session = self.session();
        let latest = RequestId(session.last_id);
        if id != latest {
            tracing::debug!(request = %id, latest = %latest, "stale response discarded");
            return Outcome::Superseded { id, latest };
        }

        session.state = match result {
            Ok(response) => {
                tracing::info!(
                    request = %id,
                    sources = response.sources.len(),
                    "answer received"
                );
                RequestState::Resolved {
                    id,
                    query,
                    answer: Answer::new(response.answer),
                    sources: response.sources,
                }
            }
            Err(err) => {
                tracing::warn!(request = %id, error = %err, "question failed");
                RequestState::Failed {
                    id,
                    query,
                    answer: Answer::new(format!("Error: Could not get answer. {}", err)),
                    reason: err.to_string(),
                }
            }
        };
        Outcome::Settled(session.state.clone())
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// An accepted submission between `begin` and `settle`.
///
/// If the `submit` future is dropped while the request is in flight, the
/// guard settles the state as cancelled so it never stays `Pending`.
struct Dispatch<'a, S: AnswerService> {
    client: &'a AnswerClient<S>,
    id: RequestId,
    query: Query,
    settled: bool,
}

impl<S: AnswerService> Dispatch<'_, S> {
    fn settle(mut self, result: Result<AskResponse, TransportError>) -> Outcome {
        self.settled = true;
        self.client.settle(self.id, self.query.clone(), result)
    }
}

impl<S: AnswerService> Drop for Dispatch<'_, S> {
    fn drop(&mut self) {
        if !self.settled {
            self.client
                .settle(self.id, self.query.clone(), Err(TransportError::Cancelled));
        }
    }
}
