//! The external answering service, as seen from the client.
//!
//! The retrieval-augmented answering service is owned by another system;
//! this module only speaks its HTTP interface:
//!
//! | Method | Path | Payload |
//! |--------|------|---------|
//! | `GET`  | `/ask?q=<question>` | [`AskResponse`] |
//! | `GET`  | `/health` | [`HealthResponse`] |
//! | `GET`  | `/` | [`ServiceInfo`] |
//! | `GET`  | `/debug` | [`DebugInfo`] |
//!
//! The question is percent-encoded the way browsers' `encodeURIComponent`
//! does it (a space becomes `%20`, never `+`). Any non-2xx status is a
//! failure and its body is not read.
//!
//! [`AnswerService`] is the seam the [`AnswerClient`](crate::client::AnswerClient)
//! is generic over, so tests can substitute an in-memory service.

use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::config::ServiceConfig;
use crate::error::TransportError;
use crate::models::{AskResponse, DebugInfo, HealthResponse, Query, ServiceInfo};

/// Something that can answer a question.
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Ask one question. Exactly one request per call, no retries.
    async fn ask(&self, query: &Query) -> Result<AskResponse, TransportError>;
}

#[async_trait]
impl<S: AnswerService + ?Sized> AnswerService for Arc<S> {
    async fn ask(&self, query: &Query) -> Result<AskResponse, TransportError> {
        (**self).ask(query).await
    }
}

/// [`AnswerService`] backed by the service's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpAnswerService {
    client: reqwest::Client,
    base: Url,
    timeout_secs: Option<u64>,
}

impl HttpAnswerService {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let base = config.base()?;
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            base,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `<base>/<path>`, keeping any path prefix the base URL carries.
    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{}/{}", prefix, path.trim_start_matches('/')));
        url.set_query(None);
        url
    }

    /// The full `GET /ask` URL for a question.
    pub fn ask_url(&self, query: &Query) -> Url {
        let mut url = self.endpoint("ask");
        url.set_query(Some(&format!("q={}", urlencoding::encode(query.as_str()))));
        url
    }

    /// `GET /health`.
    pub async fn health(&self) -> Result<HealthResponse, TransportError> {
        self.get_json(self.endpoint("health")).await
    }

    /// `GET /` service description.
    pub async fn info(&self) -> Result<ServiceInfo, TransportError> {
        self.get_json(self.endpoint("")).await
    }

    /// `GET /debug` index counters.
    pub async fn debug_info(&self) -> Result<DebugInfo, TransportError> {
        self.get_json(self.endpoint("debug")).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| TransportError::from_reqwest(e, self.timeout_secs))
    }
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    async fn ask(&self, query: &Query) -> Result<AskResponse, TransportError> {
        let url = self.ask_url(query);
        tracing::debug!(url = %url, "GET /ask");
        self.get_json(url).await
    }
}
