//! Gateway client for the scheduling API.
//!
//! # Design
//! `ScheduleClient` holds an immutable `ClientConfig` and a `Transport`.
//! Endpoint groups (`courses()`, `units()`, ...) borrow it and build
//! `HttpRequest` values; every one of them is sent through `execute`, the
//! single place where responses are interpreted and failures normalized.
//! No state survives a call: no cache, no retry, no pagination loop.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{normalize, ApiError, Failure};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::resources::{Allocation, Calendar, Courses, Health, Instructors, Units};
use crate::transport::{HttpTransport, Transport};

#[derive(Debug, Clone)]
pub struct ScheduleClient<T = HttpTransport> {
    config: Arc<ClientConfig>,
    transport: T,
}

impl ScheduleClient<HttpTransport> {
    /// Client over reqwest for the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(&config).map_err(|e| {
            warn!(error = %e, "failed to build HTTP transport");
            normalize(e.as_failure())
        })?;
        Ok(Self::with_transport(config, transport))
    }

    /// Client configured from `AGENDA_API_URL` / `AGENDA_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ClientConfig::from_env())
    }
}

impl<T: Transport> ScheduleClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn courses(&self) -> Courses<'_, T> {
        Courses::new(self)
    }

    pub fn instructors(&self) -> Instructors<'_, T> {
        Instructors::new(self)
    }

    pub fn units(&self) -> Units<'_, T> {
        Units::new(self)
    }

    pub fn calendar(&self) -> Calendar<'_, T> {
        Calendar::new(self)
    }

    pub fn allocation(&self) -> Allocation<'_, T> {
        Allocation::new(self)
    }

    pub fn health(&self) -> Health<'_, T> {
        Health::new(self)
    }

    /// Request against the API prefix, carrying the default headers.
    pub fn api_request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest::new(method, format!("{}{path}", self.config.api_url()))
            .with_headers(self.config.default_headers())
    }

    /// Request against the bare origin, carrying the default headers.
    pub fn root_request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest::new(method, format!("{}{path}", self.config.root_url()))
            .with_headers(self.config.default_headers())
    }

    /// Send one request and return its parsed JSON body.
    pub async fn execute(&self, request: HttpRequest) -> Result<Value, ApiError> {
        let method = request.method.as_str();
        let url = request.full_url();
        debug!(%method, %url, "sending request");

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                let err = normalize(e.as_failure());
                warn!(%method, %url, kind = ?err.kind(), detail = %e, "{}", err.message());
                return Err(err);
            }
        };

        debug!(%method, %url, status = response.status, "received response");
        parse_response(&response).inspect_err(|err| {
            warn!(%method, %url, status = response.status, kind = ?err.kind(), "{}", err.message());
        })
    }
}

/// Interpret a response: 2xx bodies are returned as JSON (`null` when
/// empty), anything else becomes a normalized server error.
pub fn parse_response(response: &HttpResponse) -> Result<Value, ApiError> {
    let failure = Failure::Response {
        status: response.status,
        body: &response.body,
    };
    if !response.is_success() {
        return Err(normalize(failure));
    }
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body).map_err(|e| {
        debug!(error = %e, "response body is not JSON");
        normalize(failure)
    })
}
