//! HTTP request/response types described as plain data.
//!
//! # Design
//! Endpoint methods build an `HttpRequest` value, hand it to a `Transport`,
//! and interpret the `HttpResponse` that comes back. Keeping both sides as
//! owned data means request shaping can be asserted without a network, and
//! the status/body interpretation lives in one place (`ScheduleClient`).
//!
//! The query string is kept as ordered pairs rather than baked into `url`,
//! so optional parameters can be left out instead of being sent empty.

use serde::Serialize;
use url::form_urlencoded;

use crate::error::{normalize, ApiError, Failure};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute URL without the query string.
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_headers(mut self, headers: &[(String, String)]) -> Self {
        self.headers.extend(headers.iter().cloned());
        self
    }

    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_pairs<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, String)>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.to_string(), v)));
        self
    }

    /// Attach a JSON body. A payload that cannot be serialized never reaches
    /// the wire and is reported as an unexpected error.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let json = serde_json::to_string(body).map_err(|e| {
            tracing::warn!(error = %e, url = %self.url, "request body could not be serialized");
            normalize(Failure::Internal)
        })?;
        self.body = Some(json);
        Ok(self)
    }

    /// The URL with the query pairs form-encoded in insertion order.
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        format!("{}?{}", self.url, self.query_string())
    }

    /// The rendered query string, empty when there are no pairs.
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish()
    }
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport` for every response that arrived, whatever its
/// status; interpretation is left to the client.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
