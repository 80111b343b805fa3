//! Boundary with the HTTP layer.
//!
//! The façade only builds [`RequestDescriptor`]s and reads
//! [`TransportResponse`]s; connection handling, TLS and timeouts belong to
//! the [`Transport`] implementation.

mod reqwest_transport;

pub use reqwest_transport::ReqwestTransport;

use crate::error::TransportError;

use common::{HttpStatusCode, RedactedSecret};

use std::future::Future;

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// One outgoing call. Built per operation and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    /// Path relative to the API base URL, without a leading separator.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// A completed HTTP exchange, successful or not.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: HttpStatusCode,
    /// `None` when the body is empty or not JSON.
    pub body: Option<Value>,
}

/// Sends request descriptors to the remote platform.
pub trait Transport: Send + Sync {
    /// Perform the call. `authorization` is the full `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only when no HTTP response was received.
    fn send(
        &self,
        request: &RequestDescriptor,
        authorization: &RedactedSecret,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}
