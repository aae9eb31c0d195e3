//! HTTP transport for GraphQL mutations

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use super::{AUTH_TOKEN_HEADER, MutationRequest, RemoteError, classify_response};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Submits one mutation and reports its `data` payload or the failure
///
/// The batch runner only talks to this trait, so tests can substitute an
/// in-process service.
#[async_trait]
pub trait MutationTransport: Send + Sync {
    async fn submit(&self, request: &MutationRequest) -> Result<Value, RemoteError>;
}

#[async_trait]
impl<T: MutationTransport + ?Sized> MutationTransport for std::sync::Arc<T> {
    async fn submit(&self, request: &MutationRequest) -> Result<Value, RemoteError> {
        (**self).submit(request).await
    }
}

/// reqwest-backed GraphQL client
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: reqwest::Client,
}

impl GraphQlClient {
    /// Build a client with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl MutationTransport for GraphQlClient {
    async fn submit(&self, request: &MutationRequest) -> Result<Value, RemoteError> {
        let mut builder = self
            .http
            .post(&request.endpoint)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = &request.auth_token {
            builder = builder.header(AUTH_TOKEN_HEADER, token.as_str());
        }

        let response = builder.json(&request.body()).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        debug!("POST {} -> {} ({} bytes)", request.endpoint, status, text.len());

        classify_response(status, &text)
    }
}
