//! Run configuration supplied by the caller

use serde_json::{Map, Value};
use thiserror::Error;

use crate::api::MutationRequest;

/// Mutation template offered when the user has not written one
pub const DEFAULT_MUTATION: &str = r#"mutation UpdateProcessoTagList($id: ID!, $tagList: String!) {
  updateProcesso(
    input: {
      parametros: {
        id: $id
        tagList: $tagList
      }
    }
  ) {
    id
    tagList
  }
}"#;

/// Raised before any row is processed when the run cannot start
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Please enter a GraphQL endpoint URL")]
    MissingEndpoint,

    #[error("Please enter a GraphQL mutation query")]
    MissingOperationDocument,
}

/// Endpoint, credential and operation document for one run
///
/// Values are opaque: the endpoint and document are used exactly as given.
/// The credential is trimmed and dropped when blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    endpoint: String,
    auth_token: Option<String>,
    operation_document: String,
}

impl RunConfig {
    pub fn new(
        endpoint: impl Into<String>,
        auth_token: Option<&str>,
        operation_document: impl Into<String>,
    ) -> Self {
        let auth_token = auth_token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Self {
            endpoint: endpoint.into(),
            auth_token,
            operation_document: operation_document.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn operation_document(&self) -> &str {
        &self.operation_document
    }

    /// Check the run preconditions
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigurationError::MissingEndpoint);
        }
        if self.operation_document.trim().is_empty() {
            return Err(ConfigurationError::MissingOperationDocument);
        }
        Ok(())
    }

    /// Build the request for one row's variables
    pub fn request(&self, variables: Map<String, Value>) -> MutationRequest {
        MutationRequest::new(
            self.endpoint.clone(),
            self.auth_token.clone(),
            self.operation_document.clone(),
            variables,
        )
    }
}
