//! Remote GraphQL endpoint access
//!
//! One POST per mutation, JSON body `{query, variables[, operationName]}`,
//! with an optional `AUTH_TOKEN` header.

pub mod client;
pub mod error;
pub mod operation;

pub use client::{DEFAULT_TIMEOUT, GraphQlClient, MutationTransport};
pub use error::RemoteError;
pub use operation::{AUTH_TOKEN_HEADER, MutationRequest, classify_response};
