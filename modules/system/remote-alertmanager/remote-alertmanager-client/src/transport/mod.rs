//! The "send request, get response" capability the client is built on.
//!
//! The default stack is, from the outside in:
//!
//! ```text
//! TracedRequester -> TimedRequester -> TenantAuthRequester -> reqwest::Client
//! ```
//!
//! Each layer only knows the [`Requester`] trait, so any of them can be replaced or
//! tested on its own.

mod auth;
mod timed;
mod traced;

use std::sync::Arc;

pub use auth::{SCOPE_ORG_ID_HEADER, TenantAuthRequester};
pub use timed::TimedRequester;
pub use traced::TracedRequester;

/// Sends a single HTTP request. Implementations must be safe for concurrent use.
#[async_trait::async_trait]
pub trait Requester: Send + Sync {
    async fn execute(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error>;
}

#[async_trait::async_trait]
impl Requester for reqwest::Client {
    async fn execute(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error> {
        reqwest::Client::execute(self, request).await
    }
}

#[async_trait::async_trait]
impl<R: Requester + ?Sized> Requester for Arc<R> {
    async fn execute(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error> {
        (**self).execute(request).await
    }
}
