use tracing::Instrument;
use tracing::field::Empty;

use super::Requester;

/// Wraps every request in a client span carrying method, URL and status code.
pub struct TracedRequester<R> {
    operation: &'static str,
    inner: R,
}

impl<R> TracedRequester<R> {
    #[must_use]
    pub fn new(operation: &'static str, inner: R) -> Self {
        Self { operation, inner }
    }
}

#[async_trait::async_trait]
impl<R: Requester> Requester for TracedRequester<R> {
    async fn execute(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let span = tracing::info_span!(
            "remote_alertmanager.request",
            otel.kind = "client",
            operation = self.operation,
            http.method = %request.method(),
            http.url = %request.url(),
            http.status_code = Empty,
            error = Empty,
        );

        let result = self.inner.execute(request).instrument(span.clone()).await;
        match &result {
            Ok(resp) => {
                span.record("http.status_code", resp.status().as_u16());
            }
            Err(e) => {
                span.record("error", tracing::field::display(e));
            }
        }
        result
    }
}
