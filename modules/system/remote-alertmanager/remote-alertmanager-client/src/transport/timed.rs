use std::time::Instant;

use super::Requester;
use crate::metrics::RemoteAlertmanagerMetrics;

/// Records the latency of every request, labelled by method, route and status code.
pub struct TimedRequester<R> {
    metrics: RemoteAlertmanagerMetrics,
    inner: R,
}

impl<R> TimedRequester<R> {
    #[must_use]
    pub fn new(metrics: RemoteAlertmanagerMetrics, inner: R) -> Self {
        Self { metrics, inner }
    }
}

#[async_trait::async_trait]
impl<R: Requester> Requester for TimedRequester<R> {
    async fn execute(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let method = request.method().clone();
        let route = request.url().path().to_owned();

        let start = Instant::now();
        let result = self.inner.execute(request).await;
        let elapsed = start.elapsed().as_secs_f64();

        let status_code = match &result {
            Ok(resp) => resp.status().as_str().to_owned(),
            Err(_) => "error".to_owned(),
        };
        self.metrics
            .observe_request(method.as_str(), &route, &status_code, elapsed);

        result
    }
}
