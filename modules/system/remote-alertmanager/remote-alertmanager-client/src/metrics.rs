use opentelemetry::KeyValue;
use opentelemetry::metrics::{Counter, Histogram, Meter};

const METER_NAME: &str = "remote-alertmanager-client";

/// Metric instruments shared by the client and its transport decorators.
#[derive(Clone)]
pub struct RemoteAlertmanagerMetrics {
    request_latency: Histogram<f64>,
    request_failures: Counter<u64>,
}

impl std::fmt::Debug for RemoteAlertmanagerMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteAlertmanagerMetrics").finish_non_exhaustive()
    }
}

impl RemoteAlertmanagerMetrics {
    /// Create instruments on the given meter.
    #[must_use]
    pub fn new(meter: &Meter) -> Self {
        Self {
            request_latency: meter
                .f64_histogram("remote_alertmanager_request_duration_seconds")
                .with_description("Latency of requests to the remote Alertmanager API")
                .with_unit("s")
                .build(),
            request_failures: meter
                .u64_counter("remote_alertmanager_request_failures_total")
                .with_description("Failed remote Alertmanager calls by error kind")
                .build(),
        }
    }

    /// Instruments on the process-wide meter provider.
    ///
    /// Without an installed provider this records into a no-op meter.
    #[must_use]
    pub fn global() -> Self {
        Self::new(&opentelemetry::global::meter(METER_NAME))
    }

    pub(crate) fn observe_request(
        &self,
        method: &str,
        route: &str,
        status_code: &str,
        seconds: f64,
    ) {
        self.request_latency.record(
            seconds,
            &[
                KeyValue::new("method", method.to_owned()),
                KeyValue::new("route", route.to_owned()),
                KeyValue::new("status_code", status_code.to_owned()),
            ],
        );
    }

    pub(crate) fn record_failure(&self, kind: &'static str) {
        self.request_failures.add(1, &[KeyValue::new("kind", kind)]);
    }
}
