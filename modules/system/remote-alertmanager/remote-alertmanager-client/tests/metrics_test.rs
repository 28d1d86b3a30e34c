use httpmock::prelude::*;
use opentelemetry::metrics::MeterProvider as _;
use opentelemetry_sdk::metrics::data::{AggregatedMetrics, Metric, MetricData, ResourceMetrics};
use opentelemetry_sdk::metrics::{InMemoryMetricExporter, PeriodicReader, SdkMeterProvider};
use remote_alertmanager_client::{
    AlertmanagerClientV1, RemoteAlertmanagerClient, RemoteAlertmanagerConfig,
    RemoteAlertmanagerError, RemoteAlertmanagerMetrics,
};
use serde_json::json;

fn meter_provider() -> (SdkMeterProvider, InMemoryMetricExporter) {
    let exporter = InMemoryMetricExporter::default();
    let provider = SdkMeterProvider::builder()
        .with_reader(PeriodicReader::builder(exporter.clone()).build())
        .build();
    (provider, exporter)
}

fn collect(
    provider: &SdkMeterProvider,
    exporter: &InMemoryMetricExporter,
) -> Vec<ResourceMetrics> {
    provider.force_flush().unwrap();
    exporter.get_finished_metrics().unwrap()
}

fn lookup<'a>(recorded: &'a [ResourceMetrics], name: &str) -> Option<&'a Metric> {
    recorded
        .iter()
        .flat_map(|resource| resource.scope_metrics())
        .flat_map(|scope| scope.metrics())
        .find(|metric| metric.name() == name)
}

fn find<'a>(recorded: &'a [ResourceMetrics], name: &str) -> &'a Metric {
    lookup(recorded, name).unwrap_or_else(|| panic!("metric {name} was not recorded"))
}

fn has_attribute<'a>(
    mut attributes: impl Iterator<Item = &'a opentelemetry::KeyValue>,
    key: &str,
    value: &str,
) -> bool {
    attributes.any(|kv| kv.key.as_str() == key && kv.value.as_str() == value)
}

#[tokio::test]
async fn test_records_latency_and_failures() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/v1/grafana/config");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"status": "pending"}));
        })
        .await;

    let (provider, exporter) = meter_provider();
    let metrics = RemoteAlertmanagerMetrics::new(&provider.meter("remote-alertmanager-test"));
    let config = RemoteAlertmanagerConfig::new(&server.base_url(), "tenant-1").unwrap();
    let client = RemoteAlertmanagerClient::from_config_with_metrics(config, metrics).unwrap();

    let err = client.delete_grafana_alertmanager_config().await.unwrap_err();
    assert!(matches!(err, RemoteAlertmanagerError::UnknownStatus(_)));

    let recorded = collect(&provider, &exporter);

    let latency = find(&recorded, "remote_alertmanager_request_duration_seconds");
    let AggregatedMetrics::F64(MetricData::Histogram(histogram)) = latency.data() else {
        panic!("latency is not an f64 histogram");
    };
    let point = histogram.data_points().next().unwrap();
    assert_eq!(point.count(), 1);
    assert!(has_attribute(point.attributes(), "method", "DELETE"));
    assert!(has_attribute(point.attributes(), "route", "/api/v1/grafana/config"));
    assert!(has_attribute(point.attributes(), "status_code", "200"));

    let failures = find(&recorded, "remote_alertmanager_request_failures_total");
    let AggregatedMetrics::U64(MetricData::Sum(sum)) = failures.data() else {
        panic!("failures is not a u64 counter");
    };
    let point = sum.data_points().next().unwrap();
    assert_eq!(point.value(), 1);
    assert!(has_attribute(point.attributes(), "kind", "unknown_status"));
}

#[tokio::test]
async fn test_successful_call_records_no_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/grafana/receivers");
            then.status(200)
                .header("Content-Type", "application/json")
                .body("[]");
        })
        .await;

    let (provider, exporter) = meter_provider();
    let metrics = RemoteAlertmanagerMetrics::new(&provider.meter("remote-alertmanager-test"));
    let config = RemoteAlertmanagerConfig::new(&server.base_url(), "tenant-1").unwrap();
    let client = RemoteAlertmanagerClient::from_config_with_metrics(config, metrics).unwrap();

    assert!(client.get_receivers().await.unwrap().is_empty());

    let recorded = collect(&provider, &exporter);
    find(&recorded, "remote_alertmanager_request_duration_seconds");
    assert!(lookup(&recorded, "remote_alertmanager_request_failures_total").is_none());
}
