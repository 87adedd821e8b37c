use std::sync::{Arc, Mutex};

use serde_json::{json, Map, Value};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use vigil_check::aggregator::{Aggregator, MetricKind, ServiceCheckStatus};
use vigil_check::context::CheckContext;
use vigil_check::identity::{CheckConfig, CheckIdentity, Instance};
use vigil_check::log_forward::{ForwardLayer, LogSink};
use vigil_check::runner::{Check, CheckFailure, CheckRunner, RunResult};

#[derive(Default)]
struct RecordingAggregator {
    metrics: Mutex<Vec<(MetricKind, String, f64, Vec<String>)>>,
    service_checks: Mutex<Vec<(String, ServiceCheckStatus, String)>>,
    events: Mutex<Vec<Map<String, Value>>>,
}

impl Aggregator for RecordingAggregator {
    fn submit_metric(
        &self,
        _identity: &CheckIdentity,
        kind: MetricKind,
        name: &str,
        value: f64,
        tags: &[String],
    ) {
        self.metrics
            .lock()
            .unwrap()
            .push((kind, name.to_string(), value, tags.to_vec()));
    }

    fn submit_service_check(
        &self,
        _identity: &CheckIdentity,
        name: &str,
        status: ServiceCheckStatus,
        _tags: &[String],
        message: &str,
    ) {
        self.service_checks
            .lock()
            .unwrap()
            .push((name.to_string(), status, message.to_string()));
    }

    fn submit_event(&self, _identity: &CheckIdentity, event: Map<String, Value>) {
        self.events.lock().unwrap().push(event);
    }
}

#[derive(Default)]
struct RecordingSink {
    records: Mutex<Vec<(String, Level)>>,
}

struct SinkHandle(Arc<RecordingSink>);

impl LogSink for SinkHandle {
    fn log(&self, _source: &str, message: &str, level: Level) {
        self.0
            .records
            .lock()
            .unwrap()
            .push((message.to_string(), level));
    }
}

struct DiskCheck;

impl Check for DiskCheck {
    fn check(&mut self, ctx: &CheckContext<'_>, instance: Instance) -> anyhow::Result<()> {
        let device = instance
            .get("device")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow::anyhow!("instance is missing 'device'"))?;

        ctx.gauge(
            "Disk Used (percent)",
            63.0,
            &[json!(format!("device:{device}")), json!(1)],
        );
        ctx.service_check(
            "disk.can_read",
            ServiceCheckStatus::Ok,
            &[],
            "",
        );

        let mut event = Map::new();
        event.insert("msg_title".into(), json!("disk check ran"));
        event.insert("timestamp".into(), json!("1709251200"));
        event.insert("aggregation_key".into(), json!(7));
        ctx.event(event);

        Ok(())
    }
}

fn disk_identity() -> CheckIdentity {
    let mut instance = Instance::new();
    instance.insert("device".into(), json!("sda1"));
    CheckIdentity::from_config(CheckConfig {
        name: "disk".into(),
        init_config: Map::new(),
        instances: vec![instance],
    })
    .unwrap()
}

#[test]
fn full_cycle_submits_normalized_values() {
    let aggregator = Arc::new(RecordingAggregator::default());
    let mut runner = CheckRunner::new(
        disk_identity(),
        Box::new(DiskCheck),
        Arc::clone(&aggregator) as Arc<dyn Aggregator>,
    );

    let result = runner.run();
    assert!(result.is_success());
    assert_eq!(result.to_wire(), "");

    let metrics = aggregator.metrics.lock().unwrap();
    assert_eq!(metrics.len(), 1);
    let (kind, name, value, tags) = &metrics[0];
    assert_eq!(*kind, MetricKind::Gauge);
    assert_eq!(name, "Disk_Used_percent");
    assert!((value - 63.0).abs() < f64::EPSILON);
    assert_eq!(tags, &["device:sda1", "1"]);

    let service_checks = aggregator.service_checks.lock().unwrap();
    assert_eq!(service_checks.len(), 1);
    assert_eq!(service_checks[0].0, "disk.can_read");
    assert_eq!(service_checks[0].1, ServiceCheckStatus::Ok);

    let events = aggregator.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["timestamp"], json!(1_709_251_200));
    assert_eq!(events[0]["aggregation_key"], json!("7"));
}

#[test]
fn misconfigured_instance_becomes_a_failure_payload() {
    let mut instance = Instance::new();
    instance.insert("path".into(), json!("/"));
    let identity = CheckIdentity::from_config(CheckConfig {
        name: "disk".into(),
        init_config: Map::new(),
        instances: vec![instance],
    })
    .unwrap();

    let aggregator = Arc::new(RecordingAggregator::default());
    let mut runner = CheckRunner::new(
        identity,
        Box::new(DiskCheck),
        Arc::clone(&aggregator) as Arc<dyn Aggregator>,
    );

    let result = runner.run();
    let wire = result.to_wire();
    let parsed: Vec<CheckFailure> = serde_json::from_str(&wire).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].message, "instance is missing 'device'");
    assert!(!parsed[0].traceback.is_empty());

    assert!(aggregator.metrics.lock().unwrap().is_empty());
}

#[test]
fn deprecated_increment_warns_exactly_once_per_identity() {
    struct IncrementTwice;

    impl Check for IncrementTwice {
        #[allow(deprecated)]
        fn check(&mut self, ctx: &CheckContext<'_>, _instance: Instance) -> anyhow::Result<()> {
            ctx.increment("pages.served", 1.0, &[]);
            ctx.increment("pages.served", 1.0, &[]);
            Ok(())
        }
    }

    let sink = Arc::new(RecordingSink::default());
    let subscriber = tracing_subscriber::registry()
        .with(ForwardLayer::new(Box::new(SinkHandle(Arc::clone(&sink)))));

    tracing::subscriber::with_default(subscriber, || {
        let aggregator = Arc::new(RecordingAggregator::default());
        let mut runner = CheckRunner::new(
            disk_identity(),
            Box::new(IncrementTwice),
            Arc::clone(&aggregator) as Arc<dyn Aggregator>,
        );
        assert!(runner.run().is_success());

        let metrics = aggregator.metrics.lock().unwrap();
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].1, "pages.served_count");
    });

    let records = sink.records.lock().unwrap();
    let deprecations: Vec<_> = records
        .iter()
        .filter(|(message, level)| {
            *level == Level::WARN && message.contains("DEPRECATION NOTICE")
        })
        .collect();
    assert_eq!(deprecations.len(), 1);
}

#[test]
fn run_result_shape_matches_host_contract() {
    let failure = RunResult::Failure(CheckFailure {
        message: "m".into(),
        traceback: "t".into(),
    });
    let wire = failure.to_wire();
    let parsed: Value = serde_json::from_str(&wire).unwrap();
    assert_eq!(parsed, json!([{"message": "m", "traceback": "t"}]));
}
