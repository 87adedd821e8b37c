use serde_json::{Map, Value};

use vigil_common::naming::normalize_name;
use vigil_common::tags::normalize_tags;

use crate::aggregator::{Aggregator, MetricKind, ServiceCheckStatus};
use crate::event::canonicalize_event;
use crate::gate::WarnOnce;
use crate::identity::CheckIdentity;

pub struct CheckContext<'a> {
    identity: &'a CheckIdentity,
    aggregator: &'a dyn Aggregator,
    increment_deprecation: &'a WarnOnce,
}

impl<'a> CheckContext<'a> {
    pub(crate) fn new(
        identity: &'a CheckIdentity,
        aggregator: &'a dyn Aggregator,
        increment_deprecation: &'a WarnOnce,
    ) -> Self {
        Self {
            identity,
            aggregator,
            increment_deprecation,
        }
    }

    pub fn identity(&self) -> &CheckIdentity {
        self.identity
    }

    pub fn gauge(&self, name: &str, value: f64, tags: &[Value]) {
        self.submit(MetricKind::Gauge, name, value, tags);
    }

    pub fn count(&self, name: &str, value: f64, tags: &[Value]) {
        self.submit(MetricKind::Count, name, value, tags);
    }

    pub fn monotonic_count(&self, name: &str, value: f64, tags: &[Value]) {
        self.submit(MetricKind::MonotonicCount, name, value, tags);
    }

    pub fn rate(&self, name: &str, value: f64, tags: &[Value]) {
        self.submit(MetricKind::Rate, name, value, tags);
    }

    pub fn histogram(&self, name: &str, value: f64, tags: &[Value]) {
        self.submit(MetricKind::Histogram, name, value, tags);
    }

    pub fn historate(&self, name: &str, value: f64, tags: &[Value]) {
        self.submit(MetricKind::Historate, name, value, tags);
    }

    #[deprecated(note = "submit with `count` instead; this sends `<name>_count` via count")]
    pub fn increment(&self, name: &str, value: f64, tags: &[Value]) {
        self.log_increment_deprecation();
        self.count(&format!("{name}_count"), value, tags);
    }

    #[deprecated(note = "submit with `count` instead; this sends `<name>_count` via count")]
    pub fn decrement(&self, name: &str, value: f64, tags: &[Value]) {
        self.log_increment_deprecation();
        self.count(&format!("{name}_count"), value, tags);
    }

    pub fn service_check(
        &self,
        name: &str,
        status: ServiceCheckStatus,
        tags: &[Value],
        message: &str,
    ) {
        let tags = normalize_tags(tags);
        self.aggregator
            .submit_service_check(self.identity, name, status, &tags, message);
    }

    pub fn event(&self, event: Map<String, Value>) {
        if let Some(event) = canonicalize_event(event) {
            self.aggregator.submit_event(self.identity, event);
        }
    }

    fn submit(&self, kind: MetricKind, name: &str, value: f64, tags: &[Value]) {
        let name = normalize_name(name, None, false);
        let tags = normalize_tags(tags);
        self.aggregator
            .submit_metric(self.identity, kind, &name, value, &tags);
    }

    fn log_increment_deprecation(&self) {
        if self.increment_deprecation.fire() {
            tracing::warn!(
                check = self.identity.name(),
                "DEPRECATION NOTICE: increment/decrement are deprecated, sending these \
                 metrics with count and a '_count' suffix instead"
            );
        }
    }
}
