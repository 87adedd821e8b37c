use serde_json::{Map, Value};

use crate::identity::CheckIdentity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Gauge,
    Count,
    MonotonicCount,
    Rate,
    Histogram,
    Historate,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gauge => "gauge",
            Self::Count => "count",
            Self::MonotonicCount => "monotonic_count",
            Self::Rate => "rate",
            Self::Histogram => "histogram",
            Self::Historate => "historate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ServiceCheckStatus {
    Ok = 0,
    Warning = 1,
    Critical = 2,
}

impl ServiceCheckStatus {
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

pub trait Aggregator: Send + Sync {
    fn submit_metric(
        &self,
        identity: &CheckIdentity,
        kind: MetricKind,
        name: &str,
        value: f64,
        tags: &[String],
    );

    fn submit_service_check(
        &self,
        identity: &CheckIdentity,
        name: &str,
        status: ServiceCheckStatus,
        tags: &[String],
        message: &str,
    );

    fn submit_event(&self, identity: &CheckIdentity, event: Map<String, Value>);
}
