use serde_json::{Map, Value};

use vigil_common::tags::normalize_tags;

pub fn canonicalize_event(mut event: Map<String, Value>) -> Option<Map<String, Value>> {
    if let Some(tags) = event.get("tags").filter(|v| !v.is_null()) {
        let normalized = match tags {
            Value::Array(items) => normalize_tags(items),
            other => {
                tracing::warn!(tags = %other, "event 'tags' is not a sequence, can't submit event");
                return None;
            }
        };
        event.insert(
            "tags".to_string(),
            Value::Array(normalized.into_iter().map(Value::String).collect()),
        );
    }

    if let Some(ts) = event.get("timestamp").filter(|v| !v.is_null()) {
        let coerced = match coerce_timestamp(ts) {
            Some(v) => v,
            None => {
                tracing::warn!(timestamp = %ts, "event 'timestamp' is not an integer, can't submit event");
                return None;
            }
        };
        event.insert("timestamp".to_string(), Value::from(coerced));
    }

    if let Some(key) = event.get("aggregation_key").filter(|v| !v.is_null()) {
        let text = match key {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        event.insert("aggregation_key".to_string(), Value::String(text));
    }

    Some(event)
}

fn coerce_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
