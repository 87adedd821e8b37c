use serde_json::Value;

pub fn normalize_tags(tags: &[Value]) -> Vec<String> {
    let mut normalized = Vec::with_capacity(tags.len());
    for tag in tags {
        match tag {
            Value::String(s) => normalized.push(s.clone()),
            Value::Number(n) => normalized.push(n.to_string()),
            Value::Bool(b) => normalized.push(b.to_string()),
            other => {
                tracing::warn!(tag = %other, "tag has no text form, ignoring tag");
            }
        }
    }
    normalized
}
