//! Encoding of finished spans as OTLP/JSON.
//!
//! Each exported batch becomes one self-contained `resourceSpans` document, so
//! the trace file can be fed line by line to any OTLP/JSON consumer.

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as JsonValue};
use std::time::{SystemTime, UNIX_EPOCH};

/// Instrumentation scope recorded on every batch.
pub const SCOPE_NAME: &str = "termfolio";

/// Builds OTLP/JSON documents for a fixed resource.
pub struct OtlpEncoder {
    resource: Resource,
}

impl OtlpEncoder {
    #[must_use]
    pub const fn new(resource: Resource) -> Self {
        Self { resource }
    }

    pub fn set_resource(&mut self, resource: Resource) {
        self.resource = resource;
    }

    /// One `resourceSpans` document for `batch`.
    #[must_use]
    pub fn encode_batch(&self, batch: &[SpanData]) -> JsonValue {
        let resource: Vec<JsonValue> = self.resource.iter().map(|(key, value)| attribute(key.as_str(), value)).collect();
        let spans: Vec<JsonValue> = batch.iter().map(encode_span).collect();

        json!({
            "resourceSpans": [{
                "resource": { "attributes": resource },
                "scopeSpans": [{
                    "scope": { "name": SCOPE_NAME, "version": env!("CARGO_PKG_VERSION") },
                    "spans": spans,
                }],
            }],
        })
    }
}

impl std::fmt::Debug for OtlpEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtlpEncoder").field("resource_len", &self.resource.len()).finish()
    }
}

fn encode_span(span: &SpanData) -> JsonValue {
    let context = &span.span_context;
    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };
    let (code, message) = match &span.status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    };

    json!({
        "traceId": format!("{:032x}", context.trace_id()),
        "spanId": format!("{:016x}", context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "kind": kind_code(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes(&span.attributes),
        "droppedAttributesCount": span.dropped_attributes_count,
        "events": span.events.iter().map(encode_event).collect::<Vec<_>>(),
        "links": span.links.iter().map(encode_link).collect::<Vec<_>>(),
        "status": { "code": code, "message": message },
    })
}

fn encode_event(event: &Event) -> JsonValue {
    json!({
        "timeUnixNano": unix_nanos(event.timestamp),
        "name": event.name,
        "attributes": attributes(&event.attributes),
    })
}

fn encode_link(link: &Link) -> JsonValue {
    json!({
        "traceId": format!("{:032x}", link.span_context.trace_id()),
        "spanId": format!("{:016x}", link.span_context.span_id()),
        "attributes": attributes(&link.attributes),
    })
}

const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn attributes(pairs: &[KeyValue]) -> Vec<JsonValue> {
    pairs.iter().map(|kv| attribute(kv.key.as_str(), &kv.value)).collect()
}

fn attribute(key: &str, value: &Value) -> JsonValue {
    json!({ "key": key, "value": any_value(value) })
}

/// OTLP `AnyValue`; 64-bit integers are strings per the JSON mapping.
fn any_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.as_str() }),
        Value::Array(_) => json!({ "stringValue": value.to_string() }),
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or(0).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn scalar_values_follow_the_json_mapping() {
        assert_eq!(any_value(&Value::I64(42)), json!({ "intValue": "42" }));
        assert_eq!(any_value(&Value::Bool(true)), json!({ "boolValue": true }));
        assert_eq!(any_value(&Value::from("dark")), json!({ "stringValue": "dark" }));
    }

    #[test]
    fn empty_batch_still_carries_resource_and_scope() {
        let encoder = OtlpEncoder::new(Resource::new(vec![KeyValue::new("service.name", "termfolio")]));
        let doc = encoder.encode_batch(&[]);
        let resource_spans = &doc["resourceSpans"][0];
        assert_eq!(resource_spans["resource"]["attributes"][0]["key"], "service.name");
        assert_eq!(resource_spans["scopeSpans"][0]["scope"]["name"], SCOPE_NAME);
        assert_eq!(resource_spans["scopeSpans"][0]["spans"], json!([]));
    }

    #[test]
    fn timestamps_are_nanosecond_strings() {
        assert_eq!(unix_nanos(UNIX_EPOCH + Duration::from_millis(2)), "2000000");
        assert_eq!(unix_nanos(UNIX_EPOCH), "0");
    }
}
