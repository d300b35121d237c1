
use serde_json::{Map, Value};

/// Unwraps a `json!` object literal into the map type taken by the client.
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}
