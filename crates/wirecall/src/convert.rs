//! JSON <-> msgpack value bridging for the CLI surface.
//!
//! Method arguments are given on the command line as JSON literals and
//! results are printed back as JSON. The bridge is lossy only where msgpack
//! is richer than JSON: binary payloads render as byte arrays and ext
//! values as a tagged object.

use wirecall_proto::Value;

/// Parse one command-line argument into a msgpack value.
///
/// Valid JSON literals map structurally; anything that does not parse as
/// JSON is passed through as a plain string, so `add 3 8` and
/// `greet hello` both do the obvious thing.
pub fn parse_arg(input: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(input) {
        Ok(json) => json_to_value(json),
        Err(_) => Value::from(input),
    }
}

pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Nil,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Value::from(v)
            } else if let Some(v) = n.as_u64() {
                Value::from(v)
            } else {
                Value::from(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => Value::from(s),
        serde_json::Value::Array(items) => {
            Value::Array(items.into_iter().map(json_to_value).collect())
        }
        serde_json::Value::Object(fields) => Value::Map(
            fields
                .into_iter()
                .map(|(k, v)| (Value::from(k), json_to_value(v)))
                .collect(),
        ),
    }
}

pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Nil => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(n) => {
            if let Some(v) = n.as_i64() {
                serde_json::Value::from(v)
            } else if let Some(v) = n.as_u64() {
                serde_json::Value::from(v)
            } else {
                serde_json::Value::Null
            }
        }
        Value::F32(f) => serde_json::Number::from_f64(f64::from(*f))
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::F64(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::from(s.as_str().unwrap_or_default()),
        Value::Binary(bytes) => serde_json::Value::Array(
            bytes.iter().map(|b| serde_json::Value::from(*b)).collect(),
        ),
        Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(value_to_json).collect())
        }
        Value::Map(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(k, v)| {
                    let key = k
                        .as_str()
                        .map(str::to_owned)
                        .unwrap_or_else(|| k.to_string());
                    (key, value_to_json(v))
                })
                .collect(),
        ),
        Value::Ext(tag, data) => serde_json::json!({
            "ext": tag,
            "data": data,
        }),
    }
}
