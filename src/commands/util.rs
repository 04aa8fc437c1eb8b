use nu_plugin::EvaluatedCall;
use nu_protocol::{LabeledError, PipelineData, Record, Signature, Span, SyntaxShape, Value};
use serde_json::Value as JsonValue;

use crate::algo::filter::Filter;
use crate::error::Error;

/// Collect the pipeline into JSON rows for the `ops` layer.
///
/// A single record becomes a one-row table; `nothing` becomes no rows.
pub fn input_rows(input: PipelineData) -> Vec<JsonValue> {
    match input {
        PipelineData::Value(Value::Nothing { .. }, _) => vec![],
        PipelineData::Value(value @ Value::Record { .. }, _) => vec![to_json(&value)],
        other => other.into_iter().map(|v| to_json(&v)).collect(),
    }
}

/// Convert a nu Value to JSON. Dates become RFC 3339 strings; values with no
/// JSON counterpart become `null`.
pub fn to_json(value: &Value) -> JsonValue {
    match value {
        Value::Bool { val, .. } => JsonValue::Bool(*val),
        Value::Int { val, .. } => JsonValue::from(*val),
        Value::Float { val, .. } => serde_json::Number::from_f64(*val)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::String { val, .. } => JsonValue::String(val.clone()),
        Value::Date { val, .. } => JsonValue::String(val.to_rfc3339()),
        Value::List { vals, .. } => JsonValue::Array(vals.iter().map(to_json).collect()),
        Value::Record { val, .. } => JsonValue::Object(
            val.iter()
                .map(|(k, v)| (k.clone(), to_json(v)))
                .collect(),
        ),
        _ => JsonValue::Null,
    }
}

/// Convert a JSON value to a nu Value.
pub fn from_json(val: &JsonValue, span: Span) -> Value {
    match val {
        JsonValue::Null => Value::nothing(span),
        JsonValue::Bool(b) => Value::bool(*b, span),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::int(i, span)
            } else if let Some(f) = n.as_f64() {
                Value::float(f, span)
            } else {
                Value::string(n.to_string(), span)
            }
        }
        JsonValue::String(s) => Value::string(s, span),
        JsonValue::Array(arr) => Value::list(arr.iter().map(|v| from_json(v, span)).collect(), span),
        JsonValue::Object(map) => {
            let mut record = Record::new();
            for (k, v) in map {
                record.push(k, from_json(v, span));
            }
            Value::record(record, span)
        }
    }
}

/// Wrap an `ops` result as pipeline output.
pub fn output(val: &JsonValue, span: Span) -> PipelineData {
    PipelineData::Value(from_json(val, span), None)
}

/// Attach the call head to a crate error.
pub fn labeled(err: Error, span: Span) -> LabeledError {
    LabeledError::new(err.to_string()).with_label("sentiment error", span)
}

/// The row-selection flags every command shares.
pub fn filter_flags(signature: Signature) -> Signature {
    signature
        .named(
            "type",
            SyntaxShape::String,
            "Content type: post, comment, both (default: both)",
            Some('t'),
        )
        .named(
            "page",
            SyntaxShape::String,
            "Topic key to keep, or ALL (default: ALL)",
            Some('p'),
        )
        .named(
            "sentiment",
            SyntaxShape::String,
            "Sentiment tab: all, positive, negative (default: all)",
            Some('s'),
        )
}

pub fn filter_from_call(call: &EvaluatedCall) -> Result<Filter, LabeledError> {
    let content_type: String = call.get_flag("type")?.unwrap_or_else(|| "both".into());
    let page: String = call.get_flag("page")?.unwrap_or_else(|| "ALL".into());
    let sentiment: String = call.get_flag("sentiment")?.unwrap_or_else(|| "all".into());
    Filter::parse(&content_type, &page, &sentiment).map_err(|e| labeled(e, call.head))
}

/// Read a non-negative integer flag.
pub fn usize_flag(call: &EvaluatedCall, name: &str) -> Result<Option<usize>, LabeledError> {
    match call.get_flag::<i64>(name)? {
        None => Ok(None),
        Some(v) => usize::try_from(v).map(Some).map_err(|_| {
            LabeledError::new(format!("--{name} must not be negative"))
                .with_label("negative value", call.head)
        }),
    }
}
