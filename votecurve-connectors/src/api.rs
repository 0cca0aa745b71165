//! Wire shapes of the form-submission API
//!
//! Decoding is lenient in the same way the engine is: a listing that is not a
//! JSON array reads as empty, and entries that do not match the expected shape
//! are skipped. Only a body that is not JSON at all is an error.

use serde::Deserialize;
use serde_json::{Map, Value};
use votecurve_core::{normalize::parse_timestamp, RawRecord, RawValue};

use crate::SourceError;

/// A form defined on the site
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Form {
    /// Form id, used in the submissions path
    pub id: String,
    /// Form name as declared in the page markup
    pub name: String,
    /// Creation time, RFC 3339
    #[serde(default)]
    pub created_at: Option<String>,
}

/// One submission of a form
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Submission {
    /// Creation time, RFC 3339
    #[serde(default)]
    pub created_at: Option<String>,
    /// Submitted fields
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Submission {
    /// Convert into the engine's raw record; validation happens later
    pub fn into_record(self) -> RawRecord {
        RawRecord {
            created_at: self.created_at,
            value: self.data.get("value").map(raw_value),
            choice: self.data.get("choice").map(raw_value),
        }
    }
}

fn raw_value(value: &Value) -> RawValue {
    match value {
        Value::Null => RawValue::Null,
        Value::Number(n) => n.as_f64().map_or(RawValue::Unsupported, RawValue::Number),
        Value::String(s) => RawValue::Text(s.clone()),
        _ => RawValue::Unsupported,
    }
}

/// Most recently created form named `name`
pub fn latest_form<'a>(forms: &'a [Form], name: &str) -> Option<&'a Form> {
    forms
        .iter()
        .filter(|f| f.name == name)
        .max_by_key(|f| f.created_at.as_deref().and_then(|t| parse_timestamp(t).ok()))
}

/// Decode a form listing
pub fn decode_forms(body: &str) -> Result<Vec<Form>, SourceError> {
    decode_list(body)
}

/// Decode one page of submissions
pub fn decode_submissions(body: &str) -> Result<Vec<Submission>, SourceError> {
    decode_list(body)
}

fn decode_list<T>(body: &str) -> Result<Vec<T>, SourceError>
where
    T: for<'de> Deserialize<'de>,
{
    let value: Value = serde_json::from_str(body).map_err(|e| SourceError::Decode(e.to_string()))?;

    match value {
        Value::Array(items) => {
            let total = items.len();
            let decoded: Vec<T> = items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect();
            if decoded.len() < total {
                log::debug!("skipped {} malformed entries", total - decoded.len());
            }
            Ok(decoded)
        }
        other => {
            log::warn!("expected a JSON array, got {}", kind(&other));
            Ok(Vec::new())
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
