//! Raw dataset records.
//!
//! The upstream dataset is loosely typed: identifiers arrive as numbers or
//! strings, `author` may be a list, a plain string, or a string holding an
//! encoded list, and any field may carry a value of the wrong type. All of
//! that is resolved here, while deserializing, so the rest of the crate only
//! ever sees canonical values.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Stable record identifier (integer or opaque string)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => write!(f, "{}", id),
        }
    }
}

/// One architectural work as published by the upstream data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "record_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    /// Free-form `"<lat>,<lng>"` string
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub coords: Option<String>,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Image file name, combined with `id` and `hash` into a thumbnail URL
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// Canonical author/firm names, trimmed and non-empty
    #[serde(default, deserialize_with = "author_names", skip_serializing_if = "Vec::is_empty")]
    pub author: Vec<String>,

    #[serde(default, deserialize_with = "text_list", skip_serializing_if = "Vec::is_empty")]
    pub city: Vec<String>,

    #[serde(default, deserialize_with = "text_list", skip_serializing_if = "Vec::is_empty")]
    pub country: Vec<String>,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub actualizacion: Option<String>,
}

/// The shapes a list-of-names field arrives in.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NameField {
    List(Vec<Value>),
    Text(String),
    Other(Value),
}

impl NameField {
    /// Resolve into names, decoding `"[...]"` strings when `decode_encoded`
    /// is set. Undecodable strings are kept whole.
    fn into_names(self, decode_encoded: bool) -> Vec<String> {
        let names = match self {
            NameField::List(items) => items.into_iter().filter_map(scalar_text).collect(),
            NameField::Text(text) => {
                let trimmed = text.trim();
                if decode_encoded && trimmed.starts_with('[') && trimmed.ends_with(']') {
                    match serde_json::from_str::<Vec<Value>>(trimmed) {
                        Ok(items) => items.into_iter().filter_map(scalar_text).collect(),
                        Err(_) => vec![text],
                    }
                } else {
                    vec![text]
                }
            }
            NameField::Other(value) => scalar_text(value).into_iter().collect(),
        };

        names
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect()
    }
}

/// Text form of a JSON value; `None` for null.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn author_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let field = Option::<NameField>::deserialize(deserializer)?;
    Ok(field.map(|f| f.into_names(true)).unwrap_or_default())
}

fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let field = Option::<NameField>::deserialize(deserializer)?;
    Ok(field.map(|f| f.into_names(false)).unwrap_or_default())
}

fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn record_id<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => Some(match n.as_i64() {
            Some(id) => RecordId::Int(id),
            None => RecordId::Text(n.to_string()),
        }),
        Value::String(s) if !s.is_empty() => Some(RecordId::Text(s)),
        _ => None,
    })
}
