//! Resource enrichment.
//!
//! Every span a service emits carries the same resource attributes: whatever
//! the host's enrichment files provide, plus the service identity. Files are
//! merged in listed order (later keys win) and the identity is applied last, so
//! `service.name` and `service.version` can never be overridden by a file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use opentelemetry::KeyValue;
use opentelemetry_sdk::Resource;
use serde_json::{Map, Value};
use thiserror::Error;

/// Well-known enrichment file locations, in merge order.
pub const METADATA_FILES: [&str; 2] = [
    "dt_metadata.json",
    "/var/lib/dynatrace/enrichment/dt_metadata.json",
];

pub const SERVICE_NAME: &str = "service.name";
pub const SERVICE_VERSION: &str = "service.version";

/// Hardcoded identity of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    pub name: String,
    pub version: String,
}

impl ServiceIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// The default candidate paths as owned paths.
pub fn default_metadata_files() -> Vec<PathBuf> {
    METADATA_FILES.iter().map(PathBuf::from).collect()
}

/// Merge every existing enrichment file, in order.
///
/// Missing files are skipped silently. A file that exists but is not a JSON
/// object is logged and skipped.
pub fn load_metadata<P: AsRef<Path>>(paths: &[P]) -> BTreeMap<String, Value> {
    let mut merged = BTreeMap::new();

    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            continue;
        }

        match read_object(path) {
            Ok(object) => {
                tracing::debug!(path = %path.display(), keys = object.len(), "loaded enrichment metadata");
                merged.extend(object);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read enrichment metadata");
            }
        }
    }

    merged
}

/// Why an enrichment file was skipped.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("unreadable: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

fn read_object(path: &Path) -> Result<Map<String, Value>, MetadataError> {
    let raw = std::fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&raw)? {
        Value::Object(object) => Ok(object),
        other => Err(MetadataError::NotAnObject(kind_of(&other))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Resource attributes for a service: file metadata overlaid by identity.
pub fn enrichment_attributes<P: AsRef<Path>>(
    identity: &ServiceIdentity,
    paths: &[P],
) -> Vec<KeyValue> {
    let mut merged = load_metadata(paths);
    merged.insert(SERVICE_NAME.to_string(), Value::String(identity.name.clone()));
    merged.insert(SERVICE_VERSION.to_string(), Value::String(identity.version.clone()));

    merged
        .into_iter()
        .map(|(key, value)| to_key_value(key, value))
        .collect()
}

fn to_key_value(key: String, value: Value) -> KeyValue {
    match value {
        Value::String(s) => KeyValue::new(key, s),
        Value::Bool(b) => KeyValue::new(key, b),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => KeyValue::new(key, i),
            (None, Some(f)) => KeyValue::new(key, f),
            (None, None) => KeyValue::new(key, n.to_string()),
        },
        other => KeyValue::new(key, other.to_string()),
    }
}

/// Build the SDK resource attached to a tracer provider.
pub fn build_resource<P: AsRef<Path>>(identity: &ServiceIdentity, paths: &[P]) -> Resource {
    Resource::builder()
        .with_attributes(enrichment_attributes(identity, paths))
        .build()
}
