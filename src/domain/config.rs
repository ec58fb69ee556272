use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::errors::ConfigError;

pub const IS_DEBUGGING: &str = "isDebugging";
pub const BUCKET_NAME: &str = "bucketName";
pub const ARGS: &str = "args";

/// Typed client configuration.
///
/// All three fields are required. Extra keys in the source map are ignored so
/// that a larger application config object can be passed as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub is_debugging: bool,
    pub bucket_name: String,
    pub args: S3Args,
}

impl ClientConfig {
    pub fn new(bucket_name: impl Into<String>, args: S3Args) -> Self {
        Self {
            is_debugging: false,
            bucket_name: bucket_name.into(),
            args,
        }
    }

    pub fn with_debugging(mut self, is_debugging: bool) -> Self {
        self.is_debugging = is_debugging;
        self
    }

    /// Build a config from a JSON map, checking the required keys up front.
    ///
    /// A key that is present but `null` counts as missing.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(ConfigError::InvalidField {
                    field: "config".to_string(),
                    message: format!("expected an object, got {}", json_kind(&other)),
                });
            }
        };

        for field in [IS_DEBUGGING, BUCKET_NAME, ARGS] {
            if map.get(field).map_or(true, Value::is_null) {
                return Err(ConfigError::MissingField(field));
            }
        }

        serde_json::from_value(Value::Object(map)).map_err(|e| ConfigError::InvalidField {
            field: "config".to_string(),
            message: e.to_string(),
        })
    }

    /// Parse a config from JSON text
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }
}

/// Opaque arguments for the underlying S3 client (region, credentials,
/// endpoint, client options). The facade passes them through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct S3Args(Map<String, Value>);

impl S3Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one argument
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for S3Args {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
