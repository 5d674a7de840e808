use std::fmt;

use secrecy::SecretString;
use serde_json::{Map, Value};

use crate::error::{Result, UploadError};

/// Provider credentials supplied with a single request
///
/// An opaque JSON object; each provider pulls out the fields it needs. Values
/// never appear in `Debug` output.
#[derive(Clone, Default)]
pub struct Credentials {
    fields: Map<String, Value>,
}

impl Credentials {
    /// Parse credentials from JSON text
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).map_err(|e| UploadError::InvalidCredentials(e.to_string()))?;

        Self::from_value(value)
    }

    /// Wrap an already-parsed JSON value, which must be an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(UploadError::InvalidCredentials(format!(
                "expected a JSON object, got {}",
                kind_of(&other)
            ))),
        }
    }

    /// Non-empty string field
    pub fn require(&self, field: &'static str) -> Result<&str> {
        self.fields
            .get(field)
            .and_then(Value::as_str)
            .filter(|value| !value.trim().is_empty())
            .ok_or(UploadError::MissingCredential(field))
    }

    /// Non-empty string field holding secret material
    pub fn require_secret(&self, field: &'static str) -> Result<SecretString> {
        self.require(field).map(SecretString::from)
    }

    /// Serialized key material: a JSON string, or an object re-serialized
    pub fn require_blob(&self, field: &'static str) -> Result<SecretString> {
        match self.fields.get(field) {
            Some(value @ Value::Object(_)) => Ok(SecretString::from(value.to_string())),
            _ => self.require_secret(field),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
