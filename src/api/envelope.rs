//! Response envelope decoding
//!
//! Every backend response is wrapped as `{success, data|message|errors}`.
//! The envelope is decoded once here into an [`ApiOutcome`] so callers never
//! inspect raw JSON.

use std::collections::BTreeMap;
use std::fmt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::utils::errors::{AdminError, Result};

/// Field-level validation messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|messages| messages.is_empty())
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First message of each field, in field-name order
    pub fn first_per_field(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().filter_map(|(field, messages)| {
            messages.first().map(|m| (field.as_str(), m.as_str()))
        })
    }

    /// Every message flattened into one newline-separated block
    pub fn joined(&self) -> String {
        self.0
            .values()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn from_value(value: &Value) -> Self {
        let mut errors = FieldErrors::default();
        if let Value::Object(map) = value {
            for (field, messages) in map {
                match messages {
                    Value::Array(items) => {
                        for item in items {
                            errors.push(field.clone(), scalar_text(item));
                        }
                    }
                    other => errors.push(field.clone(), scalar_text(other)),
                }
            }
        }
        errors
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Decoded result of one backend call
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    Ok(T),
    ValidationFailure(FieldErrors),
    Failure(Option<String>),
}

impl<T> ApiOutcome<T> {
    /// Convert into the crate error taxonomy, using `fallback` when the
    /// backend gave no message
    pub fn into_result(self, fallback: &str) -> Result<T> {
        match self {
            ApiOutcome::Ok(value) => Ok(value),
            ApiOutcome::ValidationFailure(errors) => Err(AdminError::Validation(errors)),
            ApiOutcome::Failure(message) => Err(AdminError::server(message, fallback)),
        }
    }
}

/// Message-only answer to a mutation (delete, bulk approve, send message)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Acknowledgement {
    pub message: Option<String>,
}

impl Acknowledgement {
    pub fn message_or(&self, fallback: &str) -> String {
        self.message.clone().unwrap_or_else(|| fallback.to_string())
    }
}

/// Parsed `{success, ...}` wrapper
#[derive(Debug, Clone)]
pub struct Envelope {
    success: bool,
    message: Option<String>,
    errors: Option<FieldErrors>,
    body: Map<String, Value>,
}

impl Envelope {
    /// Parse raw bytes; `None` when the body is not a JSON object with a
    /// boolean `success`
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let value: Value = serde_json::from_slice(bytes).ok()?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut body) = value else {
            return None;
        };

        let success = match body.remove("success")? {
            Value::Bool(flag) => flag,
            Value::Number(n) => n.as_i64() == Some(1),
            _ => return None,
        };

        // Some endpoints answer with `Message`
        let message = ["message", "Message"]
            .iter()
            .filter_map(|key| body.get(*key))
            .find_map(|v| match v {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                _ => None,
            });

        let errors = body
            .get("errors")
            .map(FieldErrors::from_value)
            .filter(|errors| !errors.is_empty());

        Some(Self { success, message, errors, body })
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Decode the payload found under the first present key of `keys`
    pub fn into_outcome<T: DeserializeOwned>(mut self, keys: &[&str]) -> Result<ApiOutcome<T>> {
        if !self.success {
            return Ok(match self.errors {
                Some(errors) => ApiOutcome::ValidationFailure(errors),
                None => ApiOutcome::Failure(self.message),
            });
        }

        let payload = keys
            .iter()
            .find_map(|key| self.body.remove(*key))
            .unwrap_or(Value::Null);

        match serde_json::from_value::<T>(payload) {
            Ok(value) => Ok(ApiOutcome::Ok(value)),
            Err(e) => Err(AdminError::Server {
                message: format!("Unexpected response shape (expected {:?}): {}", keys, e),
            }),
        }
    }

    pub fn into_acknowledgement(self) -> ApiOutcome<Acknowledgement> {
        match (self.success, self.errors) {
            (true, _) => ApiOutcome::Ok(Acknowledgement { message: self.message }),
            (false, Some(errors)) => ApiOutcome::ValidationFailure(errors),
            (false, None) => ApiOutcome::Failure(self.message),
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
