//! Response envelope shared by every admin endpoint
//!
//! Bodies look like `{ message?, error_code?, data? }`. A transport-level
//! success can still carry a business failure in `error_code`, so callers
//! must check [`ResponseEnvelope::business_error_code`] before trusting
//! `data`.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default, deserialize_with = "message_text", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "error_code_text", skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Top-level fields outside the envelope (login/refresh bodies use these)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResponseEnvelope {
    /// Decode a raw body. An empty body is an empty envelope; a JSON value
    /// that is not an object becomes `data`.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(map) => serde_json::from_value(Value::Object(map)),
            Value::Null => Ok(Self::default()),
            other => Ok(Self { data: Some(other), ..Self::default() }),
        }
    }

    /// The business error code, only when present and non-empty.
    pub fn business_error_code(&self) -> Option<&str> {
        self.error_code.as_deref().filter(|code| !code.is_empty())
    }

    /// The message, only when present and non-empty.
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_deref().filter(|message| !message.is_empty())
    }

    /// Decode the `data` field (`null` when absent).
    pub fn data_as<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(self.data.clone().unwrap_or(Value::Null))
    }

    /// Decode the whole body, envelope fields included.
    pub fn body_as<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(serde_json::to_value(self)?)
    }
}

/// Accepts a string or a list of strings (validation errors arrive as lists).
fn message_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        Some(Value::Array(items)) => {
            let parts: Vec<String> = items
                .into_iter()
                .map(|item| match item {
                    Value::String(text) => text,
                    other => other.to_string(),
                })
                .collect();
            Some(parts.join(", "))
        }
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    })
}

/// Accepts string or numeric codes; falsy values (`""`, `0`, `false`) mean
/// "no error".
fn error_code_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(code)) if !code.is_empty() => Some(code),
        Some(Value::Number(number)) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        Some(Value::Bool(true)) => Some("true".to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_body_is_empty_envelope() {
        let envelope = ResponseEnvelope::from_slice(b"").unwrap();
        assert_eq!(envelope, ResponseEnvelope::default());
    }

    #[test]
    fn business_code_requires_non_empty_value() {
        let envelope =
            ResponseEnvelope::from_slice(br#"{"message":"ok","error_code":""}"#).unwrap();
        assert!(envelope.business_error_code().is_none());

        let envelope =
            ResponseEnvelope::from_slice(br#"{"message":"dup","error_code":"TIER_EXISTS"}"#)
                .unwrap();
        assert_eq!(envelope.business_error_code(), Some("TIER_EXISTS"));
    }

    #[test]
    fn numeric_error_codes_are_stringified() {
        let envelope = ResponseEnvelope::from_slice(br#"{"error_code":4001}"#).unwrap();
        assert_eq!(envelope.business_error_code(), Some("4001"));

        let envelope = ResponseEnvelope::from_slice(br#"{"error_code":0}"#).unwrap();
        assert!(envelope.business_error_code().is_none());
    }

    #[test]
    fn message_lists_are_joined() {
        let envelope = ResponseEnvelope::from_slice(
            br#"{"message":["email must be an email","password is required"]}"#,
        )
        .unwrap();
        assert_eq!(
            envelope.message_text(),
            Some("email must be an email, password is required")
        );
    }

    #[test]
    fn non_object_body_becomes_data() {
        let envelope = ResponseEnvelope::from_slice(b"[1,2,3]").unwrap();
        assert_eq!(envelope.data, Some(json!([1, 2, 3])));
    }

    #[test]
    fn body_as_sees_top_level_fields() {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Tokens {
            access_token: String,
        }

        let envelope =
            ResponseEnvelope::from_slice(br#"{"accessToken":"T2","message":"refreshed"}"#)
                .unwrap();
        let tokens: Tokens = envelope.body_as().unwrap();
        assert_eq!(tokens.access_token, "T2");
        assert_eq!(envelope.message_text(), Some("refreshed"));
    }
}
