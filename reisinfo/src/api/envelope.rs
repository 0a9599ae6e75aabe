//! Response decoding.
//!
//! Successful responses and error responses have different shapes, and
//! the API does not reliably signal errors through the HTTP status. A body
//! is therefore decoded into the expected type first; only if that fails
//! is it checked for the `statusCode` error envelope.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{ApiError, ClientError};

/// Maximum number of body characters kept in a validation error.
const BODY_EXCERPT_LEN: usize = 500;

/// How the raw JSON body maps onto the expected record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Envelope {
    /// The body is the record itself.
    #[default]
    Bare,
    /// The body is nested as `{key: body}` before decoding. Used for
    /// endpoints that return a bare array where older versions returned
    /// an object.
    Keyed(&'static str),
}

impl Envelope {
    pub fn wrap(self, raw: Value) -> Value {
        match self {
            Envelope::Bare => raw,
            Envelope::Keyed(key) => {
                let mut map = serde_json::Map::with_capacity(1);
                map.insert(key.to_string(), raw);
                Value::Object(map)
            }
        }
    }

    /// The original body inside a value produced by [`Envelope::wrap`].
    fn payload(self, wrapped: &Value) -> &Value {
        match self {
            Envelope::Bare => wrapped,
            Envelope::Keyed(key) => &wrapped[key],
        }
    }
}

/// Decode a response body into `T`.
pub fn decode<T: DeserializeOwned>(body: &str, envelope: Envelope) -> Result<T, ClientError> {
    let raw: Value = serde_json::from_str(body).map_err(|e| validation::<T>(&e, body))?;
    let wrapped = envelope.wrap(raw);

    match T::deserialize(&wrapped) {
        Ok(value) => Ok(value),
        Err(e) => {
            let raw = envelope.payload(&wrapped);
            if raw.get("statusCode").is_some()
                && let Ok(api_error) = ApiError::deserialize(raw)
            {
                return Err(ClientError::Api(api_error));
            }
            Err(validation::<T>(&e, body))
        }
    }
}

fn validation<T>(err: &serde_json::Error, body: &str) -> ClientError {
    ClientError::Validation {
        expected: short_type_name::<T>(),
        message: err.to_string(),
        body: Some(body.chars().take(BODY_EXCERPT_LEN).collect()),
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
