use actix_web::web;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::AppError;

const MISSING_BODY: &str = "Request data is missing";

/// Unwrap an optional JSON body, treating absent, malformed, non-object and
/// empty-object bodies alike as missing.
///
/// Handlers take `Option<web::Json<Value>>` so extraction never fails on its own.
pub fn require_body(body: Option<web::Json<Value>>) -> Result<Map<String, Value>, AppError> {
    match body.map(web::Json::into_inner) {
        Some(Value::Object(map)) if !map.is_empty() => Ok(map),
        _ => Err(AppError::BadRequest(MISSING_BODY.to_string())),
    }
}

/// Read one key of a body. Absent and `null` both yield `None`; a value of the
/// wrong type is a bad request naming the key.
pub fn optional_field<T: DeserializeOwned>(
    body: &Map<String, Value>,
    field: &str,
) -> Result<Option<T>, AppError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| AppError::BadRequest(format!("Invalid value for field '{field}': {e}"))),
    }
}
