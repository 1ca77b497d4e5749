//! API Gateway and function URL event plumbing.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// HTTP method of a REST API (v1), HTTP API (v2), or function URL event.
pub fn request_method(event: &Value) -> Option<String> {
    event
        .get("httpMethod")
        .and_then(Value::as_str)
        .or_else(|| {
            event
                .pointer("/requestContext/http/method")
                .and_then(Value::as_str)
        })
        .map(str::to_ascii_uppercase)
}

/// Decodes the event body into a JSON object. A missing or null body, and any
/// body that is not an object (array, string, number), carries no named fields
/// and becomes an empty object so that it fails field validation.
pub fn request_body(event: &Value) -> Result<Value, String> {
    let Some(object) = event.as_object() else {
        return Err("Request payload must be a JSON object".to_string());
    };

    match object.get("body") {
        None | Some(Value::Null) => Ok(Value::Object(Map::new())),
        Some(Value::Object(_)) => Ok(object["body"].clone()),
        Some(Value::String(text)) => {
            let is_base64 = object
                .get("isBase64Encoded")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let text = if is_base64 {
                decode_base64_body(text)?
            } else {
                text.clone()
            };
            if text.trim().is_empty() {
                return Ok(Value::Object(Map::new()));
            }
            let parsed: Value = serde_json::from_str(&text)
                .map_err(|error| format!("Malformed JSON body: {error}"))?;
            Ok(named_fields(parsed))
        }
        Some(_) => Ok(Value::Object(Map::new())),
    }
}

fn named_fields(value: Value) -> Value {
    match value {
        Value::Object(_) => value,
        _ => Value::Object(Map::new()),
    }
}

fn decode_base64_body(text: &str) -> Result<String, String> {
    let bytes = STANDARD
        .decode(text)
        .map_err(|error| format!("Malformed base64 body: {error}"))?;
    String::from_utf8(bytes).map_err(|error| format!("Body is not valid UTF-8: {error}"))
}

fn cors_headers() -> Map<String, Value> {
    let mut headers = Map::new();
    headers.insert("Access-Control-Allow-Origin".to_string(), json!("*"));
    headers.insert(
        "Access-Control-Allow-Methods".to_string(),
        json!("POST, OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers".to_string(),
        json!("Content-Type"),
    );
    headers
}

pub fn empty_response(status_code: u16) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: Value::Object(cors_headers()),
        body: String::new(),
    }
}

pub fn json_response(status_code: u16, payload: Value) -> ApiGatewayResponse {
    let mut headers = cors_headers();
    headers.insert("Content-Type".to_string(), json!("application/json"));
    ApiGatewayResponse {
        status_code,
        headers: Value::Object(headers),
        body: payload.to_string(),
    }
}
