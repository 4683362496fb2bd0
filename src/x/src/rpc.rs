use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error as ThisError;

use crate::sensor::SensorMethod;

pub const JSONRPC_VERSION: &str = "2.0";
pub const REQUEST_ID: i64 = 1;

// The builder never validates params so the device error paths can be exercised.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct RpcRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl RpcRequest {
    /// Well-formed JSON-RPC 2.0 request for a known method with the fixed id.
    pub fn new(method: SensorMethod) -> Self {
        Self::named(method.as_str())
    }

    /// Well-formed envelope around any method name, known to the device or not.
    pub fn named(method: &str) -> Self {
        Self {
            method: Some(method.to_string()),
            params: None,
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            id: Some(REQUEST_ID),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.jsonrpc = Some(version.to_string());
        self
    }

    pub fn without_version(mut self) -> Self {
        self.jsonrpc = None;
        self
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum RpcErrorKind {
    MethodExecution,
    Parse,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
}

impl RpcErrorKind {
    pub fn code(&self) -> i64 {
        match self {
            RpcErrorKind::MethodExecution => -32000,
            RpcErrorKind::Parse => -32700,
            RpcErrorKind::InvalidRequest => -32600,
            RpcErrorKind::MethodNotFound => -32601,
            RpcErrorKind::InvalidParams => -32602,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RpcErrorKind::MethodExecution => "Method execution error",
            RpcErrorKind::Parse => "Parse error",
            RpcErrorKind::InvalidRequest => "Invalid request",
            RpcErrorKind::MethodNotFound => "Method not found",
            RpcErrorKind::InvalidParams => "Invalid params",
        }
    }
}

#[derive(ThisError, Debug, Serialize, Deserialize, Clone, PartialEq)]
#[error("json-rpc error {code}: {message}")]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(kind: RpcErrorKind) -> Self {
        Self {
            code: kind.code(),
            message: kind.message().to_string(),
            data: None,
        }
    }

    /// True only when both the code and the canonical message match.
    pub fn is(&self, kind: RpcErrorKind) -> bool {
        self.code == kind.code() && self.message == kind.message()
    }
}

#[derive(ThisError, Debug, PartialEq)]
pub enum EnvelopeError {
    #[error("response is not a json object: {0}")]
    NotAnObject(Value),
    #[error("response carries both result and error")]
    Ambiguous,
    #[error("response carries neither result nor error")]
    Empty,
    #[error("response error member is malformed: {0}")]
    ErrorShape(String),
}

#[derive(Deserialize)]
struct RawResponse {
    #[serde(default)]
    jsonrpc: Option<String>,
    #[serde(default)]
    id: Value,
    #[serde(default, deserialize_with = "present")]
    result: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    error: Option<Value>,
}

// A member set to null still counts as present.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A response envelope holding exactly one of `result` or `error`.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcResponse {
    pub jsonrpc: Option<String>,
    pub id: Value,
    pub outcome: Result<Value, RpcError>,
    raw: Value,
}

impl RpcResponse {
    pub fn from_value(raw: Value) -> Result<Self, EnvelopeError> {
        if !raw.is_object() {
            return Err(EnvelopeError::NotAnObject(raw));
        }
        let parsed: RawResponse = serde_json::from_value(raw.clone())
            .map_err(|e| EnvelopeError::ErrorShape(e.to_string()))?;

        let outcome = match (parsed.result, parsed.error) {
            (Some(_), Some(_)) => return Err(EnvelopeError::Ambiguous),
            (None, None) => return Err(EnvelopeError::Empty),
            (Some(result), None) => Ok(result),
            (None, Some(error)) => Err(serde_json::from_value::<RpcError>(error)
                .map_err(|e| EnvelopeError::ErrorShape(e.to_string()))?),
        };

        Ok(Self {
            jsonrpc: parsed.jsonrpc,
            id: parsed.id,
            outcome,
            raw,
        })
    }

    /// The envelope exactly as the device sent it.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn error(&self) -> Option<&RpcError> {
        self.outcome.as_ref().err()
    }

    pub fn into_result(self) -> Result<Value, RpcError> {
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_carries_version_and_fixed_id() {
        let req = RpcRequest::new(SensorMethod::GetInfo);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"method": "get_info", "jsonrpc": "2.0", "id": 1})
        );

        let req = RpcRequest::new(SensorMethod::SetName).with_params(json!({"name": "new_name"}));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "method": "set_name",
                "params": {"name": "new_name"},
                "jsonrpc": "2.0",
                "id": 1
            })
        );
    }

    #[test]
    fn malformed_requests_are_expressible() {
        let req = RpcRequest::new(SensorMethod::GetInfo).with_id(0);
        assert_eq!(serde_json::to_value(&req).unwrap()["id"], json!(0));

        let req = RpcRequest::named("get_weather").without_id().without_version();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"method": "get_weather"})
        );

        let req = RpcRequest::new(SensorMethod::GetInfo).with_version("1.0");
        assert_eq!(serde_json::to_value(&req).unwrap()["jsonrpc"], json!("1.0"));

        assert_eq!(serde_json::to_value(RpcRequest::empty()).unwrap(), json!({}));
    }

    #[test]
    fn error_kinds_map_to_codes() {
        assert_eq!(RpcErrorKind::Parse.code(), -32700);
        assert_eq!(RpcErrorKind::MethodNotFound.code(), -32601);
        for kind in [
            RpcErrorKind::MethodExecution,
            RpcErrorKind::Parse,
            RpcErrorKind::InvalidRequest,
            RpcErrorKind::MethodNotFound,
            RpcErrorKind::InvalidParams,
        ] {
            assert!(RpcError::new(kind).is(kind));
        }
    }

    #[test]
    fn error_match_requires_exact_message() {
        let err = RpcError {
            code: -32000,
            message: "method execution error".to_string(),
            data: None,
        };
        assert_eq!(err.code, RpcErrorKind::MethodExecution.code());
        assert!(!err.is(RpcErrorKind::MethodExecution));
    }

    #[test]
    fn result_envelope_is_parsed() {
        let raw = json!({"jsonrpc": "2.0", "id": 1, "result": "rebooting"});
        let resp = RpcResponse::from_value(raw.clone()).unwrap();
        assert_eq!(resp.raw(), &raw);
        assert_eq!(resp.id, json!(1));
        assert_eq!(resp.into_result(), Ok(json!("rebooting")));
    }

    #[test]
    fn null_result_is_still_a_result() {
        let resp = RpcResponse::from_value(json!({"jsonrpc": "2.0", "id": 1, "result": null}));
        assert_eq!(resp.unwrap().into_result(), Ok(Value::Null));
    }

    #[test]
    fn error_envelope_is_parsed() {
        let resp = RpcResponse::from_value(json!({
            "jsonrpc": "2.0",
            "id": null,
            "error": {"code": -32700, "message": "Parse error"}
        }))
        .unwrap();
        assert!(resp.error().unwrap().is(RpcErrorKind::Parse));
        assert_eq!(resp.into_result(), Err(RpcError::new(RpcErrorKind::Parse)));
    }

    #[test]
    fn envelope_must_hold_exactly_one_member() {
        assert_eq!(
            RpcResponse::from_value(json!({
                "id": 1,
                "result": 1,
                "error": {"code": -32000, "message": "Method execution error"}
            })),
            Err(EnvelopeError::Ambiguous)
        );
        assert_eq!(
            RpcResponse::from_value(json!({"id": 1})),
            Err(EnvelopeError::Empty)
        );
        assert_eq!(
            RpcResponse::from_value(json!([1])),
            Err(EnvelopeError::NotAnObject(json!([1])))
        );
        assert!(matches!(
            RpcResponse::from_value(json!({"error": {"code": "x"}})),
            Err(EnvelopeError::ErrorShape(_))
        ));
    }
}
