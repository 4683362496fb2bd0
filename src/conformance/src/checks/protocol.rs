use libs::clients::ClientError;
use log::info;
use serde_json::json;
use x::{
    rpc::{RpcErrorKind, RpcRequest, RpcResponse},
    sensor::SensorMethod,
};

use super::expect_rpc_error;
use crate::{error::CheckError, suite::Suite};

const TRUNCATED_BODY: &str = r#"{"method": "get_info", "jsonrpc": "2.0", "id": 1"#;
const UNKNOWN_METHOD: &str = "get_weather";
const UNKNOWN_PARAM: &str = "nickname";
const STALE_VERSION: &str = "1.0";

async fn send(suite: &Suite, request: RpcRequest, expected: RpcErrorKind) -> Result<(), CheckError> {
    let outcome = suite.client.send(&request).await;
    expect_rpc_error(outcome.and_then(|r| Ok(r.into_result()?)), expected)
}

pub(crate) async fn parse_error(suite: &Suite) -> Result<(), CheckError> {
    let raw = suite.client.post_raw(TRUNCATED_BODY).await?;
    let outcome = RpcResponse::from_value(raw)
        .map_err(ClientError::from)
        .and_then(|r| Ok(r.into_result()?));
    expect_rpc_error(outcome, RpcErrorKind::Parse)
}

pub(crate) async fn invalid_request(suite: &Suite) -> Result<(), CheckError> {
    let get_info = || RpcRequest::new(SensorMethod::GetInfo);
    let requests = [
        ("id 0", get_info().with_id(0)),
        ("no id", get_info().without_id()),
        ("jsonrpc 1.0", get_info().with_version(STALE_VERSION)),
        ("no jsonrpc", get_info().without_version()),
        ("empty object", RpcRequest::empty()),
    ];
    for (label, request) in requests {
        info!("Send request with {}", label);
        send(suite, request, RpcErrorKind::InvalidRequest).await?;
    }
    Ok(())
}

pub(crate) async fn method_not_found(suite: &Suite) -> Result<(), CheckError> {
    send(
        suite,
        RpcRequest::named(UNKNOWN_METHOD),
        RpcErrorKind::MethodNotFound,
    )
    .await
}

pub(crate) async fn invalid_params(suite: &Suite) -> Result<(), CheckError> {
    send(
        suite,
        RpcRequest::new(SensorMethod::SetName).with_params(json!({ UNKNOWN_PARAM: "x" })),
        RpcErrorKind::InvalidParams,
    )
    .await?;
    send(
        suite,
        RpcRequest::new(SensorMethod::SetReadingInterval).with_params(json!({ UNKNOWN_PARAM: 1 })),
        RpcErrorKind::InvalidParams,
    )
    .await
}
