use libs::clients::ClientError;
use serde_json::Value;
use x::rpc::RpcErrorKind;

use crate::error::CheckError;

pub(crate) mod device;
pub(crate) mod firmware;
pub(crate) mod protocol;

/// Passes only on the exact (code, message) pair of `expected`.
pub(crate) fn expect_rpc_error(
    outcome: Result<Value, ClientError>,
    expected: RpcErrorKind,
) -> Result<(), CheckError> {
    match outcome {
        Err(ClientError::Rpc(e)) if e.is(expected) => Ok(()),
        Err(ClientError::Rpc(e)) => Err(CheckError::UnexpectedReply {
            expected,
            got: format!("({}, \"{}\")", e.code, e.message),
        }),
        Ok(result) => Err(CheckError::UnexpectedReply {
            expected,
            got: format!("result {}", result),
        }),
        Err(e) => Err(e.into()),
    }
}
