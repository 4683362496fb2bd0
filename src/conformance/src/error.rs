use libs::clients::ClientError;
use thiserror::Error as ThisError;
use x::rpc::RpcErrorKind;

#[derive(ThisError, Debug)]
pub enum CheckError {
    #[error("{0}")]
    Client(#[from] ClientError),
    #[error("{0}")]
    Assertion(String),
    #[error("sensor not ready after {tries} attempts: {what}")]
    Timeout { what: &'static str, tries: u32 },
    #[error("expected json-rpc error ({}, \"{}\"), got {got}", .expected.code(), .expected.message())]
    UnexpectedReply { expected: RpcErrorKind, got: String },
}

#[derive(ThisError, Debug)]
pub enum SuiteError {
    #[error("sensor didn't reset to factory settings: {0}")]
    Setup(CheckError),
}

pub(crate) fn ensure(condition: bool, message: impl Into<String>) -> Result<(), CheckError> {
    if condition {
        Ok(())
    } else {
        Err(CheckError::Assertion(message.into()))
    }
}
