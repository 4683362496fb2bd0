use std::io::{self, Read};

use serde_json::Value;
use thiserror::Error as ThisError;

/// Argument value meaning "read it from stdin instead".
pub const STDIN_ARG: &str = ".";

#[derive(ThisError, Debug)]
pub enum CliError {
    #[error("can't read stdin: {0}")]
    Stdin(#[from] io::Error),
    #[error("invalid json argument: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn get_stdin_from_pipe() -> Result<String, io::Error> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Parses a json cli argument, reading it from stdin when it is `.`.
pub fn read_json_arg(arg: &str) -> Result<Value, CliError> {
    if arg.trim() == STDIN_ARG {
        return parse_json_arg(&get_stdin_from_pipe()?);
    }
    parse_json_arg(arg)
}

fn parse_json_arg(raw: &str) -> Result<Value, CliError> {
    Ok(serde_json::from_str(raw.trim())?)
}
