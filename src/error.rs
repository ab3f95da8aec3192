use alloy::transports::{RpcError, TransportError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Feed Errors
    #[error("Provider not available")]
    ProviderUnavailable,

    #[error("Oracle address not available")]
    OracleAddressMissing,

    #[error("Symbol fetch task failed: {0}")]
    TaskFailed(String),

    // Transport Errors
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("RPC error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
    },

    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),

    // Address Errors
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    // ABI Errors
    #[error("ABI function missing: {0}")]
    AbiFunctionMissing(String),

    #[error("ABI decode failed: {0}")]
    AbiDecode(String),

    #[error("Contract artifact parse failed: {0}")]
    ArtifactParse(String),

    // System Errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(e.to_string())
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        match &e {
            RpcError::ErrorResp(payload) => Error::Rpc {
                code: payload.code,
                message: payload.message.to_string(),
            },
            RpcError::NullResp | RpcError::DeserError { .. } => Error::InvalidResponse(e.to_string()),
            _ => Error::Transport(e.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(e: tokio::task::JoinError) -> Self {
        Error::TaskFailed(e.to_string())
    }
}
