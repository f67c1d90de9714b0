use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriverError {
    #[error("alarm get not supported on this node")]
    GetNotSupported,
    #[error("decode error: {0}")]
    Decode(#[from] rustwave_core::DecodeError),
    #[error("encode error: {0}")]
    Encode(#[from] rustwave_core::EncodeError),
}
