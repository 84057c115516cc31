use thiserror::Error;

/// Errors that can occur while configuring or drawing on a paint surface
#[derive(Error, Debug)]
pub enum PaintError {
    /// The backing image could not be allocated. The previous image is kept.
    #[error("failed to allocate a {width}x{height} backing image")]
    Allocation { width: u32, height: u32 },
    #[error("unknown color resource `{0}`")]
    UnknownColor(String),
    #[error("invalid stroke style: {0}")]
    InvalidStyle(String),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type PaintResult<T> = Result<T, PaintError>;
