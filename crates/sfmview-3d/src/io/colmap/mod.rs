//! Reader for COLMAP sparse reconstructions stored in the binary format
//! (`cameras.bin`, `images.bin`, `points3D.bin`).
//!
//! Format spec: https://colmap.github.io/format.html

mod binary;
mod records;
mod types;

pub use binary::*;
pub use types::*;

/// Error types for the COLMAP module.
#[derive(Debug, thiserror::Error)]
pub enum ColmapError {
    /// Ran out of bytes in the middle of a record
    #[error("unexpected end of input while decoding a record")]
    TruncatedInput(#[source] std::io::Error),

    /// An image name never reached its null terminator
    #[error("image name is missing its null terminator")]
    MalformedCString,

    /// Error reading or writing file
    #[error("error reading or writing file")]
    Io(#[from] std::io::Error),

    /// Failed to decode a fixed-size record
    #[error("failed to decode record")]
    Decode(#[from] bincode::error::DecodeError),

    /// An image name is not valid UTF-8
    #[error("image name is not valid UTF-8")]
    InvalidName(#[from] std::string::FromUtf8Error),
}
