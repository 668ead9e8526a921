// src/utils/error.rs

use thiserror::Error;

/// The primary error type for all operations in the MBP codec.
#[derive(Error, Debug)]
pub enum MbpError {
    /// An error occurred during I/O operations (e.g., file not found, permission denied).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source image could not be opened or decoded.
    #[error("Image error: {0}")]
    Image(#[from] ::image::ImageError),

    /// The header stores each dimension in a single byte.
    #[error("Dimension too large: {width}x{height} (at most 255x255)")]
    DimensionTooLarge { width: u32, height: u32 },

    /// A zero-sized image has no pixels to encode.
    #[error("Empty image: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// The variant byte of an encoded buffer is not 1, 2 or 3.
    #[error("Unknown encoding variant: {0}")]
    UnknownVariant(u8),

    /// The body ended before every pixel was accounted for.
    #[error("Truncated stream at bit offset {offset}")]
    Truncated { offset: usize },

    /// A decoded stripe covers more pixels than the image has left.
    #[error("Stripe of {length} pixels overruns the image ({remaining} pixels left)")]
    StripeOverrun { length: u32, remaining: u32 },

    /// An earlier write to the output failed; the writer takes no more bytes.
    #[error("Output sink failed on an earlier write")]
    SinkFailed,

    /// An invalid argument was provided to a function.
    #[error("Invalid argument: {0}")]
    InvalidArg(String),
}

impl MbpError {
    /// Returns true for errors caused by the image geometry rather than I/O.
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            MbpError::DimensionTooLarge { .. } | MbpError::EmptyImage { .. }
        )
    }
}

/// A specialized `Result` type for MBP operations.
pub type Result<T> = std::result::Result<T, MbpError>;
