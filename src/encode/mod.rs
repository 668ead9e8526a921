pub mod bit_writer;
pub mod level;
pub mod raster;
pub mod select;
pub mod stripe;

// Re-export commonly used encoding functionality
pub use bit_writer::{BitWriter, ByteSink, DiscardSink, WriterSink};
pub use level::Level;
pub use raster::{encode_variant, measure_variant, ScanOrder, Variant, HEADER_LEN, MAX_DIMENSION};
pub use select::{encode_to, encode_to_vec, measure, Encoded, SizeReport};
pub use stripe::{split_run, RunCode, MAX_STRIPE, MIN_STRIPE};

// Re-export error types for convenience
pub use crate::utils::error::{MbpError, Result};
