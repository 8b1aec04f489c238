//! JPack Format - Core primitives for the JSON packer TLV format
//!
//! This crate provides the fundamental encoding/decoding utilities for the
//! JPack wire format with no file I/O dependencies. It includes:
//!
//! - Type tags and record header layout
//! - TLV record reader/writer over byte streams
//! - JSON scalar ↔ record conversion
//! - Error types
//! - Security limits

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod constants;
pub mod error;
pub mod limits;
pub mod record;
pub mod scalar;
pub mod types;

// Re-export commonly used types
pub use error::{JpackError, Result};
pub use limits::Limits;
pub use record::{Record, RecordHeader, RecordReader, RecordWriter};
pub use types::TypeTag;
