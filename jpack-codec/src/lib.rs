//! JPack Codec - Encoder/decoder engines
//!
//! This crate provides the conversion algorithms for JPack:
//!
//! - Key dictionary interning JSON keys to small ids
//! - NDJSON → TLV encoder
//! - TLV → NDJSON two-pass decoder
//! - Method registry selecting an algorithm by name

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod decoder;
pub mod dictionary;
pub mod encoder;
pub mod packer;

// Re-export commonly used types
pub use jpack_format::{JpackError, Limits, Record, Result, TypeTag};

// Re-export our own types
pub use decoder::{DecodeSummary, TlvToJson};
pub use dictionary::KeyDictionary;
pub use encoder::{EncodeSummary, JsonToTlv};
pub use packer::{InputMode, Method, PackInput, Packer, PackerRegistry, RunSummary, SeekRead};
