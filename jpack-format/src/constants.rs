//! Constants for the JPack wire format

/// Size of the tag field in bytes.
pub const TAG_LEN: usize = 1;

/// Size of the length field in bytes (fixed 64-bit, independent of host word size).
pub const LENGTH_LEN: usize = 8;

/// Total record header size: tag + length.
pub const RECORD_HEADER_LEN: usize = TAG_LEN + LENGTH_LEN;

/// Tag byte announcing the member count of one JSON object.
pub const TAG_MEMBER_COUNT: u8 = 0;
/// Tag byte for a signed 32-bit integer.
pub const TAG_INT32: u8 = 1;
/// Tag byte for an unsigned 32-bit integer.
pub const TAG_UINT32: u8 = 2;
/// Tag byte for `null`.
pub const TAG_NULL: u8 = 3;
/// Tag byte for a boolean.
pub const TAG_BOOL: u8 = 4;
/// Tag byte for a signed 64-bit integer.
pub const TAG_INT64: u8 = 5;
/// Tag byte for an unsigned 64-bit integer.
pub const TAG_UINT64: u8 = 6;
/// Tag byte for an IEEE-754 double.
pub const TAG_DOUBLE: u8 = 7;
/// Tag byte for an IEEE-754 single.
pub const TAG_FLOAT: u8 = 8;
/// Tag byte for a UTF-8 string (no terminator stored).
pub const TAG_STRING: u8 = 9;
/// Tag byte marking the start of the key dictionary trailer.
pub const TAG_DICTIONARY_MARKER: u8 = 127;
