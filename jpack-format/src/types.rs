//! Type tag enumeration

use crate::constants::*;

/// Record type tags, values fixed for wire compatibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum TypeTag {
    /// Unrecognised tag byte
    Unknown = -1,
    /// Number of key/value pairs of one JSON object
    MemberCount = 0,
    /// Signed 32-bit integer
    Int32 = 1,
    /// Unsigned 32-bit integer
    UInt32 = 2,
    /// JSON `null`
    Null = 3,
    /// Boolean value
    Bool = 4,
    /// Signed 64-bit integer
    Int64 = 5,
    /// Unsigned 64-bit integer
    UInt64 = 6,
    /// IEEE-754 double
    Double = 7,
    /// IEEE-754 single
    Float = 8,
    /// UTF-8 string
    String = 9,
    /// Start of the dictionary trailer
    DictionaryMarker = 127,
}

impl TypeTag {
    /// Convert from the wire byte. Unrecognised bytes map to [`TypeTag::Unknown`].
    pub fn from_u8(val: u8) -> Self {
        match val {
            TAG_MEMBER_COUNT => TypeTag::MemberCount,
            TAG_INT32 => TypeTag::Int32,
            TAG_UINT32 => TypeTag::UInt32,
            TAG_NULL => TypeTag::Null,
            TAG_BOOL => TypeTag::Bool,
            TAG_INT64 => TypeTag::Int64,
            TAG_UINT64 => TypeTag::UInt64,
            TAG_DOUBLE => TypeTag::Double,
            TAG_FLOAT => TypeTag::Float,
            TAG_STRING => TypeTag::String,
            TAG_DICTIONARY_MARKER => TypeTag::DictionaryMarker,
            _ => TypeTag::Unknown,
        }
    }

    /// Wire byte for this tag.
    pub fn as_u8(self) -> u8 {
        self as i8 as u8
    }
}
