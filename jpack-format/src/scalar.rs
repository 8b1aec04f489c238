//! Conversion between JSON scalar values and TLV records
//!
//! Encoding picks the first tag in [`SCALAR_PRECEDENCE`] whose predicate
//! accepts the value. The order is part of the wire contract: a number the
//! parser reports as floating point always becomes `Double`, so `Float` is
//! only reachable for values that are not.
//!
//! `serde_json` reports the literal `-0` as the float `-0.0`, so it is
//! stored as `Double` and decodes to `-0.0`. Every other integral literal
//! takes one of the integer tags.

use serde_json::{Number, Value};

use crate::error::{JpackError, Result};
use crate::record::Record;
use crate::types::TypeTag;

/// Tag selection order for JSON leaf values
pub const SCALAR_PRECEDENCE: [TypeTag; 9] = [
    TypeTag::Bool,
    TypeTag::Double,
    TypeTag::Float,
    TypeTag::Int32,
    TypeTag::UInt32,
    TypeTag::Int64,
    TypeTag::UInt64,
    TypeTag::Null,
    TypeTag::String,
];

impl Record {
    /// Encode a JSON leaf value. Returns `None` for objects and arrays.
    pub fn from_json(value: &Value) -> Option<Self> {
        SCALAR_PRECEDENCE
            .iter()
            .find_map(|tag| encode_as(*tag, value))
    }

    /// Decode this record back to a JSON value
    pub fn to_json(&self) -> Result<Value> {
        match self.tag {
            TypeTag::Int32 => Ok(Value::from(i32::from_le_bytes(self.fixed()?))),
            TypeTag::UInt32 => Ok(Value::from(u32::from_le_bytes(self.fixed()?))),
            TypeTag::Null => {
                self.fixed::<0>()?;
                Ok(Value::Null)
            }
            TypeTag::Bool => Ok(Value::Bool(self.fixed::<1>()?[0] != 0)),
            TypeTag::Int64 => Ok(Value::from(i64::from_le_bytes(self.fixed()?))),
            TypeTag::UInt64 => Ok(Value::from(u64::from_le_bytes(self.fixed()?))),
            TypeTag::Double => finite(f64::from_le_bytes(self.fixed()?)),
            TypeTag::Float => finite(f64::from(f32::from_le_bytes(self.fixed()?))),
            TypeTag::String => Ok(Value::String(self.as_str()?.to_owned())),
            TypeTag::MemberCount | TypeTag::DictionaryMarker | TypeTag::Unknown => {
                Err(JpackError::UnknownDataType)
            }
        }
    }
}

fn encode_as(tag: TypeTag, value: &Value) -> Option<Record> {
    let payload = match tag {
        TypeTag::Bool => vec![u8::from(value.as_bool()?)],
        TypeTag::Double => parsed_float(value)?.to_le_bytes().to_vec(),
        TypeTag::Float => {
            let wide = parsed_float(value)?;
            let narrow = wide as f32;
            if f64::from(narrow) != wide {
                return None;
            }
            narrow.to_le_bytes().to_vec()
        }
        TypeTag::Int32 => i32::try_from(value.as_i64()?).ok()?.to_le_bytes().to_vec(),
        TypeTag::UInt32 => u32::try_from(value.as_u64()?).ok()?.to_le_bytes().to_vec(),
        TypeTag::Int64 => value.as_i64()?.to_le_bytes().to_vec(),
        TypeTag::UInt64 => value.as_u64()?.to_le_bytes().to_vec(),
        TypeTag::Null => value.is_null().then(Vec::new)?,
        TypeTag::String => value.as_str()?.as_bytes().to_vec(),
        TypeTag::MemberCount | TypeTag::DictionaryMarker | TypeTag::Unknown => return None,
    };
    Some(Record::new(tag, payload))
}

// Numbers written with a fraction or exponent; integral literals never qualify.
fn parsed_float(value: &Value) -> Option<f64> {
    value.as_number().filter(|n| n.is_f64())?.as_f64()
}

fn finite(value: f64) -> Result<Value> {
    Number::from_f64(value).map(Value::Number).ok_or_else(|| {
        JpackError::malformed(format!("{} cannot be represented as a JSON number", value))
    })
}
