//! Reference inputs and their exact TLV encodings

/// Two NDJSON lines with overlapping value kinds
pub const SAMPLE_LINES: [&str; 2] = [
    r#"{"key1":"value", "key2":42, "key3":true}"#,
    r#"{"sadsf":"dsewtew", "dsre":3221, "sdfds":"dsfewew"}"#,
];

/// Dictionary built from [`SAMPLE_LINES`], in key order
pub const SAMPLE_DICTIONARY: [(&str, i32); 6] = [
    ("dsre", 5),
    ("key1", 1),
    ("key2", 2),
    ("key3", 3),
    ("sadsf", 4),
    ("sdfds", 6),
];

/// Lowercase and strip spaces, for comparing JSON lines loosely
pub fn normalize(line: &str) -> String {
    line.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Exact encoding of [`SAMPLE_LINES`]
#[rustfmt::skip]
pub fn sample_tlv() -> Vec<u8> {
    vec![
        // 1st object
        0x00, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x03, 0x00, 0x00, 0x00,                     // member count 3
        0x01, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x01, 0x00, 0x00, 0x00,                     // key id 1
        0x09, 0x05, 0, 0, 0, 0, 0, 0, 0, b'v', b'a', b'l', b'u', b'e',               // "value"
        0x01, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x02, 0x00, 0x00, 0x00,                     // key id 2
        0x01, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x2a, 0x00, 0x00, 0x00,                     // 42
        0x01, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x03, 0x00, 0x00, 0x00,                     // key id 3
        0x04, 0x01, 0, 0, 0, 0, 0, 0, 0, 0x01,                                       // true
        // 2nd object
        0x00, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x03, 0x00, 0x00, 0x00,                     // member count 3
        0x01, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x04, 0x00, 0x00, 0x00,                     // key id 4
        0x09, 0x07, 0, 0, 0, 0, 0, 0, 0, b'd', b's', b'e', b'w', b't', b'e', b'w',   // "dsewtew"
        0x01, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x05, 0x00, 0x00, 0x00,                     // key id 5
        0x01, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x95, 0x0c, 0x00, 0x00,                     // 3221
        0x01, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x06, 0x00, 0x00, 0x00,                     // key id 6
        0x09, 0x07, 0, 0, 0, 0, 0, 0, 0, b'd', b's', b'f', b'e', b'w', b'e', b'w',   // "dsfewew"
        // dictionary trailer, key order
        0x7f, 0x00, 0, 0, 0, 0, 0, 0, 0,
        0x09, 0x04, 0, 0, 0, 0, 0, 0, 0, b'd', b's', b'r', b'e',
        0x01, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x05, 0x00, 0x00, 0x00,
        0x09, 0x04, 0, 0, 0, 0, 0, 0, 0, b'k', b'e', b'y', b'1',
        0x01, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x01, 0x00, 0x00, 0x00,
        0x09, 0x04, 0, 0, 0, 0, 0, 0, 0, b'k', b'e', b'y', b'2',
        0x01, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x02, 0x00, 0x00, 0x00,
        0x09, 0x04, 0, 0, 0, 0, 0, 0, 0, b'k', b'e', b'y', b'3',
        0x01, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x03, 0x00, 0x00, 0x00,
        0x09, 0x05, 0, 0, 0, 0, 0, 0, 0, b's', b'a', b'd', b's', b'f',
        0x01, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x04, 0x00, 0x00, 0x00,
        0x09, 0x05, 0, 0, 0, 0, 0, 0, 0, b's', b'd', b'f', b'd', b's',
        0x01, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x06, 0x00, 0x00, 0x00,
    ]
}

// One object `{"key1":"value"}` without any trailer.
#[rustfmt::skip]
const SINGLE_OBJECT: [u8; 40] = [
    0x00, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x01, 0x00, 0x00, 0x00,
    0x01, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x01, 0x00, 0x00, 0x00,
    0x09, 0x05, 0, 0, 0, 0, 0, 0, 0, b'v', b'a', b'l', b'u', b'e',
];

const MARKER: [u8; 9] = [0x7f, 0, 0, 0, 0, 0, 0, 0, 0];

fn single_object_with_trailer(trailer: &[u8]) -> Vec<u8> {
    let mut bytes = SINGLE_OBJECT.to_vec();
    bytes.extend_from_slice(&MARKER);
    bytes.extend_from_slice(trailer);
    bytes
}

/// Data records with no dictionary marker anywhere
pub fn without_dictionary() -> Vec<u8> {
    SINGLE_OBJECT.to_vec()
}

/// Trailer whose last id payload is 3 bytes instead of 4
#[rustfmt::skip]
pub fn dictionary_truncated_id() -> Vec<u8> {
    single_object_with_trailer(&[
        0x09, 0x04, 0, 0, 0, 0, 0, 0, 0, b'd', b's', b'r', b'e',
        0x01, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x05, 0x00, 0x00,
    ])
}

/// Trailer whose id record declares 5 bytes but carries 4
#[rustfmt::skip]
pub fn dictionary_overlong_id_length() -> Vec<u8> {
    single_object_with_trailer(&[
        0x09, 0x04, 0, 0, 0, 0, 0, 0, 0, b'd', b's', b'r', b'e',
        0x01, 0x05, 0, 0, 0, 0, 0, 0, 0, 0x05, 0x00, 0x00, 0x00,
    ])
}

/// Trailer whose key name declares 4 bytes but carries 3
#[rustfmt::skip]
pub fn dictionary_short_key_name() -> Vec<u8> {
    single_object_with_trailer(&[
        0x09, 0x04, 0, 0, 0, 0, 0, 0, 0, b'd', b's', b'e',
        0x01, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x05, 0x00, 0x00, 0x00,
    ])
}

/// Trailer pair whose id slot holds a string
#[rustfmt::skip]
pub fn dictionary_id_wrong_type() -> Vec<u8> {
    single_object_with_trailer(&[
        0x09, 0x04, 0, 0, 0, 0, 0, 0, 0, b'd', b's', b'r', b'e',
        0x09, 0x04, 0, 0, 0, 0, 0, 0, 0, b'd', b's', b'r', b'e',
    ])
}

/// Trailer pair written id first, key second
#[rustfmt::skip]
pub fn dictionary_pair_reversed() -> Vec<u8> {
    single_object_with_trailer(&[
        0x01, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x05, 0x00, 0x00, 0x00,
        0x09, 0x04, 0, 0, 0, 0, 0, 0, 0, b'd', b's', b'r', b'e',
    ])
}

/// Marker with no pairs after it
pub fn empty_dictionary() -> Vec<u8> {
    single_object_with_trailer(&[])
}

/// Well-formed trailer that lacks the id used by the data records
#[rustfmt::skip]
pub fn dictionary_without_used_key() -> Vec<u8> {
    single_object_with_trailer(&[
        0x09, 0x04, 0, 0, 0, 0, 0, 0, 0, b'd', b's', b'r', b'e',
        0x01, 0x04, 0, 0, 0, 0, 0, 0, 0, 0x05, 0x00, 0x00, 0x00,
    ])
}
