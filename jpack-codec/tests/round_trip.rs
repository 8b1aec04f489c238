//! End-to-end conversions through both algorithms

use jpack_codec::{
    JpackError, JsonToTlv, KeyDictionary, Limits, Method, PackInput, Packer, TlvToJson,
};
use jpack_test_utils::assertions::assert_ndjson_equal;
use jpack_test_utils::TestDataGenerator;
use proptest::prelude::*;
use serde_json::{Map, Number, Value};
use std::io::Cursor;

fn encode(input: &str) -> Result<Vec<u8>, JpackError> {
    let mut output = Vec::new();
    JsonToTlv::new(Limits::default()).run(Cursor::new(input), &mut output)?;
    Ok(output)
}

fn decode(input: Vec<u8>) -> Result<String, JpackError> {
    let mut output = Vec::new();
    TlvToJson::new(Limits::default()).run(Cursor::new(input), &mut output)?;
    Ok(String::from_utf8(output).expect("decoder writes UTF-8"))
}

#[test]
fn scalar_lines_survive_round_trip() {
    let input = TestDataGenerator::all_scalar_lines().join("\n");
    let output = decode(encode(&input).unwrap()).unwrap();
    assert_ndjson_equal(&output, &input);
}

#[test]
fn log_lines_survive_round_trip() {
    let input = TestDataGenerator::large_record_set(500).join("\n");
    let encoded = encode(&input).unwrap();
    let output = decode(encoded).unwrap();
    assert_ndjson_equal(&output, &input);
}

#[test]
fn empty_input_decodes_to_nothing() {
    let encoded = encode("").unwrap();
    assert_eq!(encoded, vec![0x7f, 0, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(decode(encoded).unwrap(), "");
}

#[test]
fn empty_object_round_trips() {
    let output = decode(encode("{}\n{\"a\":1}").unwrap()).unwrap();
    assert_eq!(output, "{}\n{\"a\":1}\n");
}

#[test]
fn repeated_keys_share_one_dictionary_entry() {
    let input = TestDataGenerator::large_record_set(50).join("\n");
    let mut packer = Packer::new(Method::Encode, Limits::default());
    let summary = packer
        .run(PackInput::sequential(input.as_bytes()), Vec::new())
        .unwrap();
    assert_eq!(summary.records(), 50);
    assert_eq!(summary.dictionary_entries(), 5);
    assert_eq!(packer.dictionary().len(), 5);
}

#[test]
fn packer_decode_matches_direct_decoder() {
    let encoded = encode(&TestDataGenerator::all_scalar_lines().join("\n")).unwrap();
    let mut via_packer = Vec::new();
    Packer::new(Method::Decode, Limits::default())
        .run(PackInput::seekable(Cursor::new(encoded.clone())), &mut via_packer)
        .unwrap();
    assert_eq!(String::from_utf8(via_packer).unwrap(), decode(encoded).unwrap());
}

#[test]
fn repeated_keys_survive_round_trip() {
    let input = "{\"a\":1,\"b\":true,\"a\":\"again\"}";
    let output = decode(encode(input).unwrap()).unwrap();
    assert_eq!(output, format!("{}\n", input));
}

#[test]
fn nested_value_is_rejected() {
    match encode("{\"ok\":1}\n{\"inner\":{\"a\":1}}") {
        Err(JpackError::UnsupportedValue { line, key }) => {
            assert_eq!(line, 2);
            assert_eq!(key, "inner");
        }
        other => panic!("expected UnsupportedValue, got {:?}", other),
    }
}

#[test]
fn member_limit_applies_while_encoding() {
    let limits = Limits {
        max_members_per_object: 2,
        ..Limits::default()
    };
    let mut output = Vec::new();
    let result =
        JsonToTlv::new(limits).run(Cursor::new("{\"a\":1,\"b\":2,\"c\":3}"), &mut output);
    assert!(matches!(result, Err(JpackError::LimitExceeded(_))));
}

#[test]
fn dictionary_ids_follow_first_appearance() {
    let mut dictionary = KeyDictionary::new();
    for key in ["zeta", "alpha", "zeta", "mid"] {
        dictionary.intern(key);
    }
    assert_eq!(
        dictionary.entries().collect::<Vec<_>>(),
        vec![("alpha", 2), ("mid", 3), ("zeta", 1)]
    );
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(|f| Value::Number(Number::from_f64(f).expect("finite"))),
        "\\PC{0,16}".prop_map(Value::String),
    ]
}

fn flat_object() -> impl Strategy<Value = Value> {
    prop::collection::vec(("[a-z_]{1,8}", scalar()), 0..8).prop_map(|members| {
        let mut object = Map::new();
        for (key, value) in members {
            object.insert(key, value);
        }
        Value::Object(object)
    })
}

proptest! {
    #[test]
    fn prop_flat_objects_round_trip(objects in prop::collection::vec(flat_object(), 0..16)) {
        let input = objects
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        let output = decode(encode(&input).unwrap()).unwrap();
        assert_ndjson_equal(&output, &input);
    }
}
