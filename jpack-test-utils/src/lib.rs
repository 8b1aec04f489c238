//! JPack Test Utilities
//!
//! This crate provides shared fixtures and helpers for the JPack test suites.

use jpack_format::Record;
use serde_json::{Map, Value};

pub mod fixtures;

/// Builder for hand-assembling TLV streams
#[derive(Debug, Default)]
pub struct TlvBuilder {
    bytes: Vec<u8>,
}

impl TlvBuilder {
    /// Create an empty stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one complete record
    pub fn record(mut self, record: Record) -> Self {
        self.bytes.extend_from_slice(&record.header().encode());
        self.bytes.extend_from_slice(&record.payload);
        self
    }

    /// Append a member count record followed by `(key id, value)` pairs
    pub fn object(mut self, members: &[(i32, Record)]) -> Self {
        self = self.record(Record::member_count(members.len() as u32));
        for (id, value) in members {
            self = self.record(Record::int32(*id)).record(value.clone());
        }
        self
    }

    /// Append the dictionary marker followed by `(key, id)` pairs in the given order
    pub fn dictionary(mut self, entries: &[(&str, i32)]) -> Self {
        self = self.record(Record::dictionary_marker());
        for (name, id) in entries {
            self = self.record(Record::string(name)).record(Record::int32(*id));
        }
        self
    }

    /// Finish and return the stream bytes
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

/// Generate NDJSON test data with various patterns
pub struct TestDataGenerator;

impl TestDataGenerator {
    /// Lines covering every scalar kind the format supports
    pub fn all_scalar_lines() -> Vec<String> {
        vec![
            r#"{"null":null,"yes":true,"no":false}"#.to_string(),
            r#"{"small":-5,"big":3000000000,"negative":-3000000000,"huge":18446744073709551615}"#
                .to_string(),
            r#"{"pi":3.14159,"tiny":1e-9,"whole":2.0}"#.to_string(),
            r#"{"text":"Hello, 世界! 🌍","empty":""}"#.to_string(),
        ]
    }

    /// Generate a large number of log-like lines sharing a small key set
    pub fn large_record_set(count: usize) -> Vec<String> {
        (0..count)
            .map(|i| {
                let level = match i % 4 {
                    0 => "DEBUG",
                    1 => "INFO",
                    2 => "WARN",
                    _ => "ERROR",
                };
                let mut record = Map::new();
                record.insert("id".to_string(), Value::from(i as u64));
                record.insert("timestamp".to_string(), Value::from(1_609_459_200 + i as u64));
                record.insert("level".to_string(), Value::from(level));
                record.insert("user".to_string(), Value::from(format!("user_{}", i % 100)));
                record.insert("ratio".to_string(), Value::from(i as f64 / 7.0));
                Value::Object(record).to_string()
            })
            .collect()
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use serde_json::Value;

    /// Assert that two NDJSON texts hold the same objects line by line
    pub fn assert_ndjson_equal(actual: &str, expected: &str) {
        let actual: Vec<&str> = actual.lines().collect();
        let expected: Vec<&str> = expected.lines().collect();
        assert_eq!(
            actual.len(),
            expected.len(),
            "line count differs:\nExpected: {:?}\nActual: {:?}",
            expected,
            actual
        );

        for (index, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
            let a: Value = serde_json::from_str(a).expect("actual line is JSON");
            let e: Value = serde_json::from_str(e).expect("expected line is JSON");
            let a_keys: Vec<&String> = a.as_object().expect("object").keys().collect();
            let e_keys: Vec<&String> = e.as_object().expect("object").keys().collect();
            assert_eq!(a_keys, e_keys, "key order differs at line {}", index + 1);
            assert_eq!(a, e, "values differ at line {}", index + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_object_layout() {
        let bytes = TlvBuilder::new()
            .object(&[(1, Record::string("value"))])
            .finish();
        // member count (9 + 4), key id (9 + 4), value (9 + 5)
        assert_eq!(bytes.len(), 13 + 13 + 14);
        assert_eq!(bytes[0], 0x00);
        assert_eq!(bytes[13], 0x01);
        assert_eq!(bytes[26], 0x09);
    }

    #[test]
    fn test_large_record_set() {
        let lines = TestDataGenerator::large_record_set(1000);
        assert_eq!(lines.len(), 1000);

        let mut users = std::collections::HashSet::new();
        for line in &lines {
            let value: Value = serde_json::from_str(line).unwrap();
            users.insert(value["user"].as_str().unwrap().to_string());
        }
        assert_eq!(users.len(), 100);
    }

    #[test]
    fn test_ndjson_equal_ignores_whitespace() {
        assertions::assert_ndjson_equal("{\"a\":1,\"b\":true}\n", "{\"a\": 1, \"b\": true}");
    }

    #[test]
    #[should_panic(expected = "key order differs")]
    fn test_ndjson_equal_checks_order() {
        assertions::assert_ndjson_equal("{\"b\":1,\"a\":2}", "{\"a\":2,\"b\":1}");
    }
}
