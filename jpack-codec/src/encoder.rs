//! NDJSON to TLV encoder

use std::fmt;
use std::io::{BufRead, BufWriter, Write};

use jpack_format::{JpackError, Limits, Record, RecordWriter, Result};
use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Serialize;
use serde_json::error::Category;
use serde_json::Value;

use crate::dictionary::KeyDictionary;

/// Counters reported by a finished encode run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EncodeSummary {
    /// JSON objects encoded
    pub records: usize,
    /// Key/value pairs encoded across all objects
    pub members: usize,
    /// Distinct keys written to the trailer
    pub dictionary_entries: usize,
    /// Bytes written to the sink
    pub bytes_written: u64,
}

/// Encoder turning one JSON object per line into member-count groups
/// followed by a key dictionary trailer
#[derive(Debug, Default)]
pub struct JsonToTlv {
    dictionary: KeyDictionary,
    limits: Limits,
}

impl JsonToTlv {
    /// Create an encoder with the given limits
    pub fn new(limits: Limits) -> Self {
        Self {
            dictionary: KeyDictionary::new(),
            limits,
        }
    }

    /// Dictionary built by the last run
    pub fn dictionary(&self) -> &KeyDictionary {
        &self.dictionary
    }

    /// Encode every line of `input` into `output`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: W) -> Result<EncodeSummary> {
        self.dictionary.clear();
        let mut writer = RecordWriter::new(BufWriter::new(output));
        let mut summary = EncodeSummary::default();

        for (index, line) in input.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;
            let members = parse_object(&line, line_number)?;
            summary.members += self.write_object(&mut writer, &members, line_number)?;
            summary.records += 1;
        }

        writer.write_record(&Record::dictionary_marker())?;
        for (name, id) in self.dictionary.entries() {
            writer.write_record(&Record::string(name))?;
            writer.write_record(&Record::int32(id))?;
        }
        writer.flush()?;

        summary.dictionary_entries = self.dictionary.len();
        summary.bytes_written = writer.bytes_written();
        tracing::debug!(
            records = summary.records,
            keys = summary.dictionary_entries,
            bytes = summary.bytes_written,
            "encoded NDJSON to TLV"
        );
        Ok(summary)
    }

    fn write_object<W: Write>(
        &mut self,
        writer: &mut RecordWriter<W>,
        members: &[(String, Value)],
        line_number: usize,
    ) -> Result<usize> {
        let count = u32::try_from(members.len()).map_err(|_| {
            JpackError::LimitExceeded(format!("line {} has too many members", line_number))
        })?;
        self.limits.check_member_count(count)?;
        writer.write_record(&Record::member_count(count))?;

        for (key, value) in members {
            let value_record =
                Record::from_json(value).ok_or_else(|| JpackError::UnsupportedValue {
                    line: line_number,
                    key: key.clone(),
                })?;
            // Key names become trailer records, so they share the payload limit.
            self.limits.check_payload_len(key.len() as u64)?;
            self.limits.check_payload_len(value_record.length())?;
            let id = self.dictionary.intern(key);
            writer.write_record(&Record::int32(id))?;
            writer.write_record(&value_record)?;
        }

        tracing::trace!(line = line_number, members = count, "encoded object");
        Ok(members.len())
    }
}

/// A parsed input line. Object members keep source order and repeated keys.
enum Line {
    Object(Vec<(String, Value)>),
    Other,
}

impl<'de> Deserialize<'de> for Line {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(LineVisitor)
    }
}

struct LineVisitor;

impl<'de> Visitor<'de> for LineVisitor {
    type Value = Line;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Line, A::Error> {
        let mut members = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(member) = map.next_entry::<String, Value>()? {
            members.push(member);
        }
        Ok(Line::Object(members))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Line, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Line::Other)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> std::result::Result<Line, E> {
        Ok(Line::Other)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> std::result::Result<Line, E> {
        Ok(Line::Other)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> std::result::Result<Line, E> {
        Ok(Line::Other)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> std::result::Result<Line, E> {
        Ok(Line::Other)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> std::result::Result<Line, E> {
        Ok(Line::Other)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Line, E> {
        Ok(Line::Other)
    }
}

fn parse_object(line: &str, line_number: usize) -> Result<Vec<(String, Value)>> {
    match serde_json::from_str::<Line>(line) {
        Ok(Line::Object(members)) => Ok(members),
        Ok(Line::Other) => Err(JpackError::Parse {
            code: "data".to_string(),
            line: line_number,
            offset: 0,
            line_text: line.to_owned(),
            message: "expected a JSON object".to_string(),
        }),
        Err(err) => Err(parse_error(&err, line, line_number)),
    }
}

fn parse_error(err: &serde_json::Error, line: &str, line_number: usize) -> JpackError {
    let code = match err.classify() {
        Category::Io => "io",
        Category::Syntax => "syntax",
        Category::Data => "data",
        Category::Eof => "eof",
    };
    let full = err.to_string();
    let position = format!(" at line {} column {}", err.line(), err.column());
    let message = full.strip_suffix(&position).unwrap_or(&full).to_owned();

    JpackError::Parse {
        code: code.to_string(),
        line: line_number,
        offset: err.column().saturating_sub(1),
        line_text: line.to_owned(),
        message,
    }
}
