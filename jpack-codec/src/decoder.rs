//! TLV to NDJSON decoder
//!
//! Decoding needs two passes over the same input. The first pass seeks over
//! data payloads until it finds the dictionary marker and loads the trailer;
//! the second pass rewinds and turns each member-count group back into one
//! JSON line.

use std::io::{BufWriter, Read, Seek, Write};

use jpack_format::{JpackError, Limits, Record, RecordReader, Result, TypeTag};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::dictionary::KeyDictionary;

/// Counters reported by a finished decode run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodeSummary {
    /// JSON objects written
    pub records: usize,
    /// Key/value pairs decoded across all objects
    pub members: usize,
    /// Entries loaded from the dictionary trailer
    pub dictionary_entries: usize,
    /// Bytes written to the sink
    pub bytes_written: u64,
}

/// Decoder turning a TLV stream with a dictionary trailer back into NDJSON
#[derive(Debug, Default)]
pub struct TlvToJson {
    dictionary: KeyDictionary,
    limits: Limits,
}

impl TlvToJson {
    /// Create a decoder with the given limits
    pub fn new(limits: Limits) -> Self {
        Self {
            dictionary: KeyDictionary::new(),
            limits,
        }
    }

    /// Dictionary loaded by the last run
    pub fn dictionary(&self) -> &KeyDictionary {
        &self.dictionary
    }

    /// Decode `input` into one compact JSON object per line of `output`
    pub fn run<R: Read + Seek, W: Write>(&mut self, input: R, output: W) -> Result<DecodeSummary> {
        self.dictionary.clear();
        let mut reader = RecordReader::new(input, self.limits.clone());

        self.load_dictionary(&mut reader)?;

        let mut writer = BufWriter::new(output);
        let mut summary = self.decode_records(&mut reader, &mut writer)?;
        writer.flush()?;

        summary.dictionary_entries = self.dictionary.len();
        tracing::debug!(
            records = summary.records,
            keys = summary.dictionary_entries,
            bytes = summary.bytes_written,
            "decoded TLV to NDJSON"
        );
        Ok(summary)
    }

    fn load_dictionary<R: Read + Seek>(&mut self, reader: &mut RecordReader<R>) -> Result<()> {
        reader.rewind()?;

        loop {
            match reader.skip_record()? {
                Some(header) if header.tag == TypeTag::DictionaryMarker => break,
                Some(_) => continue,
                None => return Err(JpackError::missing("dictionary", "")),
            }
        }
        tracing::trace!(offset = reader.position(), "found dictionary marker");

        while let Some(name_record) = reader.read_record_checked()? {
            let name = name_record.expect_tag(TypeTag::String)?.as_str()?;
            let id_record = require(reader, "a dictionary key id")?;
            let id = id_record.expect_tag(TypeTag::Int32)?.as_i32()?;

            if self.dictionary.len() >= self.limits.max_dictionary_entries {
                return Err(JpackError::LimitExceeded(format!(
                    "dictionary holds more than {} keys",
                    self.limits.max_dictionary_entries
                )));
            }
            self.dictionary.insert_with_id(name, id)?;
        }
        Ok(())
    }

    fn decode_records<R: Read + Seek, W: Write>(
        &self,
        reader: &mut RecordReader<R>,
        writer: &mut W,
    ) -> Result<DecodeSummary> {
        reader.rewind()?;
        let mut summary = DecodeSummary::default();

        loop {
            let offset = reader.position();
            let Some(record) = reader.read_record_checked()? else {
                break;
            };
            match record.tag {
                TypeTag::MemberCount => {}
                TypeTag::DictionaryMarker => break,
                other => {
                    return Err(JpackError::malformed(format!(
                        "expected MemberCount record at offset {}, found {:?}",
                        offset, other
                    )))
                }
            }

            let count = record.as_u32()?;
            self.limits.check_member_count(count)?;
            let members = self.read_members(reader, count)?;

            let line = serde_json::to_vec(&Members(&members))?;
            writer.write_all(&line)?;
            writer.write_all(b"\n")?;

            summary.records += 1;
            summary.members += count as usize;
            summary.bytes_written += line.len() as u64 + 1;
        }
        Ok(summary)
    }

    fn read_members<R: Read + Seek>(
        &self,
        reader: &mut RecordReader<R>,
        count: u32,
    ) -> Result<Vec<(String, Value)>> {
        let mut members = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let key_id = require(reader, "a member key id")?.as_i32()?;
            let key = self.dictionary.lookup(key_id);
            if key.is_empty() {
                tracing::warn!(key_id, "key id has no dictionary entry, using empty key");
            }

            let value_record = require(reader, "a member value")?;
            if matches!(
                value_record.tag,
                TypeTag::MemberCount | TypeTag::DictionaryMarker
            ) {
                return Err(JpackError::malformed(format!(
                    "{:?} record found where a member value was expected",
                    value_record.tag
                )));
            }
            members.push((key.to_owned(), value_record.to_json()?));
        }
        Ok(members)
    }
}

/// Object members in stream order; repeated keys are all written.
struct Members<'a>(&'a [(String, Value)]);

impl Serialize for Members<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(key, value)| (key, value)))
    }
}

fn require<R: Read + Seek>(reader: &mut RecordReader<R>, what: &str) -> Result<Record> {
    reader
        .read_record_checked()?
        .ok_or_else(|| JpackError::malformed(format!("stream ended while expecting {}", what)))
}
