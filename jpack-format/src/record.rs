//! TLV record structures and stream reader/writer
//!
//! Every record on the wire is laid out as
//!
//! ```text
//! +-----+----------------------+-----------------+
//! | tag | length (u64, LE)     | payload         |
//! | 1 B | 8 B                  | `length` bytes  |
//! +-----+----------------------+-----------------+
//! ```
//!
//! The length field is always present and exact; nothing past it belongs to
//! the record.

use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

use crate::constants::{LENGTH_LEN, RECORD_HEADER_LEN};
use crate::error::{JpackError, Result};
use crate::limits::Limits;
use crate::types::TypeTag;

/// Tag and length of a record, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// Record type
    pub tag: TypeTag,
    /// Payload length in bytes
    pub length: u64,
}

impl RecordHeader {
    /// Encode header to its fixed 9-byte wire form
    pub fn encode(&self) -> [u8; RECORD_HEADER_LEN] {
        let mut bytes = [0u8; RECORD_HEADER_LEN];
        bytes[0] = self.tag.as_u8();
        bytes[1..].copy_from_slice(&self.length.to_le_bytes());
        bytes
    }

    /// Decode header from its fixed 9-byte wire form
    pub fn decode(bytes: &[u8; RECORD_HEADER_LEN]) -> Self {
        let mut length = [0u8; LENGTH_LEN];
        length.copy_from_slice(&bytes[1..]);
        Self {
            tag: TypeTag::from_u8(bytes[0]),
            length: u64::from_le_bytes(length),
        }
    }
}

/// A single TLV record with its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Record type
    pub tag: TypeTag,
    /// Raw payload bytes
    pub payload: Vec<u8>,
}

impl Record {
    /// Create a record from a tag and raw payload
    pub fn new(tag: TypeTag, payload: Vec<u8>) -> Self {
        Self { tag, payload }
    }

    /// Member count record for one JSON object
    pub fn member_count(count: u32) -> Self {
        Self::new(TypeTag::MemberCount, count.to_le_bytes().to_vec())
    }

    /// Signed 32-bit integer record (used for values and key ids)
    pub fn int32(value: i32) -> Self {
        Self::new(TypeTag::Int32, value.to_le_bytes().to_vec())
    }

    /// String record, stored without terminator
    pub fn string(value: &str) -> Self {
        Self::new(TypeTag::String, value.as_bytes().to_vec())
    }

    /// Empty record marking the start of the dictionary trailer
    pub fn dictionary_marker() -> Self {
        Self::new(TypeTag::DictionaryMarker, Vec::new())
    }

    /// Payload length as written to the wire
    pub fn length(&self) -> u64 {
        self.payload.len() as u64
    }

    /// Header describing this record
    pub fn header(&self) -> RecordHeader {
        RecordHeader {
            tag: self.tag,
            length: self.length(),
        }
    }

    /// Payload as a fixed-size array, failing when the length disagrees
    pub fn fixed<const N: usize>(&self) -> Result<[u8; N]> {
        <[u8; N]>::try_from(self.payload.as_slice()).map_err(|_| {
            JpackError::malformed(format!(
                "{:?} record must carry {} bytes, found {}",
                self.tag,
                N,
                self.payload.len()
            ))
        })
    }

    /// Payload read as a little-endian `i32`, regardless of the declared tag
    pub fn as_i32(&self) -> Result<i32> {
        self.fixed::<4>().map(i32::from_le_bytes)
    }

    /// Payload read as a little-endian `u32`, regardless of the declared tag
    pub fn as_u32(&self) -> Result<u32> {
        self.fixed::<4>().map(u32::from_le_bytes)
    }

    /// Payload read as UTF-8 text
    pub fn as_str(&self) -> Result<&str> {
        std::str::from_utf8(&self.payload)
            .map_err(|e| JpackError::malformed(format!("string payload is not UTF-8: {}", e)))
    }

    /// Fail unless this record carries the given tag
    pub fn expect_tag(&self, expected: TypeTag) -> Result<&Self> {
        if self.tag == expected {
            Ok(self)
        } else {
            Err(JpackError::malformed(format!(
                "expected {:?} record, found {:?}",
                expected, self.tag
            )))
        }
    }
}

/// Sequential record writer
pub struct RecordWriter<W: Write> {
    inner: W,
    bytes_written: u64,
}

impl<W: Write> RecordWriter<W> {
    /// Wrap a byte sink
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
        }
    }

    /// Append tag + length + payload to the sink
    pub fn write(&mut self, tag: TypeTag, payload: &[u8]) -> Result<()> {
        let header = RecordHeader {
            tag,
            length: payload.len() as u64,
        };
        self.inner.write_all(&header.encode())?;
        self.inner.write_all(payload)?;
        self.bytes_written += (RECORD_HEADER_LEN + payload.len()) as u64;
        Ok(())
    }

    /// Append a complete record to the sink
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        self.write(record.tag, &record.payload)
    }

    /// Total bytes written so far
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush the underlying sink
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Consume the writer and return the underlying sink
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Sequential record reader
///
/// A clean end of input before a tag byte is reported as `Ok(None)`. Any
/// shortfall after a tag byte has been read is a malformed stream.
pub struct RecordReader<R: Read> {
    inner: R,
    limits: Limits,
    position: u64,
    stream_len: Option<u64>,
}

impl<R: Read> RecordReader<R> {
    /// Wrap a byte source
    pub fn new(inner: R, limits: Limits) -> Self {
        Self {
            inner,
            limits,
            position: 0,
            stream_len: None,
        }
    }

    /// Offset of the next unread byte, relative to where reading started
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Consume the reader and return the underlying source
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read the next record header, or `None` at end of stream
    pub fn read_header(&mut self) -> Result<Option<RecordHeader>> {
        let start = self.position;
        let mut tag = [0u8; 1];
        loop {
            match self.inner.read(&mut tag) {
                Ok(0) => return Ok(None),
                Ok(_) => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.position += 1;

        let mut length = [0u8; LENGTH_LEN];
        self.inner.read_exact(&mut length).map_err(|e| {
            truncated(e, format!("record at offset {} has a truncated length", start))
        })?;
        self.position += LENGTH_LEN as u64;

        Ok(Some(RecordHeader {
            tag: TypeTag::from_u8(tag[0]),
            length: u64::from_le_bytes(length),
        }))
    }

    /// Read the next record including its payload, or `None` at end of stream
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        match self.read_header()? {
            Some(header) => self.read_payload(header).map(Some),
            None => Ok(None),
        }
    }

    /// Read the payload announced by `header`
    pub fn read_payload(&mut self, header: RecordHeader) -> Result<Record> {
        self.limits.check_payload_len(header.length)?;

        let mut payload = Vec::new();
        (&mut self.inner)
            .take(header.length)
            .read_to_end(&mut payload)
            .map_err(|e| truncated(e, "record payload could not be read".to_string()))?;
        self.position += payload.len() as u64;

        if payload.len() as u64 != header.length {
            return Err(JpackError::malformed(format!(
                "{:?} record declares {} bytes but only {} remain",
                header.tag,
                header.length,
                payload.len()
            )));
        }

        tracing::trace!(tag = ?header.tag, length = header.length, "read record");
        Ok(Record::new(header.tag, payload))
    }
}

impl<R: Read + Seek> RecordReader<R> {
    /// Seek back to the start of the stream
    pub fn rewind(&mut self) -> Result<()> {
        self.inner.seek(SeekFrom::Start(0))?;
        self.position = 0;
        Ok(())
    }

    /// Read the next record, rejecting lengths that run past the end of the stream
    pub fn read_record_checked(&mut self) -> Result<Option<Record>> {
        let Some(header) = self.read_header()? else {
            return Ok(None);
        };
        self.payload_end(header)?;
        self.read_payload(header).map(Some)
    }

    /// Read the next record header and seek over its payload without buffering it
    pub fn skip_record(&mut self) -> Result<Option<RecordHeader>> {
        let Some(header) = self.read_header()? else {
            return Ok(None);
        };
        let target = self.payload_end(header)?;
        self.inner.seek(SeekFrom::Start(target))?;
        self.position += header.length;

        tracing::trace!(tag = ?header.tag, length = header.length, "skipped record");
        Ok(Some(header))
    }

    // Absolute offset just past the payload of `header`, which must lie inside the stream.
    fn payload_end(&mut self, header: RecordHeader) -> Result<u64> {
        let current = self.inner.stream_position()?;
        let end = self.stream_len()?;
        current
            .checked_add(header.length)
            .filter(|target| *target <= end)
            .ok_or_else(|| {
                JpackError::malformed(format!(
                    "{:?} record declares {} bytes past the end of the stream",
                    header.tag, header.length
                ))
            })
    }

    fn stream_len(&mut self) -> Result<u64> {
        if let Some(len) = self.stream_len {
            return Ok(len);
        }
        let current = self.inner.stream_position()?;
        let len = self.inner.seek(SeekFrom::End(0))?;
        self.inner.seek(SeekFrom::Start(current))?;
        self.stream_len = Some(len);
        Ok(len)
    }
}

fn truncated(err: std::io::Error, reason: String) -> JpackError {
    if err.kind() == ErrorKind::UnexpectedEof {
        JpackError::MalformedStream(reason)
    } else {
        JpackError::Io(err)
    }
}
