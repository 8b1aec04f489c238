//! Method selection: the two conversion algorithms and the name registry

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, BufRead, Seek, Write};

use jpack_format::{JpackError, Limits, Result};
use serde::Serialize;

use crate::decoder::{DecodeSummary, TlvToJson};
use crate::dictionary::KeyDictionary;
use crate::encoder::{EncodeSummary, JsonToTlv};

/// Conversion direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// NDJSON → TLV
    Encode,
    /// TLV → NDJSON
    Decode,
}

impl Method {
    /// Canonical method name
    pub fn name(self) -> &'static str {
        match self {
            Method::Encode => "json2tlv",
            Method::Decode => "tlv2json",
        }
    }

    /// How this method reads its input
    pub fn input_mode(self) -> InputMode {
        match self {
            Method::Encode => InputMode::Sequential,
            Method::Decode => InputMode::Seekable,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a method reads its input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Front to back, once
    Sequential,
    /// More than once, rewinding in between
    Seekable,
}

/// Buffered reader that can also seek
pub trait SeekRead: BufRead + Seek {}

impl<T: BufRead + Seek> SeekRead for T {}

/// Input handle handed to [`Packer::run`]
pub enum PackInput<'a> {
    /// Reader without random access, e.g. a pipe
    Sequential(Box<dyn BufRead + 'a>),
    /// Reader with random access, e.g. a file
    Seekable(Box<dyn SeekRead + 'a>),
}

impl<'a> PackInput<'a> {
    /// Wrap a reader that is only read front to back
    pub fn sequential<R: BufRead + 'a>(reader: R) -> Self {
        PackInput::Sequential(Box::new(reader))
    }

    /// Wrap a reader that supports seeking
    pub fn seekable<R: BufRead + Seek + 'a>(reader: R) -> Self {
        PackInput::Seekable(Box::new(reader))
    }

    /// Mode this handle satisfies
    pub fn mode(&self) -> InputMode {
        match self {
            PackInput::Sequential(_) => InputMode::Sequential,
            PackInput::Seekable(_) => InputMode::Seekable,
        }
    }
}

/// Name → method table, built by the caller and passed to the entry point
#[derive(Debug, Clone, Default)]
pub struct PackerRegistry {
    methods: BTreeMap<String, Method>,
}

impl PackerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the canonical names and their `encode`/`decode` aliases
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (name, method) in [
            ("json2tlv", Method::Encode),
            ("encode", Method::Encode),
            ("tlv2json", Method::Decode),
            ("decode", Method::Decode),
        ] {
            registry.methods.insert(name.to_string(), method);
        }
        registry
    }

    /// Register `name`; fails if it is already taken
    pub fn register(&mut self, name: &str, method: Method) -> Result<()> {
        if self.methods.contains_key(name) {
            return Err(JpackError::already_exists("method", name));
        }
        self.methods.insert(name.to_string(), method);
        Ok(())
    }

    /// Resolve a method by name
    pub fn resolve(&self, name: &str) -> Result<Method> {
        self.methods
            .get(name)
            .copied()
            .ok_or_else(|| JpackError::missing("method", name))
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.methods.keys().map(String::as_str)
    }
}

/// One of the two conversion algorithms, ready to run
#[derive(Debug)]
pub enum Packer {
    /// NDJSON → TLV
    Encode(JsonToTlv),
    /// TLV → NDJSON
    Decode(TlvToJson),
}

impl Packer {
    /// Build the algorithm for `method`
    pub fn new(method: Method, limits: Limits) -> Self {
        match method {
            Method::Encode => Packer::Encode(JsonToTlv::new(limits)),
            Method::Decode => Packer::Decode(TlvToJson::new(limits)),
        }
    }

    /// Method this packer implements
    pub fn method(&self) -> Method {
        match self {
            Packer::Encode(_) => Method::Encode,
            Packer::Decode(_) => Method::Decode,
        }
    }

    /// Dictionary left behind by the last run
    pub fn dictionary(&self) -> &KeyDictionary {
        match self {
            Packer::Encode(encoder) => encoder.dictionary(),
            Packer::Decode(decoder) => decoder.dictionary(),
        }
    }

    /// Convert `input` into `output`
    ///
    /// Encoding accepts either input mode. Decoding fails before reading
    /// anything when the input cannot seek.
    pub fn run<W: Write>(&mut self, input: PackInput<'_>, output: W) -> Result<RunSummary> {
        match (self, input) {
            (Packer::Encode(encoder), PackInput::Sequential(input)) => {
                encoder.run(input, output).map(RunSummary::Encode)
            }
            (Packer::Encode(encoder), PackInput::Seekable(input)) => {
                encoder.run(input, output).map(RunSummary::Encode)
            }
            (Packer::Decode(decoder), PackInput::Seekable(input)) => {
                decoder.run(input, output).map(RunSummary::Decode)
            }
            (Packer::Decode(_), PackInput::Sequential(_)) => Err(JpackError::Io(io::Error::new(
                io::ErrorKind::Unsupported,
                "tlv2json needs a seekable input",
            ))),
        }
    }
}

/// Counters from either algorithm
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunSummary {
    /// Result of an encode run
    Encode(EncodeSummary),
    /// Result of a decode run
    Decode(DecodeSummary),
}

impl RunSummary {
    /// JSON objects processed
    pub fn records(&self) -> usize {
        match self {
            RunSummary::Encode(summary) => summary.records,
            RunSummary::Decode(summary) => summary.records,
        }
    }

    /// Distinct keys in the dictionary
    pub fn dictionary_entries(&self) -> usize {
        match self {
            RunSummary::Encode(summary) => summary.dictionary_entries,
            RunSummary::Decode(summary) => summary.dictionary_entries,
        }
    }

    /// Bytes written to the sink
    pub fn bytes_written(&self) -> u64 {
        match self {
            RunSummary::Encode(summary) => summary.bytes_written,
            RunSummary::Decode(summary) => summary.bytes_written,
        }
    }
}
