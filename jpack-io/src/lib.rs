//! JPack I/O - File-level conversion
//!
//! This crate connects the codec to the filesystem:
//!
//! - Input existence and output overwrite checks
//! - Opening handles in the mode each method needs
//! - Atomic output through a temporary file in the destination directory

#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;
use tempfile::NamedTempFile;

// Re-export commonly used types
pub use jpack_codec::{InputMode, Method, PackInput, Packer, PackerRegistry, RunSummary};
pub use jpack_format::{JpackError, Limits, Result};

/// Options shared by every file-level conversion
#[derive(Debug, Clone)]
pub struct PackOptions {
    /// Resource limits applied while reading
    pub limits: Limits,
    /// Write to a temporary file and rename it over the output on success
    pub atomic_output: bool,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            atomic_output: true,
        }
    }
}

/// One conversion from an input file to an output file
#[derive(Debug, Clone)]
pub struct PackRequest {
    /// Method name, resolved through the registry
    pub method: String,
    /// File to read
    pub input: PathBuf,
    /// File to create or replace
    pub output: PathBuf,
    /// Replace `output` if it already exists
    pub overwrite: bool,
    /// Conversion options
    pub options: PackOptions,
}

impl PackRequest {
    /// Request with default options and no overwrite
    pub fn new(
        method: impl Into<String>,
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            method: method.into(),
            input: input.into(),
            output: output.into(),
            overwrite: false,
            options: PackOptions::default(),
        }
    }

    /// Allow replacing an existing output file
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Replace the conversion options
    pub fn options(mut self, options: PackOptions) -> Self {
        self.options = options;
        self
    }
}

/// Outcome of a finished conversion
#[derive(Debug, Clone, Serialize)]
pub struct PackSummary {
    /// Method that ran
    pub method: Method,
    /// Input path as given
    pub input: PathBuf,
    /// Output path as given
    pub output: PathBuf,
    /// Counters reported by the algorithm
    pub run: RunSummary,
    /// Wall time of the conversion
    pub elapsed: Duration,
}

/// Resolve the method, check both paths and run the conversion
pub fn execute(request: &PackRequest, registry: &PackerRegistry) -> Result<PackSummary> {
    let method = registry.resolve(&request.method)?;

    if !request.input.exists() {
        return Err(JpackError::missing("file", request.input.display().to_string()));
    }
    if request.output.exists() && !request.overwrite {
        return Err(JpackError::already_exists(
            "file",
            request.output.display().to_string(),
        ));
    }

    tracing::debug!(
        %method,
        input = %request.input.display(),
        output = %request.output.display(),
        atomic = request.options.atomic_output,
        "starting conversion"
    );

    let started = Instant::now();
    let mut packer = Packer::new(method, request.options.limits.clone());
    let input = open_input(&request.input, method.input_mode())?;

    let run = if request.options.atomic_output {
        let mut staged = staging_file(&request.output)?;
        let run = packer.run(input, staged.as_file_mut())?;
        staged.as_file_mut().flush()?;
        staged
            .persist(&request.output)
            .map_err(|err| JpackError::Io(err.error))?;
        run
    } else {
        packer.run(input, File::create(&request.output)?)?
    };

    let summary = PackSummary {
        method,
        input: request.input.clone(),
        output: request.output.clone(),
        run,
        elapsed: started.elapsed(),
    };
    tracing::debug!(
        records = summary.run.records(),
        bytes = summary.run.bytes_written(),
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "conversion finished"
    );
    Ok(summary)
}

fn open_input(path: &Path, mode: InputMode) -> Result<PackInput<'static>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(match mode {
        InputMode::Sequential => PackInput::sequential(reader),
        InputMode::Seekable => PackInput::seekable(reader),
    })
}

// Same directory as the destination so the final rename never crosses filesystems.
fn staging_file(output: &Path) -> Result<NamedTempFile> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staged = tempfile::Builder::new()
        .prefix(".jpack-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tracing::trace!(path = %staged.path().display(), "staging output");
    Ok(staged)
}
