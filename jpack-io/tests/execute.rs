//! File-level conversions through `execute`

use jpack_io::{execute, JpackError, Method, PackOptions, PackRequest, PackerRegistry};
use jpack_test_utils::assertions::assert_ndjson_equal;
use jpack_test_utils::fixtures;
use std::fs;
use std::path::Path;

fn write_sample(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("sample.json");
    fs::write(&path, fixtures::SAMPLE_LINES.join("\n")).unwrap();
    path
}

#[test]
fn encode_writes_reference_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());
    let output = dir.path().join("sample.tlv");

    let summary = execute(
        &PackRequest::new("json2tlv", &input, &output),
        &PackerRegistry::with_defaults(),
    )
    .unwrap();

    assert_eq!(summary.method, Method::Encode);
    assert_eq!(summary.run.records(), 2);
    assert_eq!(fs::read(&output).unwrap(), fixtures::sample_tlv());
    assert_eq!(
        summary.run.bytes_written(),
        fixtures::sample_tlv().len() as u64
    );
}

#[test]
fn decode_restores_lines() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.tlv");
    let output = dir.path().join("sample.json");
    fs::write(&input, fixtures::sample_tlv()).unwrap();

    let summary = execute(
        &PackRequest::new("tlv2json", &input, &output),
        &PackerRegistry::with_defaults(),
    )
    .unwrap();

    assert_eq!(summary.method, Method::Decode);
    assert_eq!(summary.run.dictionary_entries(), 6);
    let text = fs::read_to_string(&output).unwrap();
    assert_ndjson_equal(&text, &fixtures::SAMPLE_LINES.join("\n"));
}

#[test]
fn missing_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("absent.json");
    let output = dir.path().join("out.tlv");

    let err = execute(
        &PackRequest::new("json2tlv", &input, &output),
        &PackerRegistry::with_defaults(),
    )
    .unwrap_err();

    assert!(matches!(err, JpackError::Missing { ref kind, .. } if kind == "file"));
    assert!(err.to_string().ends_with("is missing"));
    assert!(!output.exists());
}

#[test]
fn existing_output_needs_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());
    let output = dir.path().join("out.tlv");
    fs::write(&output, b"keep me").unwrap();
    let registry = PackerRegistry::with_defaults();

    let err = execute(&PackRequest::new("json2tlv", &input, &output), &registry).unwrap_err();
    assert!(matches!(err, JpackError::AlreadyExists { .. }));
    assert_eq!(fs::read(&output).unwrap(), b"keep me");

    execute(
        &PackRequest::new("json2tlv", &input, &output).overwrite(true),
        &registry,
    )
    .unwrap();
    assert_eq!(fs::read(&output).unwrap(), fixtures::sample_tlv());
}

#[test]
fn unknown_method_is_reported_before_touching_files() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.tlv");

    let err = execute(
        &PackRequest::new("zip", dir.path().join("absent.json"), &output),
        &PackerRegistry::with_defaults(),
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "The method \"zip\" is missing");
}

#[test]
fn failed_atomic_run_leaves_destination_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.json");
    let output = dir.path().join("out.tlv");
    fs::write(&input, "{\"a\":1}\n{\"a\":").unwrap();
    fs::write(&output, b"previous").unwrap();

    let err = execute(
        &PackRequest::new("json2tlv", &input, &output).overwrite(true),
        &PackerRegistry::with_defaults(),
    )
    .unwrap_err();

    assert!(matches!(err, JpackError::Parse { line: 2, .. }));
    assert_eq!(fs::read(&output).unwrap(), b"previous");
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(".jpack-"))
        .collect();
    assert!(leftovers.is_empty(), "staging files left: {:?}", leftovers);
}

#[test]
fn failed_direct_run_keeps_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.json");
    let output = dir.path().join("out.tlv");
    fs::write(&input, "{\"a\":1}\nnot json").unwrap();

    let options = PackOptions {
        atomic_output: false,
        ..PackOptions::default()
    };
    let result = execute(
        &PackRequest::new("json2tlv", &input, &output).options(options),
        &PackerRegistry::with_defaults(),
    );

    assert!(result.is_err());
    assert!(output.exists());
}

#[test]
fn malformed_tlv_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.tlv");
    let output = dir.path().join("out.json");
    fs::write(&input, fixtures::without_dictionary()).unwrap();

    let err = execute(
        &PackRequest::new("decode", &input, &output),
        &PackerRegistry::with_defaults(),
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "The dictionary is missing");
    assert!(!output.exists());
}

#[test]
fn summary_serializes_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());
    let output = dir.path().join("sample.tlv");

    let summary = execute(
        &PackRequest::new("encode", &input, &output),
        &PackerRegistry::with_defaults(),
    )
    .unwrap();
    let value = serde_json::to_value(&summary).unwrap();

    assert_eq!(value["method"], "encode");
    assert_eq!(value["run"]["encode"]["records"], 2);
    assert_eq!(value["run"]["encode"]["dictionary_entries"], 6);
}
