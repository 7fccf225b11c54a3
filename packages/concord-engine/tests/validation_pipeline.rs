//! End-to-end validation runs through the public API
//!
//! Each test writes a real snapshot file, runs the full pipeline, and
//! checks the output pair on disk: resolved mappings ascending by
//! variant, failures logged line by line, nothing written on fatal
//! errors.

use std::io::Write;
use std::path::PathBuf;

use flate2::write::GzEncoder;
use flate2::Compression;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use concord_engine::{
    canonical_ocn, validate_file, ConcordanceGraph, EngineConfig, Ocn, ResolverLimits,
    ValidationRequest,
};

fn write_snapshot(dir: &TempDir, name: &str, rows: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, rows).unwrap();
    path
}

fn write_gzip_snapshot(dir: &TempDir, name: &str, rows: &str) -> PathBuf {
    let path = dir.path().join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut enc = GzEncoder::new(file, Compression::default());
    enc.write_all(rows.as_bytes()).unwrap();
    enc.finish().unwrap();
    path
}

fn request(dir: &TempDir, input: PathBuf) -> ValidationRequest {
    ValidationRequest {
        input,
        output: dir.path().join("out/validated.tsv"),
        log: dir.path().join("out/failures.log"),
    }
}

#[test]
fn test_chain_resolves_every_variant_to_the_terminal() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir, "snap.txt", "1\t2\n2\t3\n");
    let req = request(&dir, input);

    let report = validate_file(&req, &EngineConfig::default()).unwrap();
    assert_eq!(report.resolved, 2);
    assert!(report.is_fully_resolved());
    assert_eq!(
        std::fs::read_to_string(&req.output).unwrap(),
        "1\t3\n2\t3\n"
    );
    assert_eq!(std::fs::read_to_string(&req.log).unwrap(), "");
}

#[test]
fn test_output_is_ascending_by_variant_regardless_of_input_order() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir, "snap.txt", "10\t3\n2\t3\n1\t2\n");
    let req = request(&dir, input);

    validate_file(&req, &EngineConfig::default()).unwrap();
    assert_eq!(
        std::fs::read_to_string(&req.output).unwrap(),
        "1\t3\n2\t3\n10\t3\n"
    );
}

#[test]
fn test_self_mappings_are_dropped_not_resolved() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir, "snap.txt", "7\t7\n1\t2\n");
    let req = request(&dir, input);

    let report = validate_file(&req, &EngineConfig::default()).unwrap();
    assert_eq!(report.self_mappings, 1);
    assert_eq!(report.variants, 1);
    assert_eq!(std::fs::read_to_string(&req.output).unwrap(), "1\t2\n");

    // 7 kept no edges, so as a lookup it resolves to itself.
    let graph = ConcordanceGraph::load(&req.input).unwrap();
    assert_eq!(
        canonical_ocn(&graph, Ocn(7), ResolverLimits::default()).unwrap(),
        Ocn(7)
    );
}

#[test]
fn test_ambiguous_variant_is_logged_and_skipped() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir, "snap.txt", "1\t3\n1\t2\n4\t5\n");
    let req = request(&dir, input);

    let report = validate_file(&req, &EngineConfig::default()).unwrap();
    assert_eq!(report.resolved, 1);
    assert_eq!(report.failure_count(), 1);
    assert_eq!(std::fs::read_to_string(&req.output).unwrap(), "4\t5\n");
    assert_eq!(
        std::fs::read_to_string(&req.log).unwrap(),
        "ambiguous resolution for OCN 1: canonical candidates [2, 3]\n"
    );
}

#[test]
fn test_every_cycle_member_is_logged() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir, "snap.txt", "1\t2\n2\t3\n3\t1\n9\t10\n");
    let req = request(&dir, input);

    let report = validate_file(&req, &EngineConfig::default()).unwrap();
    assert_eq!(report.resolved, 1);
    assert_eq!(report.failure_count(), 3);
    assert_eq!(std::fs::read_to_string(&req.output).unwrap(), "9\t10\n");
    assert_eq!(
        std::fs::read_to_string(&req.log).unwrap(),
        "cycle detected for OCN 1: unresolved OCNs [1, 2, 3]\n\
         cycle detected for OCN 2: unresolved OCNs [1, 2, 3]\n\
         cycle detected for OCN 3: unresolved OCNs [1, 2, 3]\n"
    );
}

#[test]
fn test_duplicate_mapping_lines_surface_as_ambiguity() {
    // Identical duplicate lines are kept, and both copies reach the
    // ambiguity check, so the log shows the duplication verbatim.
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir, "snap.txt", "1\t2\n1\t2\n");
    let req = request(&dir, input);

    let report = validate_file(&req, &EngineConfig::default()).unwrap();
    assert_eq!(report.resolved, 0);
    assert_eq!(
        std::fs::read_to_string(&req.log).unwrap(),
        "ambiguous resolution for OCN 1: canonical candidates [2, 2]\n"
    );
}

#[test]
fn test_malformed_file_fails_with_exact_count_and_no_outputs() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir, "snap.txt", "1\t2\n1 2\n\nx\ty\n3\t4\n");
    let req = request(&dir, input);

    let err = validate_file(&req, &EngineConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "3 line(s) are malformed");
    assert!(!req.output.exists());
    assert!(!req.log.exists());
}

#[test]
fn test_gzip_and_plain_snapshots_produce_identical_outputs() {
    let rows = "1\t2\n2\t3\n4\t5\n4\t6\n";
    let dir = TempDir::new().unwrap();

    let plain_req = ValidationRequest {
        input: write_snapshot(&dir, "snap.txt", rows),
        output: dir.path().join("plain/validated.tsv"),
        log: dir.path().join("plain/failures.log"),
    };
    let gz_req = ValidationRequest {
        input: write_gzip_snapshot(&dir, "snap.txt.gz", rows),
        output: dir.path().join("gz/validated.tsv"),
        log: dir.path().join("gz/failures.log"),
    };

    let config = EngineConfig::default();
    validate_file(&plain_req, &config).unwrap();
    validate_file(&gz_req, &config).unwrap();

    assert_eq!(
        std::fs::read_to_string(&plain_req.output).unwrap(),
        std::fs::read_to_string(&gz_req.output).unwrap()
    );
    assert_eq!(
        std::fs::read_to_string(&plain_req.log).unwrap(),
        std::fs::read_to_string(&gz_req.log).unwrap()
    );
}

#[test]
fn test_validated_output_is_a_fixed_point() {
    // Re-validating a validated file must reproduce it byte for byte:
    // every mapping in it is already variant-to-terminal.
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir, "snap.txt", "1\t2\n2\t3\n5\t3\n8\t9\n");
    let first = request(&dir, input);

    let config = EngineConfig::default();
    validate_file(&first, &config).unwrap();

    let second = ValidationRequest {
        input: first.output.clone(),
        output: dir.path().join("again/validated.tsv"),
        log: dir.path().join("again/failures.log"),
    };
    let report = validate_file(&second, &config).unwrap();

    assert!(report.is_fully_resolved());
    assert_eq!(
        std::fs::read_to_string(&first.output).unwrap(),
        std::fs::read_to_string(&second.output).unwrap()
    );
}

#[test]
fn test_hop_ceiling_from_config_file_is_applied() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("engine.yaml");
    std::fs::write(&config_path, "version: 1\nresolver:\n  max_hops: 1\n").unwrap();
    let config = EngineConfig::from_yaml(&config_path).unwrap();
    assert_eq!(config.resolver.max_hops, 1);

    // Seed 1 needs two hops to reach 3; seed 2 needs one.
    let input = write_snapshot(&dir, "snap.txt", "1\t2\n2\t3\n");
    let req = request(&dir, input);
    let report = validate_file(&req, &config).unwrap();

    assert_eq!(report.resolved, 1);
    assert_eq!(report.failure_count(), 1);
    assert_eq!(std::fs::read_to_string(&req.output).unwrap(), "2\t3\n");
    assert_eq!(
        std::fs::read_to_string(&req.log).unwrap(),
        "resolution aborted for OCN 1: hop ceiling reached\n"
    );
}

#[test]
fn test_report_serializes_to_json() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir, "snap.txt", "1\t2\n1\t3\n");
    let req = request(&dir, input);

    let report = validate_file(&req, &EngineConfig::default()).unwrap();
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"kind\":\"ambiguous\""));
    assert!(json.contains("\"implicated\":[2,3]"));
    assert!(json.contains("\"variants\":1"));
}
