//! Integration tests for bench_runtime.
//!
//! All tests use temporary directories for isolation.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use bench_kernels::fixtures::{load_fixtures, Fixture};
use bench_kernels::hashing::canonical_hash;
use bench_kernels::sweep::{golden_plans, run_sweep};
use bench_kernels::{lookup, KernelId, Outcome, Reading, Semantics};

use bench_runtime::drift::compare_reports;
use bench_runtime::harness::run_program;
use bench_runtime::observation_store::ObservationStore;
use bench_runtime::proto_bridge::{observation_to_proto, proto_to_observation};
use bench_runtime::replay::{replay_log, replay_observations};
use bench_runtime::report_codec::{export_report_to_file, import_report_from_file};
use bench_runtime::session::RecordingSession;

fn golden_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("bench_kernels")
        .join("tests")
        .join("golden")
}

fn load_golden_hash() -> String {
    fs::read_to_string(golden_dir().join("expected_hash.txt"))
        .expect("Failed to read expected_hash.txt")
        .trim()
        .to_string()
}

/// Every tenth recorded fixture; enough to touch every kernel.
fn sampled_fixtures() -> Vec<Fixture> {
    load_fixtures(&golden_dir().join("fixtures.json"))
        .expect("Failed to load fixtures.json")
        .into_iter()
        .step_by(10)
        .collect()
}

/// Create a temp directory for a test.
fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join("bench_runtime_tests")
        .join(name);
    if dir.exists() {
        fs::remove_dir_all(&dir).ok();
    }
    fs::create_dir_all(&dir).expect("Failed to create temp dir");
    dir
}

// ─────────────────────────────────────────────────────────────
// Test 1: harness_matches_recorded_programs
// ─────────────────────────────────────────────────────────────

#[test]
fn harness_matches_recorded_programs() {
    for fixture in sampled_fixtures() {
        let spec = lookup(&fixture.kernel).expect("fixture kernel");
        let line: Vec<String> = fixture.inputs.iter().map(i32::to_string).collect();
        let mut out = Vec::new();
        let run = run_program(spec, Semantics::Truncating, line.join(" ").as_bytes(), &mut out)
            .expect("harness run");

        let expected_stdout = if fixture.stdout.is_empty() {
            String::new()
        } else {
            format!("{}\n", fixture.stdout)
        };
        assert_eq!(
            String::from_utf8(out).unwrap(),
            expected_stdout,
            "{} {:?}",
            fixture.kernel,
            fixture.inputs
        );
        assert_eq!(run.output.status, fixture.status, "{} {:?}", fixture.kernel, fixture.inputs);
    }
}

// ─────────────────────────────────────────────────────────────
// Test 2: record_and_replay_is_clean
// ─────────────────────────────────────────────────────────────

#[test]
fn record_and_replay_is_clean() {
    let dir = temp_dir("record_replay");
    let fixtures = sampled_fixtures();

    let mut session = RecordingSession::in_dir(&dir, "golden", Semantics::Truncating)
        .expect("create session");
    for fixture in &fixtures {
        let id = lookup(&fixture.kernel).unwrap().id;
        let inputs: Vec<Reading> = fixture.inputs.iter().copied().map(Reading::Int).collect();
        session.record(id, &inputs).expect("record");
    }
    assert_eq!(session.current_sequence(), fixtures.len() as u64);

    let log = RecordingSession::log_path(&dir, "golden");
    let report = replay_log(&log).expect("replay");
    assert_eq!(report.replayed, fixtures.len());
    assert!(report.is_clean(), "unexpected drift: {:?}", report.mismatches);
}

// ─────────────────────────────────────────────────────────────
// Test 3: store_roundtrip_through_proto
// ─────────────────────────────────────────────────────────────

#[test]
fn store_roundtrip_through_proto() {
    let dir = temp_dir("store_roundtrip");
    let mut session = RecordingSession::open(&dir.join("obs.log"), Semantics::Float).expect("open");
    let recorded = vec![
        session.record(KernelId::Bessj1, &[Reading::Real(1.0)]).unwrap(),
        session.record(KernelId::Rc, &[Reading::Real(1.0), Reading::Real(1.0)]).unwrap(),
        session.record(KernelId::Gammln, &[Reading::Real(-1.0)]).unwrap(),
        session.record(KernelId::Julday, &[Reading::Real(1.0), Reading::Real(1.0), Reading::Real(0.0)]).unwrap(),
    ];

    let store = ObservationStore::open(&dir.join("obs.log")).expect("reopen");
    let loaded: Vec<_> = store
        .load_all()
        .expect("load")
        .iter()
        .map(|p| proto_to_observation(p).expect("bridge"))
        .collect();
    assert_eq!(loaded, recorded);
    assert!(matches!(loaded[1].outcome, Outcome::Fault(_)));
    assert!(matches!(loaded[3].outcome, Outcome::DomainError { .. }));

    let report = replay_observations(&loaded).expect("replay");
    assert!(report.is_clean());
}

// ─────────────────────────────────────────────────────────────
// Test 4: separate_sessions_isolated
// ─────────────────────────────────────────────────────────────

#[test]
fn separate_sessions_isolated() {
    let dir = temp_dir("separate_sessions");
    let mut a = RecordingSession::in_dir(&dir, "a", Semantics::Truncating).unwrap();
    let mut b = RecordingSession::in_dir(&dir, "b", Semantics::Truncating).unwrap();

    for x in 0..5 {
        a.record(KernelId::Erfcc, &[Reading::Int(x)]).unwrap();
    }
    b.record(KernelId::Erfcc, &[Reading::Int(0)]).unwrap();

    assert_eq!(a.current_sequence(), 5);
    assert_eq!(b.current_sequence(), 1);
    assert_eq!(b.observations().unwrap().len(), 1);
}

// ─────────────────────────────────────────────────────────────
// Test 5: corrupted_log_detection
// ─────────────────────────────────────────────────────────────

#[test]
fn corrupted_log_detection() {
    let dir = temp_dir("corrupted_log");
    let log_path = dir.join("observations.log");
    {
        let mut session = RecordingSession::open(&log_path, Semantics::Truncating).unwrap();
        for x in 1..=5 {
            session.record(KernelId::RanzeroNeq, &[Reading::Int(x)]).unwrap();
        }
    }

    // Cut 3 bytes off the last frame
    let data = fs::read(&log_path).expect("read log");
    fs::write(&log_path, &data[..data.len() - 3]).expect("truncate");

    let err = ObservationStore::open(&log_path).err().expect("truncation must be detected");
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert!(replay_log(&log_path).is_err());
}

// ─────────────────────────────────────────────────────────────
// Test 6: tampered_log_is_reported_as_drift
// ─────────────────────────────────────────────────────────────

#[test]
fn tampered_log_is_reported_as_drift() {
    let dir = temp_dir("tampered_log");
    let source = dir.join("source.log");
    let tampered = dir.join("tampered.log");

    let mut session = RecordingSession::open(&source, Semantics::Truncating).unwrap();
    let honest = session.record(KernelId::Power, &[Reading::Int(3), Reading::Int(9)]).unwrap();

    let mut forged = honest.clone();
    forged.outcome = Outcome::Value(Reading::Int(13));
    let mut store = ObservationStore::open(&tampered).unwrap();
    store.append(&observation_to_proto(&forged)).unwrap();

    assert!(replay_log(&source).unwrap().is_clean());
    let report = replay_log(&tampered).unwrap();
    assert_eq!(report.mismatches.len(), 1);
    assert_eq!(report.mismatches[0].replayed, Outcome::Value(Reading::Int(3)));
}

// ─────────────────────────────────────────────────────────────
// Test 7: exported_golden_report_keeps_hash
// ─────────────────────────────────────────────────────────────

#[test]
fn exported_golden_report_keeps_hash() {
    let dir = temp_dir("golden_report");
    let report = run_sweep(&golden_plans(), Semantics::Truncating).unwrap();
    let path = dir.join("golden.json");

    export_report_to_file(&report, &path).expect("export");
    let imported = import_report_from_file(&path).expect("import");

    assert_eq!(canonical_hash(&imported), load_golden_hash());
    let drift = compare_reports(&report, &imported);
    assert!(!drift.has_drift());
    assert_eq!(drift.compared, report.sample_count());
}

// ─────────────────────────────────────────────────────────────
// Test 8: float_sweep_differs_from_truncating
// ─────────────────────────────────────────────────────────────

#[test]
fn float_sweep_differs_from_truncating() {
    let plans = [bench_kernels::SweepPlan::new(KernelId::Bessj1, -3, 3)];
    let trunc = run_sweep(&plans, Semantics::Truncating).unwrap();
    let float = run_sweep(&plans, Semantics::Float).unwrap();

    let drift = compare_reports(&trunc, &float);
    assert!(drift.has_drift());
    // Inputs are typed differently, so no sample matches up.
    assert_eq!(drift.compared, 0);
    assert_eq!(drift.missing.len(), 7);
    assert_eq!(drift.added.len(), 7);
}

// ─────────────────────────────────────────────────────────────
// Test 9: simple_branch_reads_first_argument_only
// ─────────────────────────────────────────────────────────────

fn simple_branch_test(args: &[&str]) -> (String, Option<i32>) {
    let out = Command::new(env!("CARGO_BIN_EXE_simple-branch-test"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn simple-branch-test");
    (String::from_utf8(out.stdout).unwrap(), out.status.code())
}

#[test]
fn simple_branch_reads_first_argument_only() {
    assert_eq!(simple_branch_test(&["15"]), (String::from("greater than 10: 30\n"), Some(30)));
    assert_eq!(
        simple_branch_test(&["3", "4"]),
        (String::from("less than or equal to 5: 2\n"), Some(2))
    );
    assert_eq!(simple_branch_test(&["7", "--bogus"]).0, "greater than 5: 17\n");
}

#[cfg(unix)]
#[test]
fn simple_branch_treats_flags_as_junk() {
    let cases: [&[&str]; 3] = [&["-h"], &["-V"], &[]];
    for args in cases {
        assert_eq!(
            simple_branch_test(args),
            (String::from("less than or equal to 5: -1\n"), Some(255)),
            "{args:?}"
        );
    }
}
