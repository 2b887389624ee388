//! Benchmark Kernels v1 — Fixture Checker
//!
//! Loads the runs recorded from the compiled benchmark programs, replays each
//! through the truncating kernels and compares stdout and exit status.
//! Float runs from the widened programs are compared within tolerance.
//! Also recomputes the golden sweep hash.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use bench_kernels::fixtures::{
    float_agrees, load_fixtures, load_float_fixtures, replay_fixture, replay_float_fixture,
};
use bench_kernels::hashing::canonical_hash;
use bench_kernels::sweep::{golden_plans, run_sweep};
use bench_kernels::Semantics;

const GOLDEN_DIRS: [&str; 3] = [
    "tests/golden",
    "bench_kernels/tests/golden",
    "../bench_kernels/tests/golden",
];

fn find_golden_dir() -> Option<PathBuf> {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| {
            GOLDEN_DIRS
                .iter()
                .map(PathBuf::from)
                .find(|p| p.join("fixtures.json").exists())
        })
}

fn main() -> Result<()> {
    let Some(dir) = find_golden_dir() else {
        bail!("could not find tests/golden/fixtures.json; pass the golden directory as the first argument");
    };
    println!("Loaded fixtures from: {}", dir.display());

    let fixtures = load_fixtures(&dir.join("fixtures.json"))?;

    let mut total = 0;
    let mut passed = 0;
    for fixture in &fixtures {
        total += 1;
        let actual = replay_fixture(fixture)
            .with_context(|| format!("replaying {} {:?}", fixture.kernel, fixture.inputs))?;
        let expected = fixture.expected();
        if actual == expected {
            passed += 1;
        } else {
            println!("[FAIL] {} {:?}:", fixture.kernel, fixture.inputs);
            println!(
                "  C:    stdout={:?} status={}",
                expected.stdout.as_deref().unwrap_or(""),
                expected.status
            );
            println!(
                "  Rust: stdout={:?} status={}",
                actual.stdout.as_deref().unwrap_or(""),
                actual.status
            );
        }
    }

    let (float_passed, float_total) = check_float_fixtures(&dir)?;
    total += float_total;
    passed += float_passed;

    let hash_ok = check_golden_hash(&dir)?;

    println!("\n===========================================");
    println!("Results: {}/{} fixtures passed", passed, total);
    if passed == total && hash_ok {
        println!("[OK] All reference checks PASSED.");
        Ok(())
    } else {
        println!("[FAIL] Some checks failed.");
        std::process::exit(1);
    }
}

fn check_float_fixtures(dir: &Path) -> Result<(usize, usize)> {
    let path = dir.join("float_fixtures.json");
    if !path.exists() {
        return Ok((0, 0));
    }
    let fixtures = load_float_fixtures(&path)?;

    let mut passed = 0;
    for fixture in &fixtures {
        let actual = replay_float_fixture(fixture)
            .with_context(|| format!("replaying {} {:?}", fixture.kernel, fixture.inputs))?;
        match (fixture.expected(), actual) {
            (Some(expected), Some(v)) if float_agrees(expected, v) => passed += 1,
            _ => {
                println!("[FAIL] float {} {:?}:", fixture.kernel, fixture.inputs);
                println!("  C:    {}", fixture.result);
                println!("  Rust: {:?}", actual);
            }
        }
    }
    Ok((passed, fixtures.len()))
}

fn check_golden_hash(dir: &Path) -> Result<bool> {
    let path = dir.join("expected_hash.txt");
    let expected = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let expected = expected.trim();

    let report = run_sweep(&golden_plans(), Semantics::Truncating)?;
    let actual = canonical_hash(&report);
    if actual == expected {
        println!("[PASS] golden sweep: {} samples, hash={}", report.sample_count(), actual);
        Ok(true)
    } else {
        println!("[FAIL] golden sweep hash mismatch: rust={} expected={}", actual, expected);
        Ok(false)
    }
}
