//! Integration test: the `sift` binary's output and exit codes.

use std::process::{Command, Output};

fn sift(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sift"))
        .args(args)
        .env_remove("SIFT_WORKERS")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8(out.stdout.clone()).unwrap()
}

#[test]
fn counts_primes_to_one_hundred() {
    let out = sift(&["100"]);
    assert!(out.status.success());
    let text = stdout(&out);
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("There are 25 primes less than or equal to 100")
    );
    let timing = lines.next().unwrap();
    assert!(timing.starts_with("SIEVE (1) "), "{timing}");
    let secs: f64 = timing["SIEVE (1) ".len()..].trim().parse().unwrap();
    assert!(secs >= 0.0);
}

#[test]
fn every_option_combination_agrees() {
    for protocol in ["broadcast", "replicated"] {
        for layout in ["dense", "odd-only"] {
            let out = sift(&["10000", "-p", "3", "--protocol", protocol, "--layout", layout]);
            assert!(out.status.success(), "{protocol} {layout}");
            assert!(stdout(&out).starts_with("There are 1229 primes less than or equal to 10000\n"));
            assert!(stdout(&out).contains("SIEVE (3) "));
        }
    }
}

#[test]
fn workers_from_environment() {
    let out = Command::new(env!("CARGO_BIN_EXE_sift"))
        .arg("1000")
        .env("SIFT_WORKERS", "4")
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(stdout(&out).contains("SIEVE (4) "));
}

#[test]
fn too_many_workers_exits_one_without_a_count() {
    let out = sift(&["10", "--workers", "16"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!stdout(&out).contains("There are"));
    let err = String::from_utf8(out.stderr).unwrap();
    assert!(err.contains("too many workers"), "{err}");
    assert_eq!(err.matches("too many workers").count(), 1, "{err}");
}

#[test]
fn coordinator_ending_below_isqrt_still_counts() {
    let out = sift(&["100", "--workers", "12"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("There are 25 primes less than or equal to 100"));
}

#[test]
fn missing_bound_is_a_usage_error() {
    let out = sift(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}

#[test]
fn malformed_bound_is_a_usage_error() {
    for bad in ["ten", "-5", "1.5"] {
        let out = sift(&[bad]);
        assert_eq!(out.status.code(), Some(1), "{bad}");
    }
}

#[test]
fn extra_positional_is_a_usage_error() {
    let out = sift(&["100", "200"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn help_exits_zero() {
    let out = sift(&["--help"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("--workers"));
}

#[test]
fn tiny_bounds_print_zero_and_one() {
    let out = sift(&["1"]);
    assert!(stdout(&out).starts_with("There are 0 primes less than or equal to 1\n"));
    let out = sift(&["2"]);
    assert!(stdout(&out).starts_with("There are 1 primes less than or equal to 2\n"));
}
