//! Argument parsing and usage exit codes

use std::process::Command;

use certgen::cli::{exit_code_for, Cli, USAGE_EXIT_CODE};
use certgen::BackendKind;
use clap::error::ErrorKind;
use clap::Parser;

const BIN: &str = env!("CARGO_BIN_EXE_ed25519-certgen");

#[test]
fn defaults_apply_when_only_domains_are_given() {
    let cli = Cli::try_parse_from(["ed25519-certgen", "-d", "example.com"]).expect("parse");

    assert_eq!(cli.expiry_years, 10);
    assert_eq!(cli.output_dir, "./");
    assert_eq!(cli.backend, BackendKind::Native);
    assert_eq!(cli.openssl, "openssl");

    let request = cli.to_request().expect("request");
    assert_eq!(request.validity_days(), 3650);
}

#[test]
fn all_flags_are_honored() {
    let cli = Cli::try_parse_from([
        "ed25519-certgen",
        "-d",
        "example.com,www.example.com",
        "-e",
        "2",
        "-p",
        "/tmp/out",
        "-b",
        "openssl",
        "--openssl",
        "/usr/local/bin/openssl",
    ])
    .expect("parse");

    assert_eq!(cli.backend, BackendKind::Openssl);
    assert_eq!(cli.openssl, "/usr/local/bin/openssl");

    let request = cli.to_request().expect("request");
    assert_eq!(request.validity_days(), 730);
    assert_eq!(request.primary_domain(), "example.com");
    assert_eq!(request.domains().len(), 2);
    assert_eq!(request.output_dir().to_str(), Some("/tmp/out/"));
}

#[test]
fn missing_domains_is_a_usage_error() {
    let err = Cli::try_parse_from(["ed25519-certgen", "-e", "2"]).expect_err("missing -d");
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    assert_eq!(exit_code_for(err.kind()), USAGE_EXIT_CODE);
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let err = Cli::try_parse_from(["ed25519-certgen", "-d", "example.com", "-x"])
        .expect_err("unknown flag");
    assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    assert_eq!(exit_code_for(err.kind()), USAGE_EXIT_CODE);
}

#[test]
fn zero_years_is_rejected() {
    let err = Cli::try_parse_from(["ed25519-certgen", "-d", "example.com", "-e", "0"])
        .expect_err("zero years");
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn help_and_version_exit_successfully() {
    assert_eq!(exit_code_for(ErrorKind::DisplayHelp), 0);
    assert_eq!(exit_code_for(ErrorKind::DisplayVersion), 0);
}

#[test]
fn binary_without_domains_exits_1_and_creates_nothing() {
    let tmp = tempfile::tempdir().expect("temp dir");

    let output = Command::new(BIN)
        .args(["-e", "1", "-p"])
        .arg(tmp.path())
        .current_dir(tmp.path())
        .output()
        .expect("run binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
    assert_eq!(
        std::fs::read_dir(tmp.path()).expect("read temp dir").count(),
        0,
        "no files may be created"
    );
}

#[test]
fn binary_with_unknown_flag_exits_1() {
    let tmp = tempfile::tempdir().expect("temp dir");

    let output = Command::new(BIN)
        .args(["-d", "example.com", "--bogus"])
        .current_dir(tmp.path())
        .output()
        .expect("run binary");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        std::fs::read_dir(tmp.path()).expect("read temp dir").count(),
        0
    );
}

#[test]
fn binary_with_empty_domain_token_exits_1() {
    let tmp = tempfile::tempdir().expect("temp dir");

    let output = Command::new(BIN)
        .args(["-d", "example.com,,www.example.com"])
        .current_dir(tmp.path())
        .output()
        .expect("run binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("empty"), "stderr: {stderr}");
    assert_eq!(
        std::fs::read_dir(tmp.path()).expect("read temp dir").count(),
        0
    );
}

#[test]
fn binary_help_exits_0() {
    let output = Command::new(BIN).arg("--help").output().expect("run binary");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--domains"), "stdout: {stdout}");
}
