//! Command line behaviour

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const STOCKS: &str = "Date,Close\r\n2013-04-15,10.5\r\n2013-04-16,11.0\r\n";

fn fixture(content: &[u8]) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stocks.csv");
    fs::write(&path, content).unwrap();
    (dir, path)
}

fn csvtable() -> Command {
    Command::cargo_bin("csvtable").unwrap()
}

#[test]
fn test_show_json() {
    let (_dir, path) = fixture(STOCKS.as_bytes());
    csvtable()
        .args(["show", "--titled", "--format", "json"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"titles\""))
        .stdout(predicate::str::contains("\"2013-04-16\""));
}

#[test]
fn test_show_table() {
    let (_dir, path) = fixture(STOCKS.as_bytes());
    csvtable()
        .args(["show", "--titled", "--limit", "1"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2013-04-15"))
        .stdout(predicate::str::contains("... 1 more rows"));
}

#[test]
fn test_get_by_title_and_index() {
    let (_dir, path) = fixture(STOCKS.as_bytes());
    csvtable()
        .args(["get", "--titled", "--row", "1", "--column", "Close"])
        .arg(&path)
        .assert()
        .success()
        .stdout("11.0\n");

    csvtable()
        .args(["get", "--row", "0", "--column", "1"])
        .arg(&path)
        .assert()
        .success()
        .stdout("Close\n");
}

#[test]
fn test_get_out_of_bounds_fails() {
    let (_dir, path) = fixture(STOCKS.as_bytes());
    csvtable()
        .args(["get", "--titled", "--row", "2", "--column", "Close"])
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("out of the bounds"));
}

#[test]
fn test_lookup() {
    let (_dir, path) = fixture(STOCKS.as_bytes());
    csvtable()
        .args(["lookup", "--key", "Date", "--value", "2013-04-15", "--target", "Close"])
        .arg(&path)
        .assert()
        .success()
        .stdout("10.5\n");

    csvtable()
        .args(["lookup", "--key", "Date", "--value", "1999-01-01", "--target", "Close"])
        .arg(&path)
        .assert()
        .code(1);
}

#[test]
fn test_empty_input_exits_with_no_data() {
    let (_dir, path) = fixture(b"");
    csvtable()
        .arg("show")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No data"));
}

#[test]
fn test_convert_encoding_and_delimiter() {
    let (dir, path) = fixture(STOCKS.as_bytes());
    let output = dir.path().join("out.csv");
    csvtable()
        .args(["convert", "--titled", "--to-delimiter", "lf", "--to-encoding", "gbk"])
        .arg(&path)
        .arg(&output)
        .assert()
        .success();

    let written = fs::read(&output).unwrap();
    assert_eq!(written, b"Date,Close\n2013-04-15,10.5\n2013-04-16,11.0");
}

#[test]
fn test_unknown_encoding_fails() {
    let (_dir, path) = fixture(STOCKS.as_bytes());
    csvtable()
        .args(["show", "--encoding", "klingon"])
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown encoding: klingon"));
}

#[test]
fn test_lookup_prints_every_match() {
    let (_dir, path) = fixture(b"Date,Close\r\n2013-04-15,10.5\r\n2013-04-16,11.0\r\n2013-04-15,9.8");
    csvtable()
        .args(["lookup", "--key", "Date", "--value", "2013-04-15", "--target", "Close"])
        .arg(&path)
        .assert()
        .success()
        .stdout("10.5\n9.8\n");

    csvtable()
        .args(["lookup", "--key", "Day", "--value", "2013-04-15", "--target", "Close"])
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Day"));
}

#[test]
fn test_convert_to_utf16() {
    let (dir, path) = fixture(b"ab,c");
    let output = dir.path().join("out.csv");
    csvtable()
        .args(["convert", "--to-encoding", "utf-16le"])
        .arg(&path)
        .arg(&output)
        .assert()
        .success();

    let written = fs::read(&output).unwrap();
    assert_eq!(written, b"a\0b\0,\0c\0");
}
