//! Tests for the decrypt command.

use predicates::prelude::*;

use crate::skip_without_tar;
use crate::support::*;

/// Encrypt through the CLI and return the reported key and IV.
fn encrypt_fresh(t: &Test) -> (String, String) {
    let output = t.encrypt();
    assert_success(&output);
    (
        reported_value(&output, "CICI_DECRYPT_KEY").unwrap(),
        reported_value(&output, "CICI_DECRYPT_IV").unwrap(),
    )
}

#[test]
fn test_decrypt_default_set() {
    skip_without_tar!();
    let t = Test::with_files(BASIC_CONFIG, BASIC_FILES);
    let (key, iv) = encrypt_fresh(&t);
    t.remove("sec");
    t.remove("secrets.tar");

    let output = t.decrypt(None, &key, &iv);
    assert_success(&output);
    assert_stdout_contains(&output, "successfully decrypted");
    assert_eq!(t.read("a.txt"), "default secret");
    assert!(!t.exists("b.txt"));
}

#[test]
fn test_decrypt_named_set() {
    skip_without_tar!();
    let t = Test::with_files(BASIC_CONFIG, BASIC_FILES);
    let (key, iv) = encrypt_fresh(&t);
    t.remove("sec");

    let output = t.decrypt(Some("prod"), &key, &iv);
    assert_success(&output);
    assert_eq!(t.read("b.txt"), "production secret");
}

#[test]
fn test_decrypt_wrong_key() {
    skip_without_tar!();
    let t = Test::with_files(BASIC_CONFIG, &[]);
    t.write(
        "secrets.tar.enc",
        cici::core::cipher::encrypt(b"previous archive contents", &known_key()),
    );

    let wrong = wrong_key();
    let output = t.decrypt(None, &wrong.key_base64(), &wrong.iv_base64());
    assert_failure(&output);
    assert_stderr_contains(&output, "wrong key/iv pair");
}

#[test]
fn test_decrypt_missing_env() {
    let t = Test::with_files(BASIC_CONFIG, &[]);
    t.write(
        "secrets.tar.enc",
        cici::core::cipher::encrypt(b"previous archive contents", &known_key()),
    );

    t.cmd()
        .arg("decrypt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CICI_DECRYPT_KEY"));
}

#[test]
fn test_decrypt_missing_archive() {
    let t = Test::with_files(BASIC_CONFIG, &[]);
    let key = known_key();

    let output = t.decrypt(None, &key.key_base64(), &key.iv_base64());
    assert_failure(&output);
    assert_stderr_contains(&output, "secrets.tar.enc");
}

#[test]
fn test_decrypt_unknown_set() {
    let t = Test::with_files(BASIC_CONFIG, &[]);
    let key = known_key();

    t.cmd()
        .args(["decrypt", "--set", "nope"])
        .env("CICI_DECRYPT_KEY", key.key_base64())
        .env("CICI_DECRYPT_IV", key.iv_base64())
        .assert()
        .failure()
        .stderr(predicate::str::contains("set 'nope' does not exist"));
}

#[test]
fn test_decrypt_malformed_key() {
    let t = Test::with_files(BASIC_CONFIG, &[]);
    t.write(
        "secrets.tar.enc",
        cici::core::cipher::encrypt(b"previous archive contents", &known_key()),
    );

    t.cmd()
        .arg("decrypt")
        .env("CICI_DECRYPT_KEY", "%%%")
        .env("CICI_DECRYPT_IV", "%%%")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid base64"));
}
