//! Tests for the encrypt command.

use crate::skip_without_tar;
use crate::support::*;

#[test]
fn test_first_encrypt_reports_credentials() {
    skip_without_tar!();
    let t = Test::with_files(BASIC_CONFIG, BASIC_FILES);

    let output = t.encrypt();
    assert_success(&output);
    assert_stdout_contains(&output, "Success!");
    assert_stdout_contains(&output, "secrets.tar.enc");

    let key = reported_value(&output, "CICI_DECRYPT_KEY").expect("key reported");
    let iv = reported_value(&output, "CICI_DECRYPT_IV").expect("iv reported");
    assert_eq!(key.len(), 44);
    assert_eq!(iv.len(), 24);
    assert!(t.exists("secrets.tar.enc"));
}

#[test]
fn test_reencrypt_with_reported_key_succeeds_quietly() {
    skip_without_tar!();
    let t = Test::with_files(BASIC_CONFIG, BASIC_FILES);

    let first = t.encrypt();
    assert_success(&first);
    let key = reported_value(&first, "CICI_DECRYPT_KEY").unwrap();
    let iv = reported_value(&first, "CICI_DECRYPT_IV").unwrap();

    let second = t.encrypt_with(&key, &iv);
    assert_success(&second);
    assert_stdout_contains(&second, "secrets.tar.enc updated");
    assert_stdout_excludes(&second, "CICI_DECRYPT_KEY");
}

#[test]
fn test_reencrypt_with_wrong_key_fails() {
    skip_without_tar!();
    let t = Test::with_files(BASIC_CONFIG, BASIC_FILES);
    let previous = cici::core::cipher::encrypt(b"previous archive contents", &known_key());
    t.write("secrets.tar", "previous archive contents");
    t.write("secrets.tar.enc", &previous);

    let wrong = wrong_key();
    let output = t.encrypt_with(&wrong.key_base64(), &wrong.iv_base64());
    assert_failure(&output);
    assert_stderr_contains(&output, "wrong key/iv pair");
    assert_eq!(t.read_bytes("secrets.tar.enc"), previous);
}

#[test]
fn test_encrypt_missing_secret_fails() {
    skip_without_tar!();
    let t = Test::with_files(BASIC_CONFIG, &[("sec/a.txt", "default secret")]);

    let output = t.encrypt();
    assert_failure(&output);
    assert_stderr_contains(&output, "sec/prod/b.txt");
    assert!(!t.exists("secrets.tar"));
}

#[test]
fn test_encrypt_updates_gitignore() {
    skip_without_tar!();
    let t = Test::with_files(BASIC_CONFIG, BASIC_FILES);
    t.write(".gitignore", "target/\n");

    let output = t.encrypt();
    assert_success(&output);

    let gitignore = t.read(".gitignore");
    assert!(gitignore.starts_with("secrets.tar\nsec\na.txt\nb.txt\n\n"));
    assert!(gitignore.ends_with("target/\n"));
    assert!(!gitignore.lines().any(|l| l == "secrets.tar.enc"));
}
