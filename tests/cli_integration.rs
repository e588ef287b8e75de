//! Integration tests for the CredVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`. The
//! master password comes from `CREDVAULT_PASSWORD`, entry passwords and
//! confirmations are piped through stdin, and every run gets its own
//! config/data directories so the user's real vault is never touched.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const MASTER: &str = "correct-horse-battery";

/// Helper: get a Command pointing at the credvault binary, isolated in `home`.
fn credvault(home: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("credvault").expect("binary should exist");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env_remove("CREDVAULT_FILE")
        .env_remove("CREDVAULT_NEW_PASSWORD")
        .env_remove("CREDVAULT_LOG")
        .env("CREDVAULT_PASSWORD", MASTER);
    cmd
}

/// Helper: `credvault --vault-file <home>/test.vault <args>`.
fn with_vault(home: &TempDir, args: &[&str]) -> Command {
    let mut cmd = credvault(home);
    cmd.arg("--vault-file")
        .arg(home.path().join("test.vault"))
        .args(args);
    cmd
}

fn init(home: &TempDir) {
    with_vault(home, &["init"]).assert().success();
}

fn export(home: &TempDir) -> String {
    let out = home.child("export.txt");
    with_vault(home, &["show", "--output", out.path().to_str().unwrap()])
        .assert()
        .success();
    std::fs::read_to_string(out.path()).unwrap()
}

#[test]
fn help_flag_shows_usage() {
    let home = TempDir::new().unwrap();
    credvault(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("credential store"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("generate-password"))
        .stdout(predicate::str::contains("change-master-password"));
}

#[test]
fn no_args_shows_help() {
    let home = TempDir::new().unwrap();
    credvault(&home)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn generate_password_honours_length() {
    let home = TempDir::new().unwrap();
    credvault(&home)
        .args(["generate-password", "-l", "24", "-n", "-s"])
        .assert()
        .success()
        .stdout(predicate::function(|out: &str| out.trim_end().chars().count() == 24));
}

#[test]
fn generate_password_defaults_to_sixteen_letters() {
    let home = TempDir::new().unwrap();
    credvault(&home)
        .arg("generate-password")
        .assert()
        .success()
        .stdout(predicate::str::is_match("^[a-zA-Z]{16}\n$").unwrap());
}

#[test]
fn init_creates_vault_file() {
    let home = TempDir::new().unwrap();
    init(&home);
    home.child("test.vault").assert(predicate::path::is_file());
}

// dirs only follows XDG_* variables on Linux.
#[cfg(target_os = "linux")]
#[test]
fn init_uses_data_dir_by_default() {
    let home = TempDir::new().unwrap();
    credvault(&home).arg("init").assert().success();
    home.child("data/credvault/credentials.vault")
        .assert(predicate::path::is_file());
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let home = TempDir::new().unwrap();
    init(&home);

    with_vault(&home, &["init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    with_vault(&home, &["init", "--force"]).assert().success();
}

#[test]
fn init_rejects_short_master_password() {
    let home = TempDir::new().unwrap();
    with_vault(&home, &["init"])
        .env("CREDVAULT_PASSWORD", "short")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8"));
}

#[test]
fn add_then_export_lists_the_credential() {
    let home = TempDir::new().unwrap();
    init(&home);

    with_vault(&home, &["add", "-w", "a.io", "-u", "alice"])
        .write_stdin("pa55word\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'a.io'"));

    let table = export(&home);
    assert!(table.contains("website|username|mail|password|"));
    assert!(table.contains("a.io   |alice   |    |pa55word|"));
}

#[test]
fn add_requires_username_or_mail() {
    let home = TempDir::new().unwrap();
    init(&home);

    with_vault(&home, &["add", "-w", "a.io"])
        .write_stdin("pw\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--username"));
}

#[test]
fn add_existing_website_needs_replace() {
    let home = TempDir::new().unwrap();
    init(&home);
    with_vault(&home, &["add", "-w", "a.io", "-m", "a@a.io"])
        .write_stdin("first\n")
        .assert()
        .success();

    with_vault(&home, &["add", "-w", "a.io", "-m", "a@a.io"])
        .write_stdin("second\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--replace"));

    with_vault(&home, &["add", "-w", "a.io", "--replace"])
        .write_stdin("second\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Replaced"));

    let table = export(&home);
    assert!(table.contains("second"));
    assert!(table.contains("a@a.io"));
    assert!(!table.contains("first"));
}

#[test]
fn add_with_auto_gen_stores_accepted_password() {
    let home = TempDir::new().unwrap();
    init(&home);

    let assert = with_vault(&home, &["add", "-w", "gen.io", "-u", "me", "--auto-gen", "12"])
        .write_stdin("n\ny\n")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let offered: Vec<&str> = stdout
        .lines()
        .filter_map(|l| l.split_once("Generated password: ").map(|(_, pw)| pw))
        .collect();
    assert_eq!(offered.len(), 2);
    assert!(offered.iter().all(|pw| pw.chars().count() == 12));

    let table = export(&home);
    assert!(table.contains("gen.io"));
    assert!(table.contains(offered[1]));
}

#[test]
fn wrong_master_password_fails() {
    let home = TempDir::new().unwrap();
    init(&home);

    with_vault(&home, &["show", "--output", "/dev/null"])
        .env("CREDVAULT_PASSWORD", "not-the-password")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Decryption failed"));
}

#[test]
fn show_missing_vault_points_to_init() {
    let home = TempDir::new().unwrap();
    with_vault(&home, &["show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("credvault init"));
}

#[test]
fn show_ambiguous_regex_lists_conflicts() {
    let home = TempDir::new().unwrap();
    let seed = home.child("seed.txt");
    seed.write_str(
        "website   |username|mail|password|\n\
         ---------------------------------\n\
         github.com|me      |    |a       |\n\
         ---------------------------------\n\
         gitlab.com|me      |    |b       |\n\
         ---------------------------------\n",
    )
    .unwrap();
    with_vault(&home, &["init", "--import", seed.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 credentials"));

    with_vault(&home, &["show", "-w", "git", "-r", "--output", "/dev/null"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("github.com"))
        .stderr(predicate::str::contains("gitlab.com"));
}

#[test]
fn show_without_terminal_fails_cleanly() {
    let home = TempDir::new().unwrap();
    init(&home);

    with_vault(&home, &["show"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("terminal"));
}

#[test]
fn delete_website_and_missing_website() {
    let home = TempDir::new().unwrap();
    init(&home);
    with_vault(&home, &["add", "-w", "a.io", "-u", "u"])
        .write_stdin("pw\n")
        .assert()
        .success();

    with_vault(&home, &["delete", "-w", "a.io"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 credential"));

    with_vault(&home, &["delete", "-w", "a.io"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No website matched"));
}

#[test]
fn delete_all_asks_first() {
    let home = TempDir::new().unwrap();
    init(&home);
    with_vault(&home, &["add", "-w", "a.io", "-u", "u"])
        .write_stdin("pw\n")
        .assert()
        .success();

    with_vault(&home, &["delete", "--all"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));
    assert!(export(&home).contains("a.io"));

    with_vault(&home, &["delete", "--all"])
        .write_stdin("y\n")
        .assert()
        .success();
    assert!(!export(&home).contains("a.io"));
}

#[test]
fn change_master_password_reencrypts() {
    let home = TempDir::new().unwrap();
    init(&home);

    with_vault(&home, &["change-master-password"])
        .env("CREDVAULT_NEW_PASSWORD", "a-brand-new-secret")
        .assert()
        .success();

    with_vault(&home, &["show", "--output", "/dev/null"])
        .assert()
        .failure();

    with_vault(&home, &["show", "--output", "/dev/null"])
        .env("CREDVAULT_PASSWORD", "a-brand-new-secret")
        .assert()
        .success();
}

// dirs only follows XDG_* variables on Linux.
#[cfg(target_os = "linux")]
#[test]
fn invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    home.child("config/credvault/config.toml")
        .write_str("display_width = [")
        .unwrap();

    credvault(&home)
        .arg("generate-password")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file error"));
}

#[test]
fn completions_for_bash() {
    let home = TempDir::new().unwrap();
    credvault(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("credvault"));
}
