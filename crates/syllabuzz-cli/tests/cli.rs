use assert_cmd::Command;
use predicates::str::{contains, starts_with};

fn syllabuzz(data_dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("syllabuzz"));
    cmd.env("SYLLABUZZ_DIR", data_dir)
        .env_remove("SYLLABUZZ_CONFIG")
        .env_remove("SYLLABUZZ_API_URL");
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("syllabuzz"));
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("Syllabuzz"))
        .stdout(contains("bookmark"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("syllabuzz"));
    cmd.arg("--version").assert().success();
}

#[test]
fn test_cli_completions() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("syllabuzz"));
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(starts_with("_syllabuzz"));
}

#[test]
fn test_status_rejects_unknown_kind() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("syllabuzz"));
    cmd.args(["status", "follow", "a1"])
        .assert()
        .failure()
        .stderr(contains("expected bookmark, star or like"));
}

#[test]
fn test_protected_command_without_session() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = temp_dir.path().join("syllabuzz.toml");
    std::fs::write(
        &config,
        format!(
            "[api]\nurl = \"http://127.0.0.1:9/api\"\n\n[storage]\ndir = \"{}\"\n",
            temp_dir.path().display()
        ),
    )
    .unwrap();

    syllabuzz(temp_dir.path())
        .env("SYLLABUZZ_CONFIG", &config)
        .arg("bookmarks")
        .assert()
        .failure()
        .stderr(contains("Authentication required"))
        .stderr(contains("syllabuzz login"));
}

#[test]
fn test_blank_search_fails_locally() {
    let temp_dir = tempfile::tempdir().unwrap();
    syllabuzz(temp_dir.path())
        .args(["--api-url", "http://127.0.0.1:9/api", "search", "   "])
        .assert()
        .failure()
        .stderr(contains("Search query must not be empty"));
}
