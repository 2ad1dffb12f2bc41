//! End-to-end tests running the rserb binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary command isolated from any user configuration.
fn rserb(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rserb").expect("binary built");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("RSERB_CLASS")
        .env_remove("RSERB_PATTERN")
        .env_remove("RSERB_KANJI")
        .env_remove("RSERB_TRIM")
        .env_remove("RSERB_INCLUDE_PATHS");
    cmd
}

#[test]
fn given_stdin_template_when_running_then_renders_to_stdout() {
    let home = TempDir::new().unwrap();

    rserb(&home)
        .arg("--name=World")
        .write_stdin("Hello <%= name %>!\n")
        .assert()
        .success()
        .stdout("Hello World!\n");
}

#[test]
fn given_unknown_option_when_running_then_bare_message_and_exit_one() {
    let home = TempDir::new().unwrap();

    rserb(&home)
        .arg("-z")
        .assert()
        .code(1)
        .stdout("")
        .stderr("-z: unknown option.\n");
}

#[test]
fn given_invalid_context_value_when_running_then_exit_one() {
    let home = TempDir::new().unwrap();

    rserb(&home)
        .arg("--=x")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--=x: invalid context value."));
}

#[test]
fn given_help_when_running_then_prints_usage() {
    let home = TempDir::new().unwrap();

    rserb(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Usage: rserb"))
        .stdout(predicate::str::contains("--name=value"));
}

#[test]
fn given_missing_template_when_running_then_noinput_with_error_prefix() {
    let home = TempDir::new().unwrap();

    rserb(&home)
        .arg("/nonexistent/rserb/page.erb")
        .assert()
        .code(66)
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("/nonexistent/rserb/page.erb"));
}

#[test]
fn given_global_config_when_running_then_pattern_applies() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("rserb");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("rserb.toml"), "pattern = \"[% %]\"\n").unwrap();

    rserb(&home)
        .arg("--x=1")
        .write_stdin("[%= x %] <%= x %>")
        .assert()
        .success()
        .stdout("1 <%= x %>");
}

#[test]
fn given_broken_config_when_running_then_config_exit_code() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("rserb");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("rserb.toml"), "pattern = [\n").unwrap();

    rserb(&home).arg("-v").assert().code(78);
}

#[test]
fn given_yaml_on_stdin_when_dash_data_file_then_renders_template_file() {
    let home = TempDir::new().unwrap();
    let page = home.path().join("page.erb");
    std::fs::write(&page, "<% for u in users %><%= u %>;<% endfor %>").unwrap();

    rserb(&home)
        .args(["-f", "-"])
        .arg(&page)
        .write_stdin("users:\n  - ann\n  - bob\n")
        .assert()
        .success()
        .stdout("ann;bob;");
}
