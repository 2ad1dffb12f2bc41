//! Tests for the command driver

use std::io;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use rserb::cli::{run, CliError};
use rserb::config::Settings;
use rserb::exitcode;
use rserb::infrastructure::di::ServiceContainer;
use rserb::infrastructure::engine::MiniJinjaEngine;
use rserb::infrastructure::traits::{FileSystem, RealFileSystem};
use rserb::infrastructure::yaml::YamlLoader;
use rserb::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

/// Real filesystem with a fixed stdin.
struct FixedStdin {
    stdin: String,
}

impl FileSystem for FixedStdin {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        RealFileSystem.read_to_string(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        RealFileSystem.is_file(path)
    }

    fn read_stdin(&self) -> io::Result<String> {
        Ok(self.stdin.clone())
    }
}

fn container_with_stdin(settings: Settings, stdin: &str) -> ServiceContainer {
    let fs: Arc<dyn FileSystem> = Arc::new(FixedStdin {
        stdin: stdin.to_string(),
    });
    let engine = Arc::new(MiniJinjaEngine::new(Arc::clone(&fs)));
    ServiceContainer::with_deps(settings, fs, engine, Arc::new(YamlLoader))
}

fn run_to_string(argv: &[&str], container: &ServiceContainer) -> Result<String, CliError> {
    let mut out = Vec::new();
    run(argv.iter().copied(), container, &mut out)?;
    Ok(String::from_utf8(out).expect("utf8 output"))
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write file");
    path.to_string_lossy().into_owned()
}

#[test]
fn given_context_assignment_when_rendering_stdin_then_substitutes() {
    let container = container_with_stdin(Settings::default(), "Hello <%= name %>!\n");

    let out = run_to_string(&["--name=World"], &container).unwrap();

    assert_eq!(out, "Hello World!\n");
}

#[test]
fn given_typed_context_values_when_rendering_then_types_survive() {
    let template = "<% if debug %>n=<%= n + 1 %> f=<%= f %><% endif %>";
    let container = container_with_stdin(Settings::default(), template);

    let out = run_to_string(&["--debug", "--n=41", "--f=0.5"], &container).unwrap();

    assert_eq!(out, "n=42 f=0.5");
}

#[test]
fn given_data_file_and_assignment_when_rendering_then_assignment_wins() {
    let temp = TempDir::new().unwrap();
    let data = write_file(&temp, "data.yaml", "name: file\ncount: 3\n");
    let page = write_file(&temp, "page.erb", "<%= name %> <%= count %>\n");
    let container = ServiceContainer::new(Settings::default());

    let out = run_to_string(&["-f", &data, "--name=cli", &page], &container).unwrap();

    assert_eq!(out, "cli 3\n");
}

#[test]
fn given_several_files_when_rendering_then_outputs_concatenate_in_order() {
    let temp = TempDir::new().unwrap();
    let first = write_file(&temp, "a.erb", "A<%= x %>\n");
    let second = write_file(&temp, "b.erb", "B<%= x %>\n");
    let container = ServiceContainer::new(Settings::default());

    let out = run_to_string(&["--x=1", &first, &second], &container).unwrap();

    assert_eq!(out, "A1\nB1\n");
}

#[test]
fn given_help_and_version_when_running_then_prints_both_and_renders_nothing() {
    let container = container_with_stdin(Settings::default(), "<%= never %>");

    let out = run_to_string(&["-vh"], &container).unwrap();

    let mut lines = out.lines();
    assert_eq!(lines.next(), Some(env!("CARGO_PKG_VERSION")));
    assert!(lines.next().unwrap_or_default().starts_with("Usage: rserb"));
}

#[test]
fn given_help_context_value_when_running_then_prints_usage() {
    let container = container_with_stdin(Settings::default(), "");

    let out = run_to_string(&["--help"], &container).unwrap();

    assert!(out.starts_with("Usage: rserb"));
}

#[test]
fn given_source_trimmed_flag_when_running_then_prints_source_without_last_line() {
    let container = container_with_stdin(Settings::default(), "a\n<%= b %>\nlast\n");

    let out = run_to_string(&["-sx"], &container).unwrap();

    assert_eq!(out, "a\n<%= b %>\n");
}

#[test]
fn given_invalid_class_when_running_then_command_option_error() {
    let container = container_with_stdin(Settings::default(), "");

    let err = run_to_string(&["-c", "Bogus"], &container).unwrap_err();

    assert!(err.is_command_option());
    assert_eq!(err.exit_code(), exitcode::FAILURE);
    assert_eq!(err.to_string(), "-c Bogus: invalid class name.");
}

#[test]
fn given_missing_option_argument_when_running_then_argument_required() {
    let container = container_with_stdin(Settings::default(), "");

    let err = run_to_string(&["-p"], &container).unwrap_err();

    assert_eq!(err.to_string(), "-p: argument required.");
    assert_eq!(err.exit_code(), exitcode::FAILURE);
}

#[test]
fn given_settings_class_when_running_then_used_as_default() {
    let settings = Settings {
        class: "XmlEruby".to_string(),
        ..Settings::default()
    };
    let container = container_with_stdin(settings, "<%= v %>");

    let escaped = run_to_string(&["--v=<i>"], &container).unwrap();
    let plain = run_to_string(&["-cEruby", "--v=<i>"], &container).unwrap();

    assert_eq!(escaped, "&lt;i&gt;");
    assert_eq!(plain, "<i>");
}

#[test]
fn given_undefined_filter_when_rendering_then_dataerr() {
    let container = container_with_stdin(Settings::default(), "<%= x | nosuchfilter %>");

    let err = run_to_string(&[], &container).unwrap_err();

    assert!(!err.is_command_option());
    assert_eq!(err.exit_code(), exitcode::DATAERR);
}
