//! Tests for ContextService

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use rserb::application::services::{ContextService, DataOptions};
use rserb::application::ApplicationError;
use rserb::domain::{Context, Value};
use rserb::infrastructure::traits::{FileSystem, RealFileSystem};
use rserb::infrastructure::yaml::YamlLoader;
use rserb::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

/// Helper to create temp data files for testing
fn create_data_file(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write data file");
    path.to_string_lossy().into_owned()
}

fn service() -> ContextService {
    ContextService::new(Arc::new(RealFileSystem), Arc::new(YamlLoader))
}

/// Filesystem double whose stdin is a fixed string.
struct StdinFileSystem {
    stdin: String,
}

impl FileSystem for StdinFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} not in test double", path.display()),
        ))
    }

    fn is_file(&self, _path: &Path) -> bool {
        false
    }

    fn read_stdin(&self) -> io::Result<String> {
        Ok(self.stdin.clone())
    }
}

#[test]
fn given_no_data_files_when_building_then_returns_cli_context() {
    let mut cli = Context::new();
    cli.insert("name".to_string(), Value::from("World"));

    let result = service()
        .build(&[], cli.clone(), DataOptions::default())
        .unwrap();

    assert_eq!(result, cli);
}

#[test]
fn given_two_data_files_when_building_then_later_file_and_cli_win() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let base = create_data_file(&temp, "base.yaml", "title: base\ncolor: red\nsize: 1\n");
    let local = create_data_file(&temp, "local.yaml", "color: blue\nsize: 2\n");
    let mut cli = Context::new();
    cli.insert("size".to_string(), Value::Integer(3));

    // Act
    let result = service()
        .build(&[base, local], cli, DataOptions::default())
        .unwrap();

    // Assert
    assert_eq!(result.get("title"), Some(&Value::from("base")));
    assert_eq!(result.get("color"), Some(&Value::from("blue")));
    assert_eq!(result.get("size"), Some(&Value::Integer(3)));
}

#[test]
fn given_sequence_document_when_building_then_not_a_mapping() {
    let temp = TempDir::new().unwrap();
    let list = create_data_file(&temp, "list.yaml", "- a\n- b\n");

    let err = service()
        .build(&[list.clone()], Context::new(), DataOptions::default())
        .unwrap_err();

    assert!(matches!(err, ApplicationError::NotAMapping { .. }));
    assert_eq!(err.to_string(), format!("{list}: root object is not a mapping."));
}

#[test]
fn given_missing_data_file_when_building_then_operation_failed_names_path() {
    let missing = PathBuf::from("/nonexistent/rserb/data.yaml");

    let err = service()
        .build(
            &[missing.to_string_lossy().into_owned()],
            Context::new(),
            DataOptions::default(),
        )
        .unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("/nonexistent/rserb/data.yaml"));
}

#[test]
fn given_tab_indented_yaml_when_untabify_then_parses() {
    let temp = TempDir::new().unwrap();
    let data = create_data_file(&temp, "tabs.yaml", "server:\n\thost: example.org\n");

    let plain = service().build(&[data.clone()], Context::new(), DataOptions::default());
    assert!(plain.is_err(), "tabs are not valid YAML indentation");

    let result = service()
        .build(
            &[data],
            Context::new(),
            DataOptions {
                untabify: true,
                ..DataOptions::default()
            },
        )
        .unwrap();

    let Some(Value::Mapping(server)) = result.get("server") else {
        panic!("server should be a mapping: {result:?}");
    };
    assert_eq!(server.get("host"), Some(&Value::from("example.org")));
}

#[test]
fn given_hyphenated_keys_when_normalizing_then_underscored() {
    let temp = TempDir::new().unwrap();
    let data = create_data_file(&temp, "keys.yaml", "user-name: alice\nlinks:\n  home-page: x\n");

    let result = service()
        .build(
            &[data],
            Context::new(),
            DataOptions {
                normalize_keys: true,
                ..DataOptions::default()
            },
        )
        .unwrap();

    assert_eq!(result.get("user_name"), Some(&Value::from("alice")));
    let Some(Value::Mapping(links)) = result.get("links") else {
        panic!("links should be a mapping: {result:?}");
    };
    assert!(links.contains_key("home_page"));
}

#[test]
fn given_dash_origin_when_building_then_reads_stdin() {
    let fs = Arc::new(StdinFileSystem {
        stdin: "from: stdin\n".to_string(),
    });
    let service = ContextService::new(fs, Arc::new(YamlLoader));

    let result = service
        .build(&["-".to_string()], Context::new(), DataOptions::default())
        .unwrap();

    assert_eq!(result.get("from"), Some(&Value::from("stdin")));
}
