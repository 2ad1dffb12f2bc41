//! I/O boundary traits for testability
//!
//! These traits abstract file access, data loading and the template engine,
//! allowing services to be tested with in-memory implementations.

use std::io::{self, Read};
use std::path::Path;

use crate::application::ApplicationResult;
use crate::domain::{Context, RenderOptions, Value};

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;

    /// Read all of standard input.
    fn read_stdin(&self) -> io::Result<String>;
}

/// Structured-data loader: turns document text into a generic value tree.
pub trait DataLoader: Send + Sync {
    /// Parse `text`; `origin` names the source in error messages.
    fn load(&self, text: &str, origin: &str) -> ApplicationResult<Value>;
}

/// A compiled template.
pub trait Renderer {
    /// Template source as the engine sees it.
    fn source_code(&self) -> String;

    /// Render with the given variables.
    fn evaluate(&self, context: &Context) -> ApplicationResult<String>;
}

/// Template engine abstraction.
pub trait TemplateEngine: Send + Sync {
    /// Compile the template stored at `path`.
    fn load_from_file(
        &self,
        path: &Path,
        options: &RenderOptions,
    ) -> ApplicationResult<Box<dyn Renderer>>;

    /// Compile a template given as text.
    fn new_from_string(
        &self,
        text: &str,
        options: &RenderOptions,
    ) -> ApplicationResult<Box<dyn Renderer>>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_stdin(&self) -> io::Result<String> {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        Ok(buf)
    }
}
