//! Context assembly service
//!
//! Loads YAML data files and layers the command-line context on top of them.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{normalize_keys, untabify, Context, Value};
use crate::infrastructure::traits::{DataLoader, FileSystem};

/// Data file name that means "read standard input".
pub const STDIN_ORIGIN: &str = "-";

/// How data file text is preprocessed before and after loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataOptions {
    /// Expand tabs before parsing (`-t`).
    pub untabify: bool,
    /// Normalize mapping keys after parsing (`-k`).
    pub normalize_keys: bool,
}

/// Service that builds the template context.
pub struct ContextService {
    fs: Arc<dyn FileSystem>,
    loader: Arc<dyn DataLoader>,
}

impl ContextService {
    /// Create a new context service.
    pub fn new(fs: Arc<dyn FileSystem>, loader: Arc<dyn DataLoader>) -> Self {
        Self { fs, loader }
    }

    /// Merge data files in order, then the command-line context.
    ///
    /// Later data files override earlier ones; command-line values override all.
    #[instrument(level = "debug", skip(self, cli_context))]
    pub fn build(
        &self,
        data_files: &[String],
        cli_context: Context,
        options: DataOptions,
    ) -> ApplicationResult<Context> {
        if data_files.is_empty() {
            return Ok(cli_context);
        }

        let mut context = Context::new();
        for origin in data_files {
            let document = self.load_document(origin, options)?;
            debug!("build: {} contributed {} keys", origin, document.len());
            context.extend(document);
        }
        context.extend(cli_context);
        Ok(context)
    }

    /// Load a single data file (or stdin for `-`) whose root must be a mapping.
    pub fn load_document(&self, origin: &str, options: DataOptions) -> ApplicationResult<Context> {
        let text = if origin == STDIN_ORIGIN {
            self.fs.read_stdin().with_context("read data from stdin")?
        } else {
            self.fs
                .read_to_string(Path::new(origin))
                .with_path_context("read data file", Path::new(origin))?
        };
        let text = if options.untabify { untabify(&text) } else { text };

        let mut document = self.loader.load(&text, origin)?;
        if options.normalize_keys {
            document = normalize_keys(document);
        }

        match document {
            Value::Mapping(map) => Ok(map),
            _ => Err(ApplicationError::NotAMapping {
                origin: origin.to_string(),
            }),
        }
    }
}
