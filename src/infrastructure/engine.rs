//! Template engine backed by minijinja
//!
//! The embedded pattern (e.g. `<% %>`) becomes minijinja's custom syntax:
//! `<% … %>` for statements, `<%= … %>` for expressions and `<%# … %>` for
//! comments.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use minijinja::syntax::SyntaxConfig;
use minijinja::{AutoEscape, Environment, ErrorKind};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Context, RenderOptions};
use crate::infrastructure::traits::{FileSystem, Renderer, TemplateEngine};

/// Name under which stdin templates are registered.
const STDIN_TEMPLATE: &str = "<stdin>";

/// minijinja-based [`TemplateEngine`].
pub struct MiniJinjaEngine {
    fs: Arc<dyn FileSystem>,
}

impl MiniJinjaEngine {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Configure an environment for one template.
    fn environment(&self, options: &RenderOptions) -> ApplicationResult<Environment<'static>> {
        let mut env = Environment::new();

        let pattern = &options.pattern;
        let syntax = SyntaxConfig::builder()
            .block_delimiters(pattern.start.clone(), pattern.end.clone())
            .variable_delimiters(pattern.expression_start(), pattern.end.clone())
            .comment_delimiters(pattern.comment_start(), pattern.end.clone())
            .build()
            .map_err(|e| template_error(format!("pattern '{} {}'", pattern.start, pattern.end), e))?;
        env.set_syntax(syntax);

        env.set_trim_blocks(options.trim);
        env.set_lstrip_blocks(options.trim);
        env.set_keep_trailing_newline(true);

        let escape = if options.class.escapes_html() {
            AutoEscape::Html
        } else {
            AutoEscape::None
        };
        env.set_auto_escape_callback(move |_| escape.clone());

        if !options.include_paths.is_empty() {
            let fs = Arc::clone(&self.fs);
            let include_paths = options.include_paths.clone();
            env.set_loader(move |name| load_from_paths(fs.as_ref(), &include_paths, name));
        }

        for library in &options.libraries {
            let name = library_name(library);
            let source = self
                .fs
                .read_to_string(library)
                .with_path_context("read library", library)?;
            debug!("environment: registering library {}", name);
            env.add_template_owned(name.clone(), source)
                .map_err(|e| template_error(format!("library {}", name), e))?;
        }

        Ok(env)
    }

    fn compile(
        &self,
        name: String,
        source: String,
        options: &RenderOptions,
    ) -> ApplicationResult<Box<dyn Renderer>> {
        let mut env = self.environment(options)?;
        env.add_template_owned(name.clone(), source.clone())
            .map_err(|e| template_error(name.clone(), e))?;
        Ok(Box::new(MiniJinjaRenderer { env, name, source }))
    }
}

impl TemplateEngine for MiniJinjaEngine {
    #[instrument(level = "debug", skip(self, options))]
    fn load_from_file(
        &self,
        path: &Path,
        options: &RenderOptions,
    ) -> ApplicationResult<Box<dyn Renderer>> {
        let source = self
            .fs
            .read_to_string(path)
            .with_path_context("read template", path)?;
        self.compile(path.display().to_string(), source, options)
    }

    fn new_from_string(
        &self,
        text: &str,
        options: &RenderOptions,
    ) -> ApplicationResult<Box<dyn Renderer>> {
        self.compile(STDIN_TEMPLATE.to_string(), text.to_string(), options)
    }
}

struct MiniJinjaRenderer {
    env: Environment<'static>,
    name: String,
    source: String,
}

impl Renderer for MiniJinjaRenderer {
    fn source_code(&self) -> String {
        self.source.clone()
    }

    fn evaluate(&self, context: &Context) -> ApplicationResult<String> {
        let template = self
            .env
            .get_template(&self.name)
            .map_err(|e| template_error(self.name.clone(), e))?;
        template
            .render(context)
            .map_err(|e| template_error(self.name.clone(), e))
    }
}

fn library_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn load_from_paths(
    fs: &dyn FileSystem,
    include_paths: &[PathBuf],
    name: &str,
) -> Result<Option<String>, minijinja::Error> {
    for dir in include_paths {
        let candidate = dir.join(name);
        if fs.is_file(&candidate) {
            return fs.read_to_string(&candidate).map(Some).map_err(|e| {
                minijinja::Error::new(
                    ErrorKind::InvalidOperation,
                    format!("could not read {}", candidate.display()),
                )
                .with_source(e)
            });
        }
    }
    Ok(None)
}

fn template_error(context: impl Into<String>, e: minijinja::Error) -> ApplicationError {
    ApplicationError::Template {
        context: context.into(),
        source: Box::new(e),
    }
}
