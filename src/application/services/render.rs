//! Template rendering service
//!
//! Builds renderers through the template engine and turns them into output
//! according to the selected [`OutputMode`].

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{Context, OutputMode, RenderOptions};
use crate::infrastructure::traits::{FileSystem, Renderer, TemplateEngine};

/// Service that renders templates from files or standard input.
pub struct RenderService {
    fs: Arc<dyn FileSystem>,
    engine: Arc<dyn TemplateEngine>,
}

impl RenderService {
    /// Create a new render service.
    pub fn new(fs: Arc<dyn FileSystem>, engine: Arc<dyn TemplateEngine>) -> Self {
        Self { fs, engine }
    }

    /// Render one template file.
    #[instrument(level = "debug", skip(self, options, context))]
    pub fn render_file(
        &self,
        path: &Path,
        options: &RenderOptions,
        context: &Context,
        mode: OutputMode,
    ) -> ApplicationResult<String> {
        let renderer = self.engine.load_from_file(path, options)?;
        Self::produce(renderer.as_ref(), context, mode)
    }

    /// Render a template read from standard input.
    #[instrument(level = "debug", skip(self, options, context))]
    pub fn render_stdin(
        &self,
        options: &RenderOptions,
        context: &Context,
        mode: OutputMode,
    ) -> ApplicationResult<String> {
        let input = self.fs.read_stdin().with_context("read template from stdin")?;
        self.render_string(&input, options, context, mode)
    }

    /// Render a template given as text.
    pub fn render_string(
        &self,
        text: &str,
        options: &RenderOptions,
        context: &Context,
        mode: OutputMode,
    ) -> ApplicationResult<String> {
        let renderer = self.engine.new_from_string(text, options)?;
        Self::produce(renderer.as_ref(), context, mode)
    }

    fn produce(
        renderer: &dyn Renderer,
        context: &Context,
        mode: OutputMode,
    ) -> ApplicationResult<String> {
        debug!("produce: mode={:?}", mode);
        match mode {
            OutputMode::Evaluate => renderer.evaluate(context),
            OutputMode::Source => Ok(renderer.source_code()),
            OutputMode::SourceTrimmed => Ok(strip_last_line(&renderer.source_code())),
        }
    }
}

/// Drop the last line holding non-whitespace text, along with any trailing
/// whitespace after it.
pub fn strip_last_line(source: &str) -> String {
    let trimmed = source.trim_end();
    match trimmed.rfind('\n') {
        Some(idx) => trimmed[..=idx].to_string(),
        None => String::new(),
    }
}
