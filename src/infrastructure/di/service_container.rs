//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{ContextService, RenderService};
use crate::config::Settings;
use crate::infrastructure::engine::MiniJinjaEngine;
use crate::infrastructure::traits::{DataLoader, FileSystem, RealFileSystem, TemplateEngine};
use crate::infrastructure::yaml::YamlLoader;

/// Container holding the settings and the I/O boundary implementations.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Template engine
    pub engine: Arc<dyn TemplateEngine>,

    /// Structured-data loader
    pub loader: Arc<dyn DataLoader>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let engine = Arc::new(MiniJinjaEngine::new(Arc::clone(&fs)));
        Self::with_deps(settings, fs, engine, Arc::new(YamlLoader))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        engine: Arc<dyn TemplateEngine>,
        loader: Arc<dyn DataLoader>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            engine,
            loader,
        }
    }

    pub fn context_service(&self) -> ContextService {
        ContextService::new(Arc::clone(&self.fs), Arc::clone(&self.loader))
    }

    pub fn render_service(&self) -> RenderService {
        RenderService::new(Arc::clone(&self.fs), Arc::clone(&self.engine))
    }
}
