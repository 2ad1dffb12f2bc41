//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, DataLoader, TemplateEngine)
//! but are themselves concrete structs, not traits.

mod context;
mod render;

pub use context::{ContextService, DataOptions, STDIN_ORIGIN};
pub use render::{strip_last_line, RenderService};
