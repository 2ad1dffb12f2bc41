//! Domain layer: option parsing, value coercion and render settings
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod argv;
pub mod document;
pub mod error;
pub mod render;
pub mod value;

pub use argv::{parse_argv, ArgClass, Context, OptionTable, OptionValue, Options, ParsedArgv};
pub use document::{normalize_keys, untabify};
pub use error::{DomainError, DomainResult};
pub use render::{EngineClass, KanjiCode, OutputMode, Pattern, RenderOptions};
pub use value::{coerce, Value};
