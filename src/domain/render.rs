//! Rendering configuration handed to the template engine

use std::path::PathBuf;

/// Template engine flavour selected with `-c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineClass {
    #[default]
    Eruby,
    /// Expressions are HTML-escaped.
    XmlEruby,
    FastEruby,
}

impl EngineClass {
    /// Look up a class by name. Only names ending in `Eruby` are valid.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Eruby" => Some(Self::Eruby),
            "XmlEruby" => Some(Self::XmlEruby),
            "FastEruby" => Some(Self::FastEruby),
            _ => None,
        }
    }

    pub fn escapes_html(&self) -> bool {
        matches!(self, Self::XmlEruby)
    }
}

/// Start and end markers of embedded code, e.g. `<% %>`.
///
/// Expressions use the start marker followed by `=`, comments the start
/// marker followed by `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub start: String,
    pub end: String,
}

impl Pattern {
    pub const DEFAULT: &'static str = "<% %>";

    /// Parse a pattern of exactly two whitespace-separated markers.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split_whitespace();
        let (start, end) = (parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }
        Some(Self {
            start: start.to_string(),
            end: end.to_string(),
        })
    }

    pub fn expression_start(&self) -> String {
        format!("{}=", self.start)
    }

    pub fn comment_start(&self) -> String {
        format!("{}#", self.start)
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self {
            start: "<%".to_string(),
            end: "%>".to_string(),
        }
    }
}

/// Character encoding selected with `-K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KanjiCode {
    Euc,
    Sjis,
    Utf8,
    None,
}

impl KanjiCode {
    /// Match on the first letter, case-insensitive (`u`, `utf8`, `UTF-8`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.chars().next()?.to_ascii_lowercase() {
            'e' => Some(Self::Euc),
            's' => Some(Self::Sjis),
            'u' => Some(Self::Utf8),
            'n' => Some(Self::None),
            _ => None,
        }
    }

    /// Files are always decoded as UTF-8; only these codes are accepted.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Utf8 | Self::None)
    }
}

/// What to print for each template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Evaluate,
    Source,
    /// Source without its last non-blank line.
    SourceTrimmed,
}

/// Everything the template engine needs besides the template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub class: EngineClass,
    pub pattern: Pattern,
    /// Strip whitespace around statement-only lines.
    pub trim: bool,
    /// Searched in order when a template includes or imports another one.
    pub include_paths: Vec<PathBuf>,
    /// Extra template files registered under their file names.
    pub libraries: Vec<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            class: EngineClass::default(),
            pattern: Pattern::default(),
            trim: true,
            include_paths: vec![],
            libraries: vec![],
        }
    }
}
