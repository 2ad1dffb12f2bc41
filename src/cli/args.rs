//! Command-line options built on the short-option/context parser

use std::path::PathBuf;

use crate::domain::{parse_argv, Context, DomainResult, OptionTable, OutputMode, Value};
use crate::util::path::{expand_path_list, split_list};

/// Flags that never take a value.
pub const NO_ARG_OPTIONS: &str = "hvsxTtk";
/// Options that always take a value.
pub const REQUIRED_ARG_OPTIONS: &str = "pcrfKI";
/// Options whose value is optional.
pub const OPTIONAL_ARG_OPTIONS: &str = "";

pub const PROGRAM: &str = env!("CARGO_PKG_NAME");

pub fn option_table() -> OptionTable {
    OptionTable::new(NO_ARG_OPTIONS, REQUIRED_ARG_OPTIONS, OPTIONAL_ARG_OPTIONS)
}

/// One invocation's options, context and template files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cli {
    /// `-h` or a truthy `--help`
    pub help: bool,
    /// `-v`
    pub version: bool,
    /// `-s`
    pub source: bool,
    /// `-x`
    pub source_trimmed: bool,
    /// `-T`
    pub no_trim: bool,
    /// `-t`
    pub untabify: bool,
    /// `-k`
    pub normalize_keys: bool,
    /// `-p pattern`
    pub pattern: Option<String>,
    /// `-c class`
    pub class: Option<String>,
    /// `-r lib,...`
    pub libraries: Vec<PathBuf>,
    /// `-f file,...`
    pub data_files: Vec<String>,
    /// `-K kanji`
    pub kanji: Option<String>,
    /// `-I path,...`
    pub include_paths: Vec<PathBuf>,
    /// `--name=value` assignments
    pub context: Context,
    /// Template files; stdin is read when empty
    pub files: Vec<PathBuf>,
}

impl Cli {
    /// Parse process arguments (without the program name).
    pub fn parse_from<I, S>(argv: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parsed = parse_argv(argv, &option_table())?;
        let options = &parsed.options;

        let help_requested = matches!(
            parsed.context.get("help"),
            Some(value) if !matches!(value, Value::Null | Value::Bool(false))
        );

        Ok(Self {
            help: options.is_set('h') || help_requested,
            version: options.is_set('v'),
            source: options.is_set('s'),
            source_trimmed: options.is_set('x'),
            no_trim: options.is_set('T'),
            untabify: options.is_set('t'),
            normalize_keys: options.is_set('k'),
            pattern: options.arg('p').map(str::to_string),
            class: options.arg('c').map(str::to_string),
            libraries: options.arg('r').map(expand_path_list).unwrap_or_default(),
            data_files: options.arg('f').map(split_list).unwrap_or_default(),
            kanji: options.arg('K').map(str::to_string),
            include_paths: options.arg('I').map(expand_path_list).unwrap_or_default(),
            context: parsed.context,
            files: parsed.positionals.into_iter().map(PathBuf::from).collect(),
        })
    }

    /// `-x` takes precedence over `-s`.
    pub fn output_mode(&self) -> OutputMode {
        if self.source_trimmed {
            OutputMode::SourceTrimmed
        } else if self.source {
            OutputMode::Source
        } else {
            OutputMode::Evaluate
        }
    }
}

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub fn usage() -> String {
    format!(
        "\
Usage: {PROGRAM} [..options..] [file ...]
  -h, --help    : help
  -v            : version
  -s            : script source
  -x            : script source (removed the last line)
  -T            : no trimming
  -p pattern    : embedded pattern (default '<% %>')
  -c class      : class name (Eruby, XmlEruby, FastEruby) (default Eruby)
  -r library    : library templates, importable by file name
  -I path       : template include path
  -K kanji      : kanji code (utf8, none) (default none)
  -f file.yaml  : YAML file for context values (read stdin if filename is '-')
  -t            : expand tab character in YAML file
  -k            : convert '-' to '_' in YAML mapping keys
  --name=value  : context name and value
"
    )
}
