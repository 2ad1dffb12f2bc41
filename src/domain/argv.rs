//! Short-option clusters and `--name=value` context assignments
//!
//! Tokens are consumed from the front while they start with `-`:
//! - `--name[=value]` stores a coerced value into the [`Context`]
//! - `-abc` is a cluster of single-character options looked up in an [`OptionTable`]
//!
//! The first token not starting with `-`, and everything after it, is returned
//! untouched as positional arguments.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::value::Value;

/// Template variables keyed by normalized name.
pub type Context = BTreeMap<String, Value>;

/// How a single-character option consumes its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgClass {
    /// Plain flag, never takes a value.
    NoArg,
    /// Takes the rest of the cluster, or else the next token.
    Required,
    /// Takes the rest of the cluster if there is any, else acts as a flag.
    Optional,
}

/// Registered short options and their argument classes.
#[derive(Debug, Clone, Default)]
pub struct OptionTable {
    classes: HashMap<char, ArgClass>,
}

impl OptionTable {
    /// Build a table from three class strings, e.g. `("hv", "f", "")`.
    ///
    /// A character listed in several strings keeps the first class in the
    /// order no-arg, required, optional.
    pub fn new(no_arg: &str, required: &str, optional: &str) -> Self {
        let mut classes = HashMap::new();
        for (chars, class) in [
            (no_arg, ArgClass::NoArg),
            (required, ArgClass::Required),
            (optional, ArgClass::Optional),
        ] {
            for c in chars.chars() {
                classes.entry(c).or_insert(class);
            }
        }
        Self { classes }
    }

    pub fn class_of(&self, c: char) -> Option<ArgClass> {
        self.classes.get(&c).copied()
    }
}

/// Value recorded for a short option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Flag,
    Arg(String),
}

/// Parsed short options. Repeating an option overwrites the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    values: BTreeMap<char, OptionValue>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, c: char, value: OptionValue) {
        self.values.insert(c, value);
    }

    pub fn get(&self, c: char) -> Option<&OptionValue> {
        self.values.get(&c)
    }

    /// True if the option was given at all, with or without a value.
    pub fn is_set(&self, c: char) -> bool {
        self.values.contains_key(&c)
    }

    /// The option's argument, if it was given one.
    pub fn arg(&self, c: char) -> Option<&str> {
        match self.values.get(&c) {
            Some(OptionValue::Arg(s)) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Everything produced by one [`parse_argv`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgv {
    pub options: Options,
    pub context: Context,
    /// Tokens left after the first one not starting with `-`.
    pub positionals: Vec<String>,
}

fn context_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\A-([-A-Za-z0-9_]+)(?:=(.*))?\z").unwrap())
}

/// Parse leading option tokens.
///
/// Fails fast on the first malformed token; nothing is skipped or recovered.
#[instrument(level = "debug", skip_all)]
pub fn parse_argv<I, S>(argv: I, table: &OptionTable) -> DomainResult<ParsedArgv>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut tokens: VecDeque<String> = argv.into_iter().map(Into::into).collect();
    let mut options = Options::new();
    let mut context = Context::new();

    while tokens.front().is_some_and(|t| t.starts_with('-')) {
        let Some(token) = tokens.pop_front() else {
            break;
        };
        let optstr = &token[1..];

        if optstr.starts_with('-') {
            let (name, value) = parse_context_assignment(&token, optstr)?;
            debug!("context: {} = {:?}", name, value);
            context.insert(name, value);
        } else {
            parse_cluster(optstr, table, &mut tokens, &mut options)?;
        }
    }

    Ok(ParsedArgv {
        options,
        context,
        positionals: tokens.into_iter().collect(),
    })
}

fn parse_context_assignment(token: &str, optstr: &str) -> DomainResult<(String, Value)> {
    let caps = context_regex()
        .captures(optstr)
        .ok_or_else(|| DomainError::InvalidContextValue(token.to_string()))?;
    let name = caps[1].replace('-', "_");
    let value = match caps.get(2) {
        Some(raw) => Value::coerce(raw.as_str()),
        None => Value::Bool(true),
    };
    Ok((name, value))
}

fn parse_cluster(
    cluster: &str,
    table: &OptionTable,
    tokens: &mut VecDeque<String>,
    options: &mut Options,
) -> DomainResult<()> {
    let mut rest = cluster;
    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];
        match table.class_of(c) {
            Some(ArgClass::NoArg) => {
                options.insert(c, OptionValue::Flag);
            }
            Some(ArgClass::Required) => {
                let arg = if rest.is_empty() {
                    tokens.pop_front().ok_or(DomainError::MissingArgument(c))?
                } else {
                    rest.to_string()
                };
                debug!("option: -{} {:?}", c, arg);
                options.insert(c, OptionValue::Arg(arg));
                return Ok(());
            }
            Some(ArgClass::Optional) => {
                let value = if rest.is_empty() {
                    OptionValue::Flag
                } else {
                    OptionValue::Arg(rest.to_string())
                };
                options.insert(c, value);
                return Ok(());
            }
            None => return Err(DomainError::UnknownOption(c)),
        }
    }
    Ok(())
}
