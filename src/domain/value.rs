//! Typed context values and string coercion
//!
//! Command-line context assignments (`--name=value`) arrive as raw strings.
//! [`coerce`] turns them into typed [`Value`]s with an ordered rule set;
//! the first matching rule wins.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A template variable value.
///
/// `Sequence` and `Mapping` only come from data files; [`coerce`] never
/// produces them.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Regex(Regex),
    String(String),
    Sequence(Vec<Value>),
    Mapping(BTreeMap<String, Value>),
}

impl Value {
    /// Coerce a present raw token. Shorthand for `coerce(Some(raw))`.
    pub fn coerce(raw: &str) -> Self {
        coerce(Some(raw))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            // regex::Regex has no equality; patterns are compared by source text
            (Value::Regex(a), Value::Regex(b)) => a.as_str() == b.as_str(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Mapping(a), Value::Mapping(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Regex(re) => write!(f, "/{}/", re.as_str()),
            Value::String(s) => write!(f, "{}", s),
            Value::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Mapping(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Regex(re) => serializer.serialize_str(re.as_str()),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

/// Convert a raw token into a typed value. Never fails.
///
/// Rules, first match wins:
/// 1. absent, `null`, `nil` → `Null`
/// 2. `true`, `yes` → `Bool(true)`
/// 3. `false`, `no` → `Bool(false)`
/// 4. all ASCII digits → `Integer` (`Float` if it overflows `i64`)
/// 5. `digits.digits` → `Float`
/// 6. `/pattern/` → `Regex` (plain string if the pattern does not compile)
/// 7. `'…'` or `"…"` → unescaped `String`
/// 8. anything else → the raw `String`
pub fn coerce(raw: Option<&str>) -> Value {
    let raw = match raw {
        None | Some("null") | Some("nil") => return Value::Null,
        Some(raw) => raw,
    };

    match raw {
        "true" | "yes" => return Value::Bool(true),
        "false" | "no" => return Value::Bool(false),
        _ => {}
    }

    if is_digits(raw) {
        return match raw.parse::<i64>() {
            Ok(i) => Value::Integer(i),
            Err(_) => raw
                .parse::<f64>()
                .map(Value::Float)
                .unwrap_or_else(|_| Value::String(raw.to_string())),
        };
    }

    if let Some((int, frac)) = raw.split_once('.') {
        if is_digits(int) && is_digits(frac) {
            if let Ok(x) = raw.parse::<f64>() {
                return Value::Float(x);
            }
        }
    }

    if let Some(pattern) = slash_delimited(raw) {
        if let Ok(re) = Regex::new(pattern) {
            return Value::Regex(re);
        }
        return Value::String(raw.to_string());
    }

    if let Some(literal) = unquote(raw) {
        return Value::String(literal);
    }

    Value::String(raw.to_string())
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn slash_delimited(raw: &str) -> Option<&str> {
    if raw.len() < 2 {
        return None;
    }
    raw.strip_prefix('/')?.strip_suffix('/')
}

/// Strip matching outer quotes and unescape the body.
///
/// Single quotes only honour `\\` and `\'`. Double quotes honour the usual
/// control escapes; an unknown escape keeps the escaped character. No
/// interpolation is performed.
fn unquote(raw: &str) -> Option<String> {
    if raw.len() < 2 {
        return None;
    }
    let quote = raw.chars().next()?;
    if quote != '\'' && quote != '"' {
        return None;
    }
    let body = raw.strip_prefix(quote)?.strip_suffix(quote)?;

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        if quote == '\'' {
            match next {
                '\\' | '\'' => out.push(next),
                other => {
                    out.push('\\');
                    out.push(other);
                }
            }
        } else {
            out.push(match next {
                'n' => '\n',
                't' => '\t',
                'r' => '\r',
                '0' => '\0',
                's' => ' ',
                'e' => '\u{1b}',
                'a' => '\u{07}',
                'b' => '\u{08}',
                'f' => '\u{0c}',
                'v' => '\u{0b}',
                other => other,
            });
        }
    }
    Some(out)
}
