//! Data-document helpers: tab expansion and key normalization

use std::collections::BTreeMap;

use crate::domain::value::Value;

const TAB_WIDTH: usize = 8;

/// Expand tab characters to spaces using 8-column tab stops.
///
/// Columns restart at every line; line endings are kept as they are.
pub fn untabify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let pad = TAB_WIDTH - column % TAB_WIDTH;
                out.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            '\n' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

/// Normalize mapping keys the same way context names are: `-` becomes `_`.
///
/// Applies recursively through nested mappings and sequences. When two keys
/// collapse onto the same name, the one sorting last wins.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(key, val)| (key.replace('-', "_"), normalize_keys(val)))
                .collect::<BTreeMap<_, _>>(),
        ),
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}
