//! YAML data loader

use std::collections::BTreeMap;

use serde_yaml::Value as YamlValue;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Value;
use crate::infrastructure::traits::DataLoader;

/// Loads YAML documents with `serde_yaml`.
#[derive(Debug, Default)]
pub struct YamlLoader;

impl DataLoader for YamlLoader {
    fn load(&self, text: &str, origin: &str) -> ApplicationResult<Value> {
        let doc: YamlValue =
            serde_yaml::from_str(text).map_err(|e| ApplicationError::DataFile {
                origin: origin.to_string(),
                source: Box::new(e),
            })?;
        Ok(from_yaml(doc))
    }
}

fn from_yaml(value: YamlValue) -> Value {
    match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Sequence(items.into_iter().map(from_yaml).collect()),
        YamlValue::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| (key_to_string(k), from_yaml(v)))
                .collect::<BTreeMap<_, _>>(),
        ),
        YamlValue::Tagged(tagged) => from_yaml(tagged.value),
    }
}

/// Template variables are looked up by name, so non-string keys are stringified.
fn key_to_string(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
