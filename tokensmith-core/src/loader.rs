//! Token source loading
//!
//! Sources are nested groups of token objects, the shape Style Dictionary reads:
//!
//! ```text
//! {
//!   "color": {
//!     "$type": "color",
//!     "brand": { "500": { "value": "#9e77ed" } },
//!     "white": { "value": "#ffffff", "type": "color" }
//!   }
//! }
//! ```
//!
//! Flattening walks each file depth-first in document order and emits one [`TokenRecord`]
//! per leaf, so the order of the resulting sequence is the order tokens appear in the
//! sources. An object with a `value` (or `$value`) key is a leaf. Its type is the leaf's own
//! `type`/`$type`, falling back to the closest ancestor group's `$type`. Keys starting with
//! `$` are metadata and never become path segments.
//!
//! A bare scalar sitting where a token object should be still becomes a record, with no
//! type, so validation reports it instead of it vanishing from the outputs.
//!
//! Files are matched by glob patterns relative to a root directory. Patterns are expanded
//! in the order given; matches of one pattern are sorted, and a file matched twice is read
//! once.

use crate::error::LoadError;
use crate::token::TokenRecord;
use indexmap::IndexSet;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct TokenLoader {
    root: PathBuf,
    patterns: Vec<String>,
}

impl TokenLoader {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: PathBuf::from("."),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolve patterns against `root` instead of the working directory.
    pub fn with_root(mut self, root: impl AsRef<Path>) -> Self {
        self.root = root.as_ref().to_path_buf();
        self
    }

    /// Source files matched by the patterns, in load order.
    pub fn sources(&self) -> Result<Vec<PathBuf>, LoadError> {
        let mut found = IndexSet::new();
        for pattern in &self.patterns {
            let full = self.root.join(pattern);
            let full = full.to_string_lossy();
            let entries = glob::glob(&full).map_err(|source| LoadError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;

            let mut matched = Vec::new();
            for entry in entries {
                let path = entry.map_err(|err| LoadError::Io {
                    path: err.path().to_path_buf(),
                    source: err.into(),
                })?;
                if path.is_file() {
                    matched.push(path);
                }
            }
            matched.sort();
            found.extend(matched);
        }

        if found.is_empty() {
            return Err(LoadError::NoSources {
                patterns: self.patterns.clone(),
            });
        }
        Ok(found.into_iter().collect())
    }

    /// Reads and flattens every matched source.
    pub fn load(&self) -> Result<Vec<TokenRecord>, LoadError> {
        let mut records = Vec::new();
        for path in self.sources()? {
            let origin = path.strip_prefix(&self.root).unwrap_or(&path);
            let loaded = load_file(&path)?;
            tracing::debug!("loaded {} tokens from {}", loaded.len(), origin.display());
            records.extend(
                loaded
                    .into_iter()
                    .map(|record| record.with_origin(origin)),
            );
        }
        Ok(records)
    }
}

/// Reads one JSON or YAML token source.
pub fn load_file(path: &Path) -> Result<Vec<TokenRecord>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let value = match extension.as_deref() {
        Some("json") => serde_json::from_str(&text).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?,
        Some("yaml") | Some("yml") => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(&text).map_err(|source| LoadError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })?;
            yaml_to_json(yaml)
        }
        _ => {
            return Err(LoadError::UnsupportedExtension {
                path: path.to_path_buf(),
            })
        }
    };

    match value {
        Value::Object(map) => Ok(flatten(&map)),
        _ => Err(LoadError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Flattens a parsed source into ordered records.
pub fn flatten(source: &Map<String, Value>) -> Vec<TokenRecord> {
    let mut records = Vec::new();
    flatten_group(source, &mut Vec::new(), None, &mut records);
    records
}

fn flatten_group(
    group: &Map<String, Value>,
    path: &mut Vec<String>,
    inherited_type: Option<&str>,
    out: &mut Vec<TokenRecord>,
) {
    let group_type = group
        .get("$type")
        .and_then(Value::as_str)
        .or(inherited_type);

    for (key, child) in group {
        if key.starts_with('$') {
            continue;
        }
        path.push(key.clone());
        match child {
            Value::Object(object) if is_leaf(object) => {
                out.push(leaf_record(object, path, group_type));
            }
            Value::Object(object) => flatten_group(object, path, group_type, out),
            scalar => out.push(TokenRecord {
                path: Some(path.clone()),
                token_type: None,
                value: Some(scalar.clone()),
                origin: None,
            }),
        }
        path.pop();
    }
}

fn is_leaf(object: &Map<String, Value>) -> bool {
    object.contains_key("value") || object.contains_key("$value")
}

fn leaf_record(object: &Map<String, Value>, path: &[String], group_type: Option<&str>) -> TokenRecord {
    let value = object.get("$value").or_else(|| object.get("value")).cloned();
    let token_type = object
        .get("$type")
        .or_else(|| object.get("type"))
        .and_then(Value::as_str)
        .or(group_type)
        .map(String::from);

    TokenRecord {
        path: Some(path.to_vec()),
        token_type,
        value,
        origin: None,
    }
}

/// YAML mappings may use numeric keys (`500:`), which JSON objects can't; keys become
/// their string form.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                let key = match key {
                    Yaml::String(s) => s,
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    other => {
                        tracing::warn!("ignoring non-scalar YAML key {other:?}");
                        continue;
                    }
                };
                map.insert(key, yaml_to_json(value));
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

/// Parses an already-resolved feed: a JSON array of `{path, type, value}` records.
pub fn load_flat_feed(text: &str) -> Result<Vec<TokenRecord>, LoadError> {
    serde_json::from_str(text).map_err(LoadError::Feed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn flatten_value(value: Value) -> Vec<TokenRecord> {
        match value {
            Value::Object(map) => flatten(&map),
            _ => panic!("expected an object"),
        }
    }

    fn paths(records: &[TokenRecord]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.path.as_ref().unwrap().join("."))
            .collect()
    }

    #[test]
    fn test_flatten_keeps_document_order() {
        let records = flatten_value(json!({
            "color": {
                "white": { "value": "#ffffff", "type": "color" },
                "black": { "value": "#000000", "type": "color" },
                "brand": {
                    "25": { "value": "#fcfaff", "type": "color" },
                    "500": { "value": "#9e77ed", "type": "color" }
                }
            },
            "radius": { "lg": { "value": "8px", "type": "borderRadius" } }
        }));
        assert_eq!(
            paths(&records),
            ["color.white", "color.black", "color.brand.25", "color.brand.500", "radius.lg"]
        );
        assert_eq!(records[3].value, Some(json!("#9e77ed")));
    }

    #[test]
    fn test_group_type_is_inherited() {
        let records = flatten_value(json!({
            "color": {
                "$type": "color",
                "$description": "palette",
                "gray": { "50": { "$value": "#f7f7f7" } },
                "accent": { "$value": "#ff0000", "$type": "other" }
            }
        }));
        assert_eq!(paths(&records), ["color.gray.50", "color.accent"]);
        assert_eq!(records[0].token_type.as_deref(), Some("color"));
        assert_eq!(records[1].token_type.as_deref(), Some("other"));
    }

    #[test]
    fn test_bare_scalars_become_untyped_records() {
        let records = flatten_value(json!({ "color": { "red": "#ff0000" } }));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].token_type, None);
        assert_eq!(records[0].value, Some(json!("#ff0000")));
    }

    #[test]
    fn test_loader_reads_sorted_sources_with_origin() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("tokens")).unwrap();
        fs::write(
            dir.path().join("tokens/b.json"),
            r#"{"radius": {"lg": {"value": "8px", "type": "borderRadius"}}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("tokens/a.yaml"),
            "color:\n  $type: color\n  gray:\n    50:\n      value: \"#f7f7f7\"\n",
        )
        .unwrap();

        let loader = TokenLoader::new(["tokens/**/*.json", "tokens/*.yaml", "tokens/*"])
            .with_root(dir.path());
        let sources = loader.sources().unwrap();
        assert_eq!(sources.len(), 2);
        assert!(sources[0].ends_with("b.json"));
        assert!(sources[1].ends_with("a.yaml"));

        let records = loader.load().unwrap();
        assert_eq!(paths(&records), ["radius.lg", "color.gray.50"]);
        assert_eq!(records[1].token_type.as_deref(), Some("color"));
        assert_eq!(records[1].origin.as_deref(), Some(Path::new("tokens/a.yaml")));
    }

    #[test]
    fn test_no_sources_is_an_error() {
        let dir = tempdir().unwrap();
        let err = TokenLoader::new(["tokens/**/*.json"])
            .with_root(dir.path())
            .load()
            .unwrap_err();
        assert!(matches!(err, LoadError::NoSources { .. }));
        assert_eq!(err.to_string(), "no token sources matched tokens/**/*.json");
    }

    #[test]
    fn test_top_level_must_be_an_object() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("list.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            load_file(&path),
            Err(LoadError::NotAnObject { .. })
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tokens.toml");
        fs::write(&path, "").unwrap();
        assert!(matches!(
            load_file(&path),
            Err(LoadError::UnsupportedExtension { .. })
        ));
    }

    #[test]
    fn test_flat_feed() {
        let records = load_flat_feed(
            r##"[
                {"path": ["color", "gray", "50"], "type": "color", "value": "#f7f7f7"},
                {"path": ["spacing", "max", "container"], "value": "1280px"}
            ]"##,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].token_type, None);

        assert!(matches!(load_flat_feed("{}"), Err(LoadError::Feed(_))));
    }
}
