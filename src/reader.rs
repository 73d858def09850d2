//! File format readers and the extension registry.
//!
//! The supported formats are a closed enumeration, so dispatch is an
//! exhaustive `match` and adding a format is a compile-time concern. The
//! registry holding the extension bindings is plain instance state owned
//! by the store, so tests can construct a store with a custom binding set.

use crate::error::{ConfigError, ConfigResult};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// A supported configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
    Ini,
}

impl Format {
    /// Format for a lowercase file extension, per the built-in bindings.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            "toml" => Some(Format::Toml),
            "ini" => Some(Format::Ini),
            _ => None,
        }
    }

    /// Read and parse `path` into a top-level mapping.
    ///
    /// An empty valid file, or a file whose top-level value is not a
    /// mapping, yields an empty map; the loader treats both as nothing to
    /// merge. Parse failures are reported as [`ConfigError::Parse`].
    pub fn read(self, path: &Path) -> ConfigResult<Map<String, Value>> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let value = match self {
            Format::Json => parse_json(&content, path)?,
            Format::Yaml => parse_yaml(&content, path)?,
            Format::Toml => parse_toml(&content, path)?,
            Format::Ini => parse_ini(&content, path)?,
        };

        Ok(match value {
            Value::Object(map) => map,
            _ => Map::new(),
        })
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Json => write!(f, "json"),
            Format::Yaml => write!(f, "yaml"),
            Format::Toml => write!(f, "toml"),
            Format::Ini => write!(f, "ini"),
        }
    }
}

fn parse_json(content: &str, path: &Path) -> ConfigResult<Value> {
    if content.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn parse_yaml(content: &str, path: &Path) -> ConfigResult<Value> {
    if content.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_yaml::from_str(content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn parse_toml(content: &str, path: &Path) -> ConfigResult<Value> {
    toml::from_str(content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Sections become nested mappings; keys before the first section header
/// land at the top level. All values are strings, as INI is untyped.
fn parse_ini(content: &str, path: &Path) -> ConfigResult<Value> {
    let ini = ini::Ini::load_from_str(content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let mut root = Map::new();
    for (section, properties) in ini.iter() {
        let mut entries = Map::new();
        for (key, value) in properties.iter() {
            entries.insert(key.to_string(), Value::String(value.to_string()));
        }
        match section {
            Some(name) => {
                root.insert(name.to_string(), Value::Object(entries));
            }
            None => root.extend(entries),
        }
    }
    Ok(Value::Object(root))
}

/// Extension-to-format bindings used by the loader.
///
/// The binding set is fixed at construction; swap in a different registry
/// via [`Config::with_registry`](crate::Config::with_registry) to change it.
#[derive(Debug, Clone)]
pub struct ReaderRegistry {
    bindings: HashMap<String, Format>,
}

impl ReaderRegistry {
    /// Registry with the built-in bindings: `json`, `yaml`, `yml`, `toml`,
    /// `ini`.
    pub fn new() -> Self {
        let bindings = ["json", "yaml", "yml", "toml", "ini"]
            .into_iter()
            .filter_map(|ext| Format::from_extension(ext).map(|format| (ext.to_string(), format)))
            .collect();
        Self { bindings }
    }

    /// Registry with an explicit binding set.
    pub fn with_bindings(bindings: impl IntoIterator<Item = (String, Format)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }

    /// Format bound to a lowercase extension, if any.
    pub fn lookup(&self, extension: &str) -> Option<Format> {
        self.bindings.get(extension).copied()
    }
}

impl Default for ReaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
