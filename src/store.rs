//! The configuration store: tree state, dot-path access, file loading.

use crate::error::{ConfigError, ConfigResult, value_type};
use crate::merge::merge_map;
use crate::path::lookup;
use crate::reader::ReaderRegistry;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Dot-addressed configuration store.
///
/// Values live in a nested mapping and are addressed with `"a.b.c"`-style
/// paths. Loading a file deep-merges its contents over the current tree,
/// so later files act as override layers. Single-threaded by design: every
/// mutation takes `&mut self` and runs to completion, with no internal
/// locking or snapshotting.
///
/// ```
/// use dotconf::Config;
/// use serde_json::json;
///
/// let mut config = Config::new();
/// config.set("db.host", "localhost");
/// config.set("db.port", 5432);
///
/// assert_eq!(config.get("db.port"), Some(&json!(5432)));
/// assert!(config.has("db.host"));
/// assert_eq!(config.get_as::<u16>("db.port"), Some(5432));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// The nested configuration tree. Non-terminal nodes are always objects.
    tree: Map<String, Value>,
    /// Files already merged, keyed exactly as supplied by the caller.
    loaded: HashSet<PathBuf>,
    /// Extension bindings used by `load`.
    readers: ReaderRegistry,
}

impl Config {
    /// Create an empty store with the built-in reader bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store and load an initial set of files.
    pub fn with_files<P: AsRef<Path>>(files: impl IntoIterator<Item = P>) -> ConfigResult<Self> {
        let mut config = Self::new();
        config.load(files, false)?;
        Ok(config)
    }

    /// Create an empty store with custom reader bindings.
    pub fn with_registry(readers: ReaderRegistry) -> Self {
        Self {
            readers,
            ..Self::default()
        }
    }

    /// Value at `path`, or `None` when the path does not resolve.
    ///
    /// At every nesting depth the not-yet-consumed suffix is tried as a
    /// literal key before descending one segment, so `get("a.b")` against
    /// `{"a.b": 1, "a": {"b": 2}}` returns `1`. An empty path never
    /// resolves. Chain `.unwrap_or` for a fallback value.
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.tree, path)
    }

    /// Typed value at `path`, deserialized through serde.
    ///
    /// `None` when the path does not resolve or the value does not
    /// deserialize into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        self.get(path)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Whether `path` resolves to a value, literal dotted keys included.
    pub fn exists(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Alias of [`exists`](Self::exists).
    pub fn has(&self, path: &str) -> bool {
        self.exists(path)
    }

    /// Write `value` at `path`, creating intermediate mappings as needed.
    ///
    /// A dotted path is always interpreted as nested segments here; unlike
    /// `get`, there is no literal-key shortcut. An existing non-mapping
    /// value at an intermediate segment is overwritten with a fresh empty
    /// mapping. Returns a reference to the written value.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> &Value {
        let (parents, last) = match path.rsplit_once('.') {
            Some((parents, last)) => (Some(parents), last),
            None => (None, path),
        };

        let mut cursor = &mut self.tree;
        if let Some(parents) = parents {
            for segment in parents.split('.') {
                cursor = descend(cursor, segment);
            }
        }

        let slot = cursor.entry(last.to_string()).or_insert(Value::Null);
        *slot = value.into();
        slot
    }

    /// Append `value` to the array at `path`.
    ///
    /// The array is created when the path does not resolve. Errors with
    /// [`ConfigError::InvalidTarget`] when an existing value at `path` is
    /// not an array. Read-modify-write through `get` and `set`, not an
    /// atomic append.
    pub fn push(&mut self, path: &str, value: impl Into<Value>) -> ConfigResult<()> {
        let mut items = match self.get(path) {
            None => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(other) => {
                return Err(ConfigError::InvalidTarget {
                    path: path.to_string(),
                    found: value_type(other),
                });
            }
        };

        items.push(value.into());
        self.set(path, Value::Array(items));
        Ok(())
    }

    /// Deep-merge `incoming` over the current tree.
    ///
    /// Objects merge recursively and arrays positionally; see
    /// [`deep_merge`](crate::deep_merge). Named `override_with` because
    /// `override` is a reserved word.
    pub fn override_with(&mut self, incoming: Map<String, Value>) {
        merge_map(&mut self.tree, incoming);
    }

    /// Load configuration files, in order, merging each over the tree.
    ///
    /// Files already loaded are skipped unless `force_reload` is set, and
    /// missing or unreadable files are skipped silently, so optional
    /// override layers can be listed unconditionally. A file is marked
    /// loaded only once a non-empty mapping was merged from it; an empty
    /// or non-mapping read leaves it unmarked and a later `load` retries
    /// it. The one hard failure is an extension with no registered reader,
    /// which aborts the remaining files in the call.
    pub fn load<P: AsRef<Path>>(
        &mut self,
        files: impl IntoIterator<Item = P>,
        force_reload: bool,
    ) -> ConfigResult<()> {
        for file in files {
            self.load_one(file.as_ref(), force_reload)?;
        }
        Ok(())
    }

    /// Single-file convenience for [`load`](Self::load).
    pub fn load_file(&mut self, file: impl AsRef<Path>, force_reload: bool) -> ConfigResult<()> {
        self.load_one(file.as_ref(), force_reload)
    }

    /// Whether `file` has been merged into the tree.
    pub fn is_loaded(&self, file: impl AsRef<Path>) -> bool {
        self.loaded.contains(file.as_ref())
    }

    /// The full configuration tree.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.tree
    }

    /// Consume the store and return the configuration tree.
    pub fn into_map(self) -> Map<String, Value> {
        self.tree
    }

    fn load_one(&mut self, file: &Path, force_reload: bool) -> ConfigResult<()> {
        if self.loaded.contains(file) && !force_reload {
            debug!(file = %file.display(), "already loaded, skipping");
            return Ok(());
        }
        // Readability probe mirrors the existence check: optional layers
        // the process cannot open are skipped, not errors.
        if !file.is_file() || std::fs::File::open(file).is_err() {
            debug!(file = %file.display(), "missing or unreadable, skipping");
            return Ok(());
        }

        let extension = file
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        let Some(format) = self.readers.lookup(&extension) else {
            return Err(ConfigError::UnsupportedFormat { extension });
        };

        let mapping = format.read(file)?;

        if mapping.is_empty() {
            // Not marked loaded: a later load call retries this file.
            warn!(file = %file.display(), "no data to merge");
            return Ok(());
        }

        debug!(file = %file.display(), %format, keys = mapping.len(), "merging");
        self.override_with(mapping);
        self.loaded.insert(file.to_path_buf());
        Ok(())
    }
}

/// Step one segment down from `map`, creating or replacing the slot with an
/// empty object when it is missing or not a mapping.
fn descend<'a>(map: &'a mut Map<String, Value>, segment: &str) -> &'a mut Map<String, Value> {
    let slot = map
        .entry(segment.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(next) => next,
        _ => unreachable!("slot was just replaced with an object"),
    }
}
