//! Dot-addressed layered configuration store.
//!
//! Holds a nested key/value tree assembled from one or more source files
//! and exposes it through flattened `"a.b.c"` paths. Newly loaded data is
//! deep-merged over previously loaded data, so later files act as override
//! layers (an optional `local.json` on top of a shared `app.yaml`, say).
//!
//! ```no_run
//! use dotconf::Config;
//!
//! let mut config = Config::with_files(["app.yaml", "local.json"])?;
//! let host: String = config.get_as("db.host").unwrap_or_default();
//! config.set("db.pool.size", 16);
//! # Ok::<(), dotconf::ConfigError>(())
//! ```
//!
//! ## Path resolution
//!
//! `get` and `exists` try the not-yet-consumed suffix as a literal key at
//! every nesting depth before descending one segment, so a key that itself
//! contains dots (`"a.b"`) shadows the nested traversal. `set` has no such
//! shortcut: a dotted path is always interpreted as nested segments.
//!
//! ## Loading
//!
//! [`Config::load`] is idempotent per file: a file is merged once and then
//! skipped until `force_reload` is set, and missing or unreadable files
//! are skipped silently. Supported formats are JSON, YAML, TOML, and INI,
//! dispatched by lowercase file extension.

pub mod error;
pub mod merge;
pub mod reader;
pub mod store;

mod path;

pub use error::{ConfigError, ConfigResult};
pub use merge::deep_merge;
pub use reader::{Format, ReaderRegistry};
pub use store::Config;
