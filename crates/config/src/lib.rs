//! Property stores with typed access.
//!
//! Properties are loaded from `key=value` text or XML resources into a
//! [`Config`] store and read back through typed
//! [`AccessKey`](propkey_registry::AccessKey)s:
//!
//! ```ignore
//! use propkey_config::{Config, LoadMode};
//! use propkey_registry::config_key;
//! use propkey_registry::parse::IntParser;
//!
//! config_key!(pub POOL_SIZE: IntParser = "db.pool.size");
//!
//! let config = Config::global();
//! config.load_env("conf/app.properties", Some("dev"), LoadMode::ReplaceAll)?;
//! let size: i32 = config.get(&POOL_SIZE)?;
//! ```
//!
//! # Resources
//!
//! - `*.xml` files are read as `<properties>` documents ([`loader::xml`]).
//! - Everything else is read as properties text ([`loader::properties`]).
//! - A missing file is an empty resource, not an error.
//! - With an environment name, `app_<env>.ext` is layered over `app.ext`.
//!
//! # Merge modes
//!
//! See [`LoadMode`]. The overlay is merged over its base first; the mode
//! then decides how the combined result meets what the store already holds.

pub mod error;
pub mod loader;
pub mod mode;
pub mod render;
mod store;
pub mod tree;

pub use error::{ConfigError, ResourceError, Result};
pub use loader::{Format, Properties};
pub use mode::LoadMode;
pub use propkey_registry::{AccessKey, KeyInfo, KeyRegistry, ValueParser, config_key};
pub use render::{PlaceholderRenderer, RenderError, ValueRenderer};
pub use store::Config;
pub use tree::{PropertyTree, TreeConflict, TreeNode};
