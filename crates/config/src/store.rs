//! The property store.
//!
//! A [`Config`] holds raw property strings, an optional renderer and a cache
//! of parser instances. One process-wide singleton is available through
//! [`Config::global`]; further stores are created with [`Config::create`]
//! and may inherit from the singleton.
//!
//! # Inheritance
//!
//! An inheriting store reads a property from the singleton when it does not
//! hold the property itself, and applies the singleton's renderer before
//! its own. Writes never reach the singleton.
//!
//! # Locking
//!
//! Every mutation holds the store's write lock for its full duration. Reads
//! take the same lock in shared mode, so a read observes every completed
//! write. Renderers and parsers run after the lock is released and may read
//! from any store.

use std::any::{Any, TypeId};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::{Arc, LazyLock};

use parking_lot::{Mutex, RwLock};
use propkey_registry::{AccessKey, KeyInfo, KeyRegistry, ValueParser};
use rustc_hash::FxHashMap as HashMap;

use crate::error::{ConfigError, Result};
use crate::loader::{self, Format, Properties};
use crate::mode::LoadMode;
use crate::render::ValueRenderer;
use crate::tree::{self, PropertyTree, TreeConflict};

static GLOBAL: LazyLock<Config> =
	LazyLock::new(|| Config::with_registry(KeyRegistry::global(), false));

/// A store of configuration properties with typed access.
pub struct Config {
	inherit_global: bool,
	registry: &'static KeyRegistry,
	state: RwLock<State>,
	parsers: Mutex<ParserCache>,
}

#[derive(Default)]
struct State {
	properties: Properties,
	renderer: Option<Arc<dyn ValueRenderer>>,
}

/// One parser instance per parser type, created on first use.
#[derive(Default)]
struct ParserCache {
	instances: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl ParserCache {
	fn get_or_create<P: ValueParser>(&mut self) -> Arc<P> {
		let instance = self
			.instances
			.entry(TypeId::of::<P>())
			.or_insert_with(|| {
				tracing::trace!(
					domain = "config",
					parser = std::any::type_name::<P>(),
					"parser instance created",
				);
				Arc::new(P::default()) as Arc<dyn Any + Send + Sync>
			})
			.clone();
		match instance.downcast::<P>() {
			Ok(parser) => parser,
			Err(_) => unreachable!("parser cache is keyed by TypeId"),
		}
	}
}

impl core::fmt::Debug for Config {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		let state = self.state.read();
		f.debug_struct("Config")
			.field("inherit_global", &self.inherit_global)
			.field("properties", &state.properties.len())
			.field("renderer", &state.renderer.is_some())
			.finish()
	}
}

impl Config {
	/// Returns the process-wide singleton. It never inherits.
	pub fn global() -> &'static Config {
		&GLOBAL
	}

	/// Creates an empty store backed by the global key registry.
	pub fn create(inherit_global: bool) -> Self {
		Self::with_registry(KeyRegistry::global(), inherit_global)
	}

	/// Creates an empty store that resolves key sets against `registry`.
	pub fn with_registry(registry: &'static KeyRegistry, inherit_global: bool) -> Self {
		Self {
			inherit_global,
			registry,
			state: RwLock::new(State::default()),
			parsers: Mutex::new(ParserCache::default()),
		}
	}

	/// Returns true if this store falls back to the singleton.
	pub fn inherits_global(&self) -> bool {
		self.inherit_global
	}

	/// Loads a resource, merging it into this store according to `mode`.
	pub fn load(&self, path: impl AsRef<Path>, mode: LoadMode) -> Result<&Self> {
		self.load_env(path, None, mode)
	}

	/// Loads a resource and its `env` overlay.
	///
	/// With a non-empty `env`, the overlay (`app_<env>.properties` next to
	/// `app.properties`) is read as well and replaces base entries before
	/// `mode` is applied to this store. Missing resources load as empty.
	pub fn load_env(
		&self,
		path: impl AsRef<Path>,
		env: Option<&str>,
		mode: LoadMode,
	) -> Result<&Self> {
		let path = path.as_ref();
		let mut state = self.state.write();
		let loaded = loader::read_layers(path, env)?;
		tracing::debug!(
			domain = "config",
			path = %path.display(),
			env = env.unwrap_or_default(),
			?mode,
			count = loaded.len(),
			"merging properties",
		);
		mode.merge(&mut state.properties, loaded);
		Ok(self)
	}

	/// Parses in-memory content and merges it according to `mode`.
	pub fn load_str(&self, content: &str, format: Format, mode: LoadMode) -> Result<&Self> {
		let mut state = self.state.write();
		let loaded = format.parse(content).map_err(|source| ConfigError::Io {
			path: "<inline>".into(),
			source,
		})?;
		mode.merge(&mut state.properties, loaded);
		Ok(self)
	}

	/// Removes every property held by this store.
	///
	/// The renderer, parser cache and the singleton are left untouched.
	pub fn destroy(&self) {
		let mut state = self.state.write();
		tracing::debug!(domain = "config", count = state.properties.len(), "destroying properties");
		state.properties.clear();
	}

	/// Replaces the active renderer.
	pub fn set_renderer(&self, renderer: impl ValueRenderer + 'static) {
		self.state.write().renderer = Some(Arc::new(renderer));
	}

	/// Removes the active renderer.
	pub fn clear_renderer(&self) {
		self.state.write().renderer = None;
	}

	/// Sets a single property.
	pub fn put<P: ValueParser>(&self, key: &AccessKey<P>, value: impl Into<String>) -> Result<()> {
		self.put_raw(key.name(), value)
	}

	/// Sets a single property by name. The name must not be empty.
	pub fn put_raw(&self, name: &str, value: impl Into<String>) -> Result<()> {
		if name.is_empty() {
			return Err(ConfigError::MissingArgument("name"));
		}
		let value = value.into();
		tracing::trace!(domain = "config", key = name, "put");
		self.state.write().properties.insert(name.to_string(), value);
		Ok(())
	}

	/// Returns the number of properties held by this store itself.
	pub fn len(&self) -> usize {
		self.state.read().properties.len()
	}

	/// Returns the unrendered value, consulting the singleton when inheriting.
	pub fn raw(&self, name: &str) -> Option<String> {
		let local = self.state.read().properties.get(name).cloned();
		match local {
			Some(v) => Some(v),
			None if self.inherit_global => GLOBAL.state.read().properties.get(name).cloned(),
			None => None,
		}
	}

	/// Returns true if the property is absent or bound to the empty string.
	pub fn is_empty(&self, name: &str) -> bool {
		self.raw(name).is_none_or(|v| v.is_empty())
	}

	/// Reads a property through its key's parser.
	///
	/// Absent properties are rendered from the empty string, so the result
	/// is the parser's zero value unless a renderer supplies one.
	pub fn get<P: ValueParser>(&self, key: &AccessKey<P>) -> Result<P::Output> {
		let rendered = self.bind(key.name(), self.raw(key.name()).as_deref())?;
		let parser = self.parsers.lock().get_or_create::<P>();
		Ok(parser.parse(&rendered))
	}

	/// Reads a property through a caller-supplied parser instance.
	pub fn get_with<P: ValueParser>(&self, name: &str, parser: &P) -> Result<P::Output> {
		let rendered = self.bind(name, self.raw(name).as_deref())?;
		Ok(parser.parse(&rendered))
	}

	/// Returns the registered keys this store can resolve, sorted by name.
	///
	/// Property names with no registered key are left out.
	pub fn key_set(&self) -> Vec<KeyInfo> {
		let mut keys: BTreeSet<KeyInfo> = self.resolve_keys(&self.state.read().properties);
		if self.inherit_global {
			keys.extend(self.resolve_keys(&GLOBAL.state.read().properties));
		}
		keys.into_iter().collect()
	}

	fn resolve_keys(&self, properties: &Properties) -> BTreeSet<KeyInfo> {
		properties
			.keys()
			.filter_map(|name| self.registry.lookup(name))
			.collect()
	}

	/// Renders every key in [`Config::key_set`].
	pub fn map(&self) -> Result<BTreeMap<String, String>> {
		self.key_set()
			.into_iter()
			.map(|info| {
				let value = self.bind(info.name, self.raw(info.name).as_deref())?;
				Ok((info.name.to_string(), value))
			})
			.collect()
	}

	/// Renders every property name, registered or not.
	pub fn entries(&self) -> Result<BTreeMap<String, String>> {
		let mut raw: BTreeMap<String, String> = BTreeMap::new();
		if self.inherit_global {
			raw.extend(
				GLOBAL
					.state
					.read()
					.properties
					.iter()
					.map(|(k, v)| (k.clone(), v.clone())),
			);
		}
		raw.extend(
			self.state
				.read()
				.properties
				.iter()
				.map(|(k, v)| (k.clone(), v.clone())),
		);

		raw.into_iter()
			.map(|(name, value)| {
				let rendered = self.bind(&name, Some(&value))?;
				Ok((name, rendered))
			})
			.collect()
	}

	/// Projects [`Config::map`] into a tree on dotted names.
	///
	/// Conflicts are preserved under the empty-string key; see
	/// [`crate::tree`].
	pub fn tree(&self) -> Result<PropertyTree> {
		self.tree_with(TreeConflict::Preserve)
	}

	/// Projects [`Config::map`] into a tree with an explicit conflict policy.
	pub fn tree_with(&self, policy: TreeConflict) -> Result<PropertyTree> {
		tree::build(self.map()?, policy)
	}

	fn renderer(&self) -> Option<Arc<dyn ValueRenderer>> {
		self.state.read().renderer.clone()
	}

	/// Applies the singleton's renderer (when inheriting) and then this
	/// store's renderer.
	fn bind(&self, name: &str, raw: Option<&str>) -> Result<String> {
		let render_err = |source| ConfigError::Render {
			key: name.to_string(),
			source,
		};

		let mut value = raw.unwrap_or_default().to_string();
		if self.inherit_global
			&& let Some(renderer) = GLOBAL.renderer()
		{
			value = renderer.render(name, &value).map_err(render_err)?;
		}
		if let Some(renderer) = self.renderer() {
			value = renderer.render(name, &value).map_err(render_err)?;
		}
		Ok(value)
	}
}
