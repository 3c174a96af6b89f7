//! Process-wide name to key mapping.
//!
//! Registration is serialized by a writer mutex and publishes a fresh
//! snapshot; lookups load the current snapshot without locking.

use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap as HashMap;

use crate::key::{AccessKey, KeyDecl, KeyInfo};
use crate::parse::ValueParser;

/// Registry of known access keys, indexed by property name.
pub struct KeyRegistry {
	snap: ArcSwap<HashMap<&'static str, KeyInfo>>,
	write: Mutex<()>,
}

impl Default for KeyRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl core::fmt::Debug for KeyRegistry {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("KeyRegistry")
			.field("len", &self.len())
			.finish()
	}
}

impl KeyRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			snap: ArcSwap::from_pointee(HashMap::default()),
			write: Mutex::new(()),
		}
	}

	/// Returns the process-wide registry.
	///
	/// Created on first access, at which point every [`crate::config_key!`]
	/// declaration linked into the binary is registered.
	pub fn global() -> &'static KeyRegistry {
		static GLOBAL: OnceLock<KeyRegistry> = OnceLock::new();
		GLOBAL.get_or_init(|| {
			let registry = KeyRegistry::new();
			let count = registry.register_declared();
			tracing::debug!(domain = "keys", count, "global key registry initialized");
			registry
		})
	}

	/// Registers a key, replacing any entry with the same name.
	pub fn register<P: ValueParser>(&self, name: &'static str) -> AccessKey<P> {
		let key = AccessKey::<P>::new(name);
		self.insert_all(std::iter::once(key.info()));
		key
	}

	/// Registers every key declared with [`crate::config_key!`].
	///
	/// Returns the number of declarations visited. Calling this again is
	/// harmless; entries are simply rewritten.
	pub fn register_declared(&self) -> usize {
		let infos: Vec<KeyInfo> = inventory::iter::<KeyDecl>
			.into_iter()
			.map(KeyDecl::info)
			.collect();
		let count = infos.len();
		self.insert_all(infos);
		count
	}

	fn insert_all(&self, infos: impl IntoIterator<Item = KeyInfo>) {
		let _guard = self.write.lock();
		let mut next = HashMap::clone(&self.snap.load());
		for info in infos {
			if let Some(prev) = next.insert(info.name, info)
				&& prev.parser_id != info.parser_id
			{
				tracing::debug!(
					domain = "keys",
					name = info.name,
					previous = prev.parser_type,
					parser = info.parser_type,
					"key re-registered with a different parser; last registration wins",
				);
			}
		}
		self.snap.store(Arc::new(next));
	}

	/// Looks up a key by property name.
	#[inline]
	pub fn lookup(&self, name: &str) -> Option<KeyInfo> {
		self.snap.load().get(name).copied()
	}

	/// Returns true if a key with this name is registered.
	#[inline]
	pub fn contains(&self, name: &str) -> bool {
		self.snap.load().contains_key(name)
	}

	/// Returns all registered keys, sorted by name.
	pub fn all(&self) -> Vec<KeyInfo> {
		let mut all: Vec<KeyInfo> = self.snap.load().values().copied().collect();
		all.sort();
		all
	}

	pub fn len(&self) -> usize {
		self.snap.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.snap.load().is_empty()
	}

	/// Suggests a registered name close to `name`, for diagnostics.
	pub fn suggest(&self, name: &str) -> Option<&'static str> {
		self.snap
			.load()
			.keys()
			.copied()
			.map(|k| (strsim::levenshtein(name, k), k))
			.filter(|&(d, _)| d <= 3)
			.min()
			.map(|(_, k)| k)
	}
}
