//! Policies for combining newly loaded properties with existing ones.

use rustc_hash::FxHashMap as HashMap;

/// How a load combines with properties already held by a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
	/// Keep existing values; only add keys that are not present yet.
	SkipExists,
	/// Add new keys and overwrite existing ones.
	ReplaceExists,
	/// Discard everything held and keep only the loaded properties.
	#[default]
	ReplaceAll,
}

impl LoadMode {
	/// Merges `loaded` into `existing` according to this mode.
	pub fn merge(self, existing: &mut HashMap<String, String>, loaded: HashMap<String, String>) {
		match self {
			LoadMode::ReplaceAll => *existing = loaded,
			LoadMode::ReplaceExists => existing.extend(loaded),
			LoadMode::SkipExists => {
				for (key, value) in loaded {
					existing.entry(key).or_insert(value);
				}
			}
		}
	}
}

impl core::str::FromStr for LoadMode {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().replace('_', "-").as_str() {
			"skip-exists" => Ok(LoadMode::SkipExists),
			"replace-exists" => Ok(LoadMode::ReplaceExists),
			"replace-all" => Ok(LoadMode::ReplaceAll),
			_ => Err(format!(
				"invalid load mode: '{s}' (expected skip-exists, replace-exists, replace-all)"
			)),
		}
	}
}
