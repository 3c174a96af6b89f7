use std::any::TypeId;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::parse::ValueParser;

/// Typed handle to a property with compile-time parser information.
///
/// The key is only a name; the value type is `P::Output`. Two keys with the
/// same name address the same raw property regardless of their parser.
pub struct AccessKey<P: ValueParser> {
	name: &'static str,
	_parser: PhantomData<fn() -> P>,
}

impl<P: ValueParser> Clone for AccessKey<P> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<P: ValueParser> Copy for AccessKey<P> {}

impl<P: ValueParser> core::fmt::Debug for AccessKey<P> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("AccessKey")
			.field("name", &self.name)
			.field("parser", &std::any::type_name::<P>())
			.finish()
	}
}

impl<P: ValueParser> core::fmt::Display for AccessKey<P> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.name)
	}
}

impl<P: ValueParser> AccessKey<P> {
	/// Creates a key without registering it.
	///
	/// Use [`crate::config_key!`] or [`crate::KeyRegistry::register`] so the
	/// key shows up in store key sets.
	pub const fn new(name: &'static str) -> Self {
		Self {
			name,
			_parser: PhantomData,
		}
	}

	/// Returns the property name.
	pub const fn name(&self) -> &'static str {
		self.name
	}

	/// Returns the untyped registry record for this key.
	pub fn info(&self) -> KeyInfo {
		KeyDecl::new::<P>(self.name).info()
	}
}

/// Untyped description of a registered key.
///
/// Identity is the name alone, matching how the registry replaces entries.
#[derive(Debug, Clone, Copy)]
pub struct KeyInfo {
	pub name: &'static str,
	/// Rust type name of the parsed value.
	pub value_type: &'static str,
	/// Rust type name of the parser.
	pub parser_type: &'static str,
	pub parser_id: TypeId,
}

impl PartialEq for KeyInfo {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name
	}
}

impl Eq for KeyInfo {}

impl Hash for KeyInfo {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.name.hash(state);
	}
}

impl PartialOrd for KeyInfo {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for KeyInfo {
	fn cmp(&self, other: &Self) -> Ordering {
		self.name.cmp(other.name)
	}
}

/// Link-time declaration of a key, collected by [`inventory`].
///
/// Type information is stored as function pointers because `TypeId::of` and
/// `type_name` cannot be evaluated in the `static` that `inventory` builds.
pub struct KeyDecl {
	pub name: &'static str,
	value_type: fn() -> &'static str,
	parser_type: fn() -> &'static str,
	parser_id: fn() -> TypeId,
}

impl KeyDecl {
	pub const fn new<P: ValueParser>(name: &'static str) -> Self {
		Self {
			name,
			value_type: std::any::type_name::<P::Output>,
			parser_type: std::any::type_name::<P>,
			parser_id: TypeId::of::<P>,
		}
	}

	pub fn info(&self) -> KeyInfo {
		KeyInfo {
			name: self.name,
			value_type: (self.value_type)(),
			parser_type: (self.parser_type)(),
			parser_id: (self.parser_id)(),
		}
	}
}

inventory::collect!(KeyDecl);

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parse::{IntParser, StringsParser};

	const PORT: AccessKey<IntParser> = AccessKey::new("server.port");

	#[test]
	fn info_reflects_parser_and_value_types() {
		let info = PORT.info();
		assert_eq!(info.name, "server.port");
		assert_eq!(info.value_type, "i32");
		assert!(info.parser_type.ends_with("IntParser"));
		assert_eq!(info.parser_id, TypeId::of::<IntParser>());
	}

	#[test]
	fn info_identity_is_name_only() {
		let a = PORT.info();
		let b = AccessKey::<StringsParser>::new("server.port").info();
		assert_eq!(a, b);
		assert_ne!(a.parser_id, b.parser_id);
	}

	#[test]
	fn display_is_name() {
		assert_eq!(PORT.to_string(), "server.port");
	}
}
