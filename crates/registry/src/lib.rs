//! Typed property keys and the parsers behind them.
//!
//! Every property a program reads is declared once as an [`AccessKey`]. The
//! key carries its name and, in its type parameter, the [`ValueParser`] that
//! turns the raw string into a typed value. Declared keys are collected into
//! a [`KeyRegistry`] so that stores can enumerate which of their raw entries
//! correspond to known keys.
//!
//! # Declaring keys
//!
//! ```ignore
//! use propkey_registry::config_key;
//! use propkey_registry::parse::{IntParser, StringsParser};
//!
//! config_key!(
//!     /// Maximum number of pooled connections.
//!     pub POOL_SIZE: IntParser = "db.pool.size"
//! );
//! config_key!(pub HOSTS: StringsParser = "cluster.hosts");
//! ```
//!
//! Declarations are linked into a collection at build time; nothing is
//! registered until [`KeyRegistry::register_declared`] runs. The process-wide
//! [`KeyRegistry::global`] runs that pass on first access.

pub mod key;
pub mod parse;
pub mod registry;

pub use key::{AccessKey, KeyDecl, KeyInfo};
pub use parse::ValueParser;
pub use registry::KeyRegistry;

#[doc(hidden)]
pub use inventory;

/// Declares a typed access key and submits it for registry discovery.
///
/// Expands to a `const` [`AccessKey`] plus a link-time [`KeyDecl`] so that
/// [`KeyRegistry::register_declared`] can find it without the key being
/// referenced first.
#[macro_export]
macro_rules! config_key {
	($(#[$meta:meta])* $vis:vis $ident:ident : $parser:ty = $name:literal) => {
		$(#[$meta])*
		$vis const $ident: $crate::AccessKey<$parser> = $crate::AccessKey::new($name);

		$crate::inventory::submit! {
			$crate::KeyDecl::new::<$parser>($name)
		}
	};
}
