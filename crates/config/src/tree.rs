//! Hierarchical projection of dotted property names.
//!
//! `a.b.c=v` becomes `{a: {b: {c: v}}}`. When a name is both a value and a
//! prefix of other names (`a=1` and `a.b=2`), the policy decides:
//!
//! - [`TreeConflict::Preserve`] keeps the value under the empty-string key
//!   of the branch: `{a: {"": 1, b: 2}}`. The value is no longer reachable at
//!   its original dotted path.
//! - [`TreeConflict::Reject`] fails with [`ConfigError::TreeConflict`].
//!
//! Names with empty segments (`a.`, `a..b`) also address the `""` key. If
//! that slot already holds a value, both policies fail rather than drop one.
//! With `Preserve`, `a.b` and `a..b` can coexist with `a`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{ConfigError, Result};

/// Node of a [`PropertyTree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TreeNode {
	Leaf(String),
	Branch(PropertyTree),
}

/// Nested property map, ordered by segment name.
pub type PropertyTree = BTreeMap<String, TreeNode>;

/// Policy for names that are both a value and a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeConflict {
	/// Keep the value under the `""` key of the branch.
	#[default]
	Preserve,
	/// Report the conflict as an error.
	Reject,
}

impl TreeNode {
	/// Returns the leaf value, if this is a leaf.
	pub fn as_leaf(&self) -> Option<&str> {
		match self {
			TreeNode::Leaf(v) => Some(v),
			TreeNode::Branch(_) => None,
		}
	}

	/// Returns the children, if this is a branch.
	pub fn as_branch(&self) -> Option<&PropertyTree> {
		match self {
			TreeNode::Branch(b) => Some(b),
			TreeNode::Leaf(_) => None,
		}
	}
}

/// Follows a dotted path through a tree.
pub fn lookup<'a>(tree: &'a PropertyTree, path: &str) -> Option<&'a TreeNode> {
	let mut segments = path.split('.');
	let mut node = tree.get(segments.next()?)?;
	for segment in segments {
		node = node.as_branch()?.get(segment)?;
	}
	Some(node)
}

/// Builds a tree from flat `(name, value)` pairs.
///
/// The result does not depend on input order.
pub fn build<I, K, V>(entries: I, policy: TreeConflict) -> Result<PropertyTree>
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: Into<String>,
{
	let mut root = PropertyTree::new();
	for (name, value) in entries {
		insert(&mut root, name.as_ref(), value.into(), policy)?;
	}
	Ok(root)
}

fn insert(root: &mut PropertyTree, name: &str, value: String, policy: TreeConflict) -> Result<()> {
	let conflict = || ConfigError::TreeConflict {
		key: name.to_string(),
	};

	let mut segments: Vec<&str> = name.split('.').collect();
	let last = segments.pop().unwrap_or_default();

	let mut active = root;
	for segment in segments {
		let node = active
			.entry(segment.to_string())
			.or_insert_with(|| TreeNode::Branch(PropertyTree::new()));
		if let TreeNode::Leaf(prev) = node {
			if policy == TreeConflict::Reject {
				return Err(conflict());
			}
			let prev = std::mem::take(prev);
			*node = TreeNode::Branch(PropertyTree::from([(String::new(), TreeNode::Leaf(prev))]));
		}
		let TreeNode::Branch(branch) = node else {
			unreachable!("node was converted to a branch");
		};
		active = branch;
	}

	match active.get_mut(last) {
		Some(TreeNode::Branch(branch)) => {
			if policy == TreeConflict::Reject {
				return Err(conflict());
			}
			// `a..b` leaves a branch in the `""` slot; the value goes below it.
			let mut slot = branch;
			while matches!(slot.get(""), Some(TreeNode::Branch(_))) {
				let Some(TreeNode::Branch(inner)) = slot.get_mut("") else {
					unreachable!("slot was checked to be a branch");
				};
				slot = inner;
			}
			if slot.contains_key("") {
				return Err(conflict());
			}
			slot.insert(String::new(), TreeNode::Leaf(value));
		}
		// Only a preserved value can already sit here, e.g. `a` then `a.`.
		Some(TreeNode::Leaf(_)) => return Err(conflict()),
		None => {
			active.insert(last.to_string(), TreeNode::Leaf(value));
		}
	}
	Ok(())
}
