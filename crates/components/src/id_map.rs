//! Bidirectional entity ↔ id mapping for one component kind.

use std::hash::Hash;

use rustc_hash::FxHashMap as HashMap;

use crate::error::{Error, Result};
use crate::kind::ComponentKind;

/// Two synchronized maps: entity key → id and id → entity key.
///
/// Ids are unique within the map; binding an id that is already taken fails
/// with [`Error::DuplicateId`] and leaves both maps untouched.
#[derive(Debug)]
pub(crate) struct IdMap<K> {
	kind: ComponentKind,
	by_key: HashMap<K, String>,
	by_id: HashMap<String, K>,
}

impl<K: Hash + Eq + Clone> IdMap<K> {
	pub(crate) fn new(kind: ComponentKind) -> Self {
		Self {
			kind,
			by_key: HashMap::default(),
			by_id: HashMap::default(),
		}
	}

	pub(crate) fn id_of(&self, key: &K) -> Option<&str> {
		self.by_key.get(key).map(String::as_str)
	}

	pub(crate) fn key_of(&self, id: &str) -> Option<&K> {
		self.by_id.get(id)
	}

	pub(crate) fn contains_id(&self, id: &str) -> bool {
		self.by_id.contains_key(id)
	}

	pub(crate) fn len(&self) -> usize {
		self.by_key.len()
	}

	/// Binds `key` to `id`.
	///
	/// The key must not already be bound; callers check with [`Self::id_of`] first.
	pub(crate) fn insert(&mut self, key: K, id: String) -> Result<()> {
		if self.by_id.contains_key(&id) {
			return Err(Error::DuplicateId { kind: self.kind, id });
		}
		debug_assert!(!self.by_key.contains_key(&key), "{} key bound twice", self.kind);
		self.by_id.insert(id.clone(), key.clone());
		self.by_key.insert(key, id);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lookups_work_in_both_directions() {
		let mut map = IdMap::new(ComponentKind::Environment);
		map.insert("env-a", "a".to_string()).unwrap();
		map.insert("env-b", "b".to_string()).unwrap();

		assert_eq!(map.id_of(&"env-a"), Some("a"));
		assert_eq!(map.key_of("b"), Some(&"env-b"));
		assert!(map.contains_id("a"));
		assert!(!map.contains_id("c"));
		assert_eq!(map.len(), 2);
	}

	#[test]
	fn duplicate_id_is_rejected() {
		let mut map = IdMap::new(ComponentKind::Coder);
		map.insert(1, "VarIntCoder".to_string()).unwrap();

		let err = map.insert(2, "VarIntCoder".to_string()).unwrap_err();
		match err {
			Error::DuplicateId { kind, id } => {
				assert_eq!(kind, ComponentKind::Coder);
				assert_eq!(id, "VarIntCoder");
			}
			other => panic!("unexpected error: {other}"),
		}
		assert_eq!(map.id_of(&2), None);
		assert_eq!(map.len(), 1);
	}
}
