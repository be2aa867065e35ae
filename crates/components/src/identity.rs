//! Reference-identity map keys.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Map key comparing an [`Arc`] by allocation instead of by value.
///
/// Two `ByAddress` keys are equal only when they point at the same allocation,
/// regardless of what [`PartialEq`] says about the pointees. The key holds a
/// strong reference, so the address cannot be freed and reused by another
/// entity while the key is alive.
pub struct ByAddress<T: ?Sized>(Arc<T>);

impl<T: ?Sized> ByAddress<T> {
	pub fn new(value: Arc<T>) -> Self {
		Self(value)
	}

	/// Returns the wrapped handle.
	pub fn get(&self) -> &Arc<T> {
		&self.0
	}

	fn addr(&self) -> *const () {
		Arc::as_ptr(&self.0).cast::<()>()
	}
}

impl<T: ?Sized> From<&Arc<T>> for ByAddress<T> {
	fn from(value: &Arc<T>) -> Self {
		Self(Arc::clone(value))
	}
}

impl<T: ?Sized> Clone for ByAddress<T> {
	fn clone(&self) -> Self {
		Self(Arc::clone(&self.0))
	}
}

impl<T: ?Sized> PartialEq for ByAddress<T> {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self.addr(), other.addr())
	}
}

impl<T: ?Sized> Eq for ByAddress<T> {}

impl<T: ?Sized> Hash for ByAddress<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.addr().hash(state);
	}
}

impl<T: ?Sized + std::fmt::Debug> std::fmt::Debug for ByAddress<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("ByAddress").field(&self.addr()).field(&self.0).finish()
	}
}
