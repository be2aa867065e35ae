//! Value codecs.
//!
//! A [`Coder`] describes how elements are encoded on the wire. Two coders may
//! compare equal by value and still encode incompatible formats (a custom coder
//! whose payload is opaque to us, for example), so registries key coders by
//! allocation rather than by [`PartialEq`]. Constructors here therefore return a
//! fresh [`Arc`] on every call, except for the window coders, which are shared
//! singletons.

use std::borrow::Cow;
use std::sync::{Arc, LazyLock};

/// Well-known coder URNs.
pub mod urns {
	pub const VAR_INT: &str = "sluice:coder:varint:v1";
	pub const BYTES: &str = "sluice:coder:bytes:v1";
	pub const STRING_UTF8: &str = "sluice:coder:string_utf8:v1";
	pub const KV: &str = "sluice:coder:kv:v1";
	pub const ITERABLE: &str = "sluice:coder:iterable:v1";
	pub const LENGTH_PREFIX: &str = "sluice:coder:length_prefix:v1";
	pub const WINDOWED_VALUE: &str = "sluice:coder:windowed_value:v1";
	pub const GLOBAL_WINDOW: &str = "sluice:coder:global_window:v1";
	pub const INTERVAL_WINDOW: &str = "sluice:coder:interval_window:v1";
	/// Coder implemented by SDK code; the payload is opaque.
	pub const CUSTOM: &str = "sluice:coder:custom:v1";
}

static GLOBAL_WINDOW_CODER: LazyLock<Arc<Coder>> =
	LazyLock::new(|| Arc::new(Coder::new("GlobalWindowCoder", urns::GLOBAL_WINDOW)));

static INTERVAL_WINDOW_CODER: LazyLock<Arc<Coder>> =
	LazyLock::new(|| Arc::new(Coder::new("IntervalWindowCoder", urns::INTERVAL_WINDOW)));

/// A value codec.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coder {
	type_name: Cow<'static, str>,
	urn: Cow<'static, str>,
	components: Vec<Arc<Coder>>,
	payload: Vec<u8>,
}

impl Coder {
	/// Creates a coder with no components and an empty payload.
	pub fn new(type_name: impl Into<Cow<'static, str>>, urn: impl Into<Cow<'static, str>>) -> Self {
		Self {
			type_name: type_name.into(),
			urn: urn.into(),
			components: Vec::new(),
			payload: Vec::new(),
		}
	}

	/// Sets the component coders.
	pub fn with_components(mut self, components: Vec<Arc<Coder>>) -> Self {
		self.components = components;
		self
	}

	/// Sets the opaque payload.
	pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
		self.payload = payload.into();
		self
	}

	/// Creates an SDK-defined coder whose payload is opaque to the runner.
	pub fn custom(type_name: impl Into<String>, payload: impl Into<Vec<u8>>) -> Arc<Self> {
		Arc::new(Self::new(type_name.into(), urns::CUSTOM).with_payload(payload))
	}

	pub fn var_int() -> Arc<Self> {
		Arc::new(Self::new("VarIntCoder", urns::VAR_INT))
	}

	pub fn bytes() -> Arc<Self> {
		Arc::new(Self::new("ByteArrayCoder", urns::BYTES))
	}

	pub fn string_utf8() -> Arc<Self> {
		Arc::new(Self::new("StringUtf8Coder", urns::STRING_UTF8))
	}

	pub fn kv(key: Arc<Coder>, value: Arc<Coder>) -> Arc<Self> {
		Arc::new(Self::new("KvCoder", urns::KV).with_components(vec![key, value]))
	}

	pub fn iterable(element: Arc<Coder>) -> Arc<Self> {
		Arc::new(Self::new("IterableCoder", urns::ITERABLE).with_components(vec![element]))
	}

	pub fn length_prefix(inner: Arc<Coder>) -> Arc<Self> {
		Arc::new(Self::new("LengthPrefixCoder", urns::LENGTH_PREFIX).with_components(vec![inner]))
	}

	/// Wraps `element` together with its window, timestamp and pane.
	pub fn windowed_value(element: Arc<Coder>, window: Arc<Coder>) -> Arc<Self> {
		Arc::new(Self::new("FullWindowedValueCoder", urns::WINDOWED_VALUE).with_components(vec![element, window]))
	}

	/// Returns the shared coder for the global window.
	pub fn global_window() -> Arc<Self> {
		Arc::clone(&GLOBAL_WINDOW_CODER)
	}

	/// Returns the shared coder for interval windows.
	pub fn interval_window() -> Arc<Self> {
		Arc::clone(&INTERVAL_WINDOW_CODER)
	}

	/// Returns the simple type name, used as the base of the coder's id.
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	pub fn urn(&self) -> &str {
		&self.urn
	}

	pub fn components(&self) -> &[Arc<Coder>] {
		&self.components
	}

	pub fn payload(&self) -> &[u8] {
		&self.payload
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn constructors_allocate_distinct_instances() {
		let a = Coder::var_int();
		let b = Coder::var_int();
		assert_eq!(a, b);
		assert!(!Arc::ptr_eq(&a, &b));
	}

	#[test]
	fn window_coders_are_shared() {
		assert!(Arc::ptr_eq(&Coder::global_window(), &Coder::global_window()));
		assert!(Arc::ptr_eq(&Coder::interval_window(), &Coder::interval_window()));
	}

	#[test]
	fn kv_keeps_component_order() {
		let kv = Coder::kv(Coder::string_utf8(), Coder::var_int());
		let names: Vec<_> = kv.components().iter().map(|c| c.type_name()).collect();
		assert_eq!(names, ["StringUtf8Coder", "VarIntCoder"]);
		assert_eq!(kv.urn(), urns::KV);
	}
}
