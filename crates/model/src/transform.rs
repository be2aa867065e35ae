//! Applied transforms.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::collection::Collection;
use crate::components::FunctionSpec;

/// A transform applied at a specific point of a pipeline.
///
/// The same transform definition applied twice yields two applied transforms;
/// identity is per allocation. Composite transforms carry no spec of their own
/// and are expanded into children by the caller.
#[derive(Debug)]
pub struct AppliedTransform {
	full_name: String,
	spec: Option<FunctionSpec>,
	inputs: BTreeMap<String, Arc<Collection>>,
	outputs: BTreeMap<String, Arc<Collection>>,
	requires_environment: bool,
}

impl AppliedTransform {
	/// Creates a composite transform with no spec and no inputs or outputs.
	pub fn composite(full_name: impl Into<String>) -> Self {
		Self {
			full_name: full_name.into(),
			spec: None,
			inputs: BTreeMap::new(),
			outputs: BTreeMap::new(),
			requires_environment: false,
		}
	}

	/// Creates a primitive transform described by `spec`.
	pub fn primitive(full_name: impl Into<String>, spec: FunctionSpec) -> Self {
		Self {
			spec: Some(spec),
			..Self::composite(full_name)
		}
	}

	pub fn with_input(mut self, tag: impl Into<String>, collection: Arc<Collection>) -> Self {
		self.inputs.insert(tag.into(), collection);
		self
	}

	pub fn with_output(mut self, tag: impl Into<String>, collection: Arc<Collection>) -> Self {
		self.outputs.insert(tag.into(), collection);
		self
	}

	/// Marks the transform as executed by SDK code, binding it to the pipeline's environment.
	pub fn executed_by_sdk(mut self) -> Self {
		self.requires_environment = true;
		self
	}

	/// Returns the slash-separated full name, e.g. `Count/Combine/Extract`.
	pub fn full_name(&self) -> &str {
		&self.full_name
	}

	pub fn spec(&self) -> Option<&FunctionSpec> {
		self.spec.as_ref()
	}

	pub fn inputs(&self) -> &BTreeMap<String, Arc<Collection>> {
		&self.inputs
	}

	pub fn outputs(&self) -> &BTreeMap<String, Arc<Collection>> {
		&self.outputs
	}

	pub fn requires_environment(&self) -> bool {
		self.requires_environment
	}
}
