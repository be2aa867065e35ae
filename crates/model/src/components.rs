//! The flat, id-keyed component representation.
//!
//! [`Components`] is the interchange shape handed to downstream serialization.
//! Every payload refers to other entities by id string only; nothing is nested.
//! Maps are ordered so that encoding the same components twice yields
//! byte-identical output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::collection::Boundedness;
use crate::environment::Environment;
use crate::window::{AccumulationMode, ClosingBehavior, MergeStatus, TimestampCombiner};
use crate::wire::{self, WireError};

/// A URN plus an opaque, URN-specific payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionSpec {
	pub urn: String,
	#[serde(default)]
	pub payload: Vec<u8>,
}

impl FunctionSpec {
	pub fn new(urn: impl Into<String>) -> Self {
		Self {
			urn: urn.into(),
			payload: Vec::new(),
		}
	}

	pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
		self.payload = payload.into();
		self
	}
}

/// Serialized transform. Children, inputs and outputs are ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformProto {
	pub unique_name: String,
	pub spec: Option<FunctionSpec>,
	pub subtransforms: Vec<String>,
	pub inputs: BTreeMap<String, String>,
	pub outputs: BTreeMap<String, String>,
	pub environment_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionProto {
	pub unique_name: String,
	pub coder_id: String,
	pub windowing_strategy_id: String,
	pub is_bounded: Boundedness,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowingStrategyProto {
	pub window_fn: FunctionSpec,
	pub merge_status: MergeStatus,
	pub window_coder_id: String,
	pub accumulation_mode: AccumulationMode,
	pub allowed_lateness_ms: u64,
	pub closing_behavior: ClosingBehavior,
	pub timestamp_combiner: TimestampCombiner,
	/// Set only when the window fn must run in an SDK environment.
	pub environment_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoderProto {
	pub spec: FunctionSpec,
	pub component_coder_ids: Vec<String>,
}

/// Flat container of every registered entity, one id-keyed map per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Components {
	pub transforms: BTreeMap<String, TransformProto>,
	pub collections: BTreeMap<String, CollectionProto>,
	pub windowing_strategies: BTreeMap<String, WindowingStrategyProto>,
	pub coders: BTreeMap<String, CoderProto>,
	pub environments: BTreeMap<String, Environment>,
}

impl Components {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the total number of entries across all five maps.
	pub fn len(&self) -> usize {
		self.transforms.len()
			+ self.collections.len()
			+ self.windowing_strategies.len()
			+ self.coders.len()
			+ self.environments.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Iterates over every id present, across all kinds.
	///
	/// An id used by two kinds is yielded once per kind.
	pub fn all_ids(&self) -> impl Iterator<Item = &str> + '_ {
		self.transforms
			.keys()
			.chain(self.collections.keys())
			.chain(self.windowing_strategies.keys())
			.chain(self.coders.keys())
			.chain(self.environments.keys())
			.map(String::as_str)
	}

	/// Merges `other` into `self`. Entries in `other` replace entries with the same id.
	pub fn merge(&mut self, other: Components) {
		self.transforms.extend(other.transforms);
		self.collections.extend(other.collections);
		self.windowing_strategies.extend(other.windowing_strategies);
		self.coders.extend(other.coders);
		self.environments.extend(other.environments);
	}

	pub fn to_json(&self) -> Result<String, WireError> {
		wire::to_json(self)
	}

	pub fn from_json(json: &str) -> Result<Self, WireError> {
		wire::from_json(json)
	}

	/// Encodes the components in the compact binary form.
	pub fn to_bytes(&self) -> Result<Vec<u8>, WireError> {
		wire::to_bytes(self)
	}

	pub fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
		wire::from_bytes(bytes)
	}
}

#[cfg(test)]
mod tests;
