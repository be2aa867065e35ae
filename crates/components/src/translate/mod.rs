//! Per-kind translators.
//!
//! # Role
//!
//! A translator turns one entity into its serialized, id-referencing payload.
//! The registry calls exactly one translator per fresh registration and passes
//! itself along, so a translator can register nested entities (a collection's
//! coder, a coder's components) or resolve ids of entities registered earlier
//! (a composite transform's children).
//!
//! Translators are plugged in through [`Translators`]; [`StandardTranslator`]
//! implements all four kinds for the entity model in `sluice-model`.

use std::sync::Arc;

use sluice_model::{
	AppliedTransform, Coder, CoderProto, Collection, CollectionProto, TransformProto, WindowingStrategy,
	WindowingStrategyProto,
};

use crate::error::Result;
use crate::registry::ComponentRegistry;

mod coder;
mod collection;
mod transform;
mod windowing;


pub trait TransformTranslator: Send + Sync {
	/// Translates `transform`. Every child must already be registered.
	fn translate(
		&self,
		transform: &Arc<AppliedTransform>,
		children: &[Arc<AppliedTransform>],
		registry: &mut ComponentRegistry,
	) -> Result<TransformProto>;
}

pub trait CollectionTranslator: Send + Sync {
	fn translate(&self, collection: &Arc<Collection>, registry: &mut ComponentRegistry) -> Result<CollectionProto>;
}

pub trait WindowingStrategyTranslator: Send + Sync {
	fn translate(
		&self,
		strategy: &Arc<WindowingStrategy>,
		registry: &mut ComponentRegistry,
	) -> Result<WindowingStrategyProto>;
}

pub trait CoderTranslator: Send + Sync {
	fn translate(&self, coder: &Arc<Coder>, registry: &mut ComponentRegistry) -> Result<CoderProto>;
}

/// The set of translators a registry delegates to, one per translated kind.
///
/// Environments have no translator; they are stored as given.
#[derive(Clone)]
pub struct Translators {
	pub transform: Arc<dyn TransformTranslator>,
	pub collection: Arc<dyn CollectionTranslator>,
	pub windowing_strategy: Arc<dyn WindowingStrategyTranslator>,
	pub coder: Arc<dyn CoderTranslator>,
}

impl Translators {
	/// Uses [`StandardTranslator`] for every kind.
	pub fn standard() -> Self {
		let standard = Arc::new(StandardTranslator);
		Self {
			transform: standard.clone(),
			collection: standard.clone(),
			windowing_strategy: standard.clone(),
			coder: standard,
		}
	}

	pub fn with_transform(mut self, translator: Arc<dyn TransformTranslator>) -> Self {
		self.transform = translator;
		self
	}

	pub fn with_collection(mut self, translator: Arc<dyn CollectionTranslator>) -> Self {
		self.collection = translator;
		self
	}

	pub fn with_windowing_strategy(mut self, translator: Arc<dyn WindowingStrategyTranslator>) -> Self {
		self.windowing_strategy = translator;
		self
	}

	pub fn with_coder(mut self, translator: Arc<dyn CoderTranslator>) -> Self {
		self.coder = translator;
		self
	}
}

impl Default for Translators {
	fn default() -> Self {
		Self::standard()
	}
}

impl std::fmt::Debug for Translators {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Translators").finish_non_exhaustive()
	}
}

/// Translator for the built-in entity model.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTranslator;
