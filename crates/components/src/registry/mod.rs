//! The component registry.
//!
//! # Role
//!
//! [`ComponentRegistry`] is the accumulate phase of a translation pass. Callers
//! register entities in dependency order (children before parents); each fresh
//! entity gets a unique id and its payload is produced by the kind's
//! translator and stored in the accumulator. [`ComponentRegistry::to_components`]
//! is the finalize phase: it snapshots the accumulator without consuming it.
//!
//! # Identity
//!
//! | kind               | dedup key                    | base name                       |
//! |--------------------|------------------------------|---------------------------------|
//! | transform          | allocation ([`ByAddress`])   | full name, or `unnamed-ptransform` |
//! | collection         | allocation ([`ByAddress`])   | declared name                   |
//! | windowing strategy | value                        | `WindowingStrategy(<WindowFn>)` |
//! | coder              | allocation ([`ByAddress`])   | simple type name                |
//! | environment        | value                        | URN                             |
//!
//! Coders are never deduplicated by value: two coders that compare equal may
//! still encode incompatible binary formats.
//!
//! # Invariants
//!
//! - An id, once assigned to an entity, is never reassigned or renamed.
//! - A fresh id never equals a reserved id (one imported via
//!   [`ComponentRegistry::from_components`]) nor an id already assigned to
//!   another entity of the same kind.
//! - Ids are unique per kind only. Two kinds may hand out the same fresh id;
//!   each kind is its own map in [`Components`].
//! - There is no rollback. A failed translation keeps the id that was assigned
//!   before the translator ran, so retrying the same entity reuses it.

use std::sync::Arc;

use rustc_hash::FxHashSet as HashSet;
use sluice_model::{AppliedTransform, Coder, Collection, Components, Environment, WindowingStrategy};

use crate::environment::EnvironmentResolver;
use crate::error::{Error, Result};
use crate::id_map::IdMap;
use crate::identity::ByAddress;
use crate::kind::ComponentKind;
use crate::options::PipelineOptions;
use crate::translate::Translators;
use crate::uniquify::uniquify;


/// Base name for transforms that declare an empty full name.
pub const UNNAMED_TRANSFORM: &str = "unnamed-ptransform";

/// Registers pipeline entities and accumulates their flat representation.
#[derive(Debug)]
pub struct ComponentRegistry {
	components: Components,
	transform_ids: IdMap<ByAddress<AppliedTransform>>,
	collection_ids: IdMap<ByAddress<Collection>>,
	windowing_strategy_ids: IdMap<Arc<WindowingStrategy>>,
	coder_ids: IdMap<ByAddress<Coder>>,
	environment_ids: IdMap<Environment>,
	reserved_ids: HashSet<String>,
	translators: Translators,
}

impl ComponentRegistry {
	/// Creates an empty registry using the standard translators.
	pub fn new() -> Self {
		Self {
			components: Components::default(),
			transform_ids: IdMap::new(ComponentKind::Transform),
			collection_ids: IdMap::new(ComponentKind::Collection),
			windowing_strategy_ids: IdMap::new(ComponentKind::WindowingStrategy),
			coder_ids: IdMap::new(ComponentKind::Coder),
			environment_ids: IdMap::new(ComponentKind::Environment),
			reserved_ids: HashSet::default(),
			translators: Translators::standard(),
		}
	}

	/// Creates a registry seeded with previously flattened components.
	///
	/// Every imported id, of any kind, becomes reserved: fresh registrations
	/// never reuse it, so imported entries are never overwritten. The import
	/// only reserves names. Registering an entity that is logically identical
	/// to an imported one still produces a new entry.
	pub fn from_components(components: Components) -> Self {
		let mut registry = Self::new();
		registry
			.reserved_ids
			.extend(components.all_ids().map(str::to_owned));
		registry.components.merge(components);
		tracing::debug!(reserved = registry.reserved_ids.len(), "imported components");
		registry
	}

	/// Creates a registry with the default environment from `options` pre-registered.
	pub fn from_options(options: &PipelineOptions, resolver: &dyn EnvironmentResolver) -> Result<Self> {
		let environment = resolver.resolve(
			options.default_environment_type.as_deref(),
			options.default_environment_config.as_deref(),
		)?;
		let mut registry = Self::new();
		registry.register_environment(&environment)?;
		Ok(registry)
	}

	/// Replaces the translators used for subsequent registrations.
	pub fn with_translators(mut self, translators: Translators) -> Self {
		self.translators = translators;
		self
	}

	/// Registers a transform and returns its id.
	///
	/// The id is bound to the transform the first time it is seen and is
	/// reused on every later call, even if translation never completed. Once
	/// the transform is materialized in the accumulator, further calls return
	/// immediately without translating again.
	///
	/// `children` must be `Some` for a transform that is not yet materialized;
	/// leaf transforms pass an empty slice. All children must already be
	/// registered.
	pub fn register_transform(
		&mut self,
		transform: &Arc<AppliedTransform>,
		children: Option<&[Arc<AppliedTransform>]>,
	) -> Result<String> {
		let id = self.transform_name(transform)?;
		if self.components.transforms.contains_key(&id) {
			tracing::trace!(kind = %ComponentKind::Transform, %id, "already materialized");
			return Ok(id);
		}
		let Some(children) = children else {
			return Err(Error::InvalidArgument(format!(
				"children of transform {:?} may not be absent",
				transform.full_name()
			)));
		};

		let translator = Arc::clone(&self.translators.transform);
		let proto = translator.translate(transform, children, self)?;
		self.components.transforms.insert(id.clone(), proto);
		tracing::debug!(kind = %ComponentKind::Transform, %id, children = children.len(), "registered");
		Ok(id)
	}

	/// Returns the id bound to `transform`, binding a fresh one if needed.
	fn transform_name(&mut self, transform: &Arc<AppliedTransform>) -> Result<String> {
		let key = ByAddress::from(transform);
		if let Some(existing) = self.transform_ids.id_of(&key) {
			return Ok(existing.to_owned());
		}
		let base = match transform.full_name() {
			"" => UNNAMED_TRANSFORM,
			name => name,
		};
		let id = fresh_id(&self.reserved_ids, &self.transform_ids, base);
		self.transform_ids.insert(key, id.clone())?;
		Ok(id)
	}

	/// Registers a collection and returns its id.
	pub fn register_collection(&mut self, collection: &Arc<Collection>) -> Result<String> {
		let key = ByAddress::from(collection);
		if let Some(existing) = self.collection_ids.id_of(&key) {
			tracing::trace!(kind = %ComponentKind::Collection, id = existing, "dedup hit");
			return Ok(existing.to_owned());
		}
		let id = fresh_id(&self.reserved_ids, &self.collection_ids, collection.name());
		self.collection_ids.insert(key, id.clone())?;

		let translator = Arc::clone(&self.translators.collection);
		let proto = translator.translate(collection, self)?;
		self.components.collections.insert(id.clone(), proto);
		tracing::debug!(kind = %ComponentKind::Collection, %id, "registered");
		Ok(id)
	}

	/// Registers a windowing strategy and returns its id.
	///
	/// Strategies equal by value share one id.
	pub fn register_windowing_strategy(&mut self, strategy: &Arc<WindowingStrategy>) -> Result<String> {
		if let Some(existing) = self.windowing_strategy_ids.id_of(strategy) {
			tracing::trace!(kind = %ComponentKind::WindowingStrategy, id = existing, "dedup hit");
			return Ok(existing.to_owned());
		}
		let id = fresh_id(&self.reserved_ids, &self.windowing_strategy_ids, &strategy.base_name());
		self.windowing_strategy_ids.insert(Arc::clone(strategy), id.clone())?;

		let translator = Arc::clone(&self.translators.windowing_strategy);
		let proto = translator.translate(strategy, self)?;
		self.components.windowing_strategies.insert(id.clone(), proto);
		tracing::debug!(kind = %ComponentKind::WindowingStrategy, %id, "registered");
		Ok(id)
	}

	/// Registers a coder and returns its id.
	///
	/// Coders are keyed by allocation: registering a value-equal coder from a
	/// different [`Arc`] yields a second id and a second entry.
	pub fn register_coder(&mut self, coder: &Arc<Coder>) -> Result<String> {
		let key = ByAddress::from(coder);
		if let Some(existing) = self.coder_ids.id_of(&key) {
			tracing::trace!(kind = %ComponentKind::Coder, id = existing, "dedup hit");
			return Ok(existing.to_owned());
		}
		let id = fresh_id(&self.reserved_ids, &self.coder_ids, coder.type_name());
		self.coder_ids.insert(key, id.clone())?;

		let translator = Arc::clone(&self.translators.coder);
		let proto = translator.translate(coder, self)?;
		self.components.coders.insert(id.clone(), proto);
		tracing::debug!(kind = %ComponentKind::Coder, %id, "registered");
		Ok(id)
	}

	/// Registers an environment and returns its id. Environments equal by value share one id.
	pub fn register_environment(&mut self, environment: &Environment) -> Result<String> {
		if let Some(existing) = self.environment_ids.id_of(environment) {
			tracing::trace!(kind = %ComponentKind::Environment, id = existing, "dedup hit");
			return Ok(existing.to_owned());
		}
		let id = fresh_id(&self.reserved_ids, &self.environment_ids, &environment.urn);
		self.environment_ids.insert(environment.clone(), id.clone())?;
		self.components.environments.insert(id.clone(), environment.clone());
		tracing::debug!(kind = %ComponentKind::Environment, %id, "registered");
		Ok(id)
	}

	/// Returns the id of a transform registered earlier.
	///
	/// This is the lookup translators use to resolve children. A transform's id
	/// is known as soon as it has been named, even before it is materialized.
	pub fn existing_transform_id(&self, transform: &Arc<AppliedTransform>) -> Result<&str> {
		self.transform_ids
			.id_of(&ByAddress::from(transform))
			.ok_or_else(|| not_registered(ComponentKind::Transform, transform.full_name()))
	}

	/// Returns the id of a transform registered earlier.
	///
	/// Fails exactly like [`Self::existing_transform_id`].
	pub fn transform_id(&self, transform: &Arc<AppliedTransform>) -> Result<&str> {
		self.existing_transform_id(transform)
	}

	pub fn collection_id(&self, collection: &Arc<Collection>) -> Result<&str> {
		self.collection_ids
			.id_of(&ByAddress::from(collection))
			.ok_or_else(|| not_registered(ComponentKind::Collection, collection.name()))
	}

	pub fn windowing_strategy_id(&self, strategy: &Arc<WindowingStrategy>) -> Result<&str> {
		self.windowing_strategy_ids
			.id_of(strategy)
			.ok_or_else(|| not_registered(ComponentKind::WindowingStrategy, &strategy.base_name()))
	}

	pub fn coder_id(&self, coder: &Arc<Coder>) -> Result<&str> {
		self.coder_ids
			.id_of(&ByAddress::from(coder))
			.ok_or_else(|| not_registered(ComponentKind::Coder, coder.type_name()))
	}

	pub fn environment_id(&self, environment: &Environment) -> Result<&str> {
		self.environment_ids
			.id_of(environment)
			.ok_or_else(|| not_registered(ComponentKind::Environment, &environment.urn))
	}

	/// Returns the id of the only environment in the accumulator.
	///
	/// Fails unless exactly one environment is present, imported ones included.
	pub fn only_environment_id(&self) -> Result<&str> {
		let environments = &self.components.environments;
		let mut ids = environments.keys();
		match (ids.next(), ids.next()) {
			(Some(id), None) => Ok(id),
			_ => Err(Error::NotExactlyOneEnvironment {
				count: environments.len(),
			}),
		}
	}

	/// Returns the transform bound to `id` by this registry, if any.
	pub fn transform(&self, id: &str) -> Option<&Arc<AppliedTransform>> {
		self.transform_ids.key_of(id).map(ByAddress::get)
	}

	pub fn collection(&self, id: &str) -> Option<&Arc<Collection>> {
		self.collection_ids.key_of(id).map(ByAddress::get)
	}

	pub fn windowing_strategy(&self, id: &str) -> Option<&Arc<WindowingStrategy>> {
		self.windowing_strategy_ids.key_of(id)
	}

	pub fn coder(&self, id: &str) -> Option<&Arc<Coder>> {
		self.coder_ids.key_of(id).map(ByAddress::get)
	}

	pub fn environment(&self, id: &str) -> Option<&Environment> {
		self.environment_ids.key_of(id)
	}

	/// Returns true if `id` was imported and can never be assigned fresh.
	pub fn is_reserved(&self, id: &str) -> bool {
		self.reserved_ids.contains(id)
	}

	/// Number of entities of `kind` this registry has bound ids to.
	///
	/// Imported entries are not counted.
	pub fn registered_count(&self, kind: ComponentKind) -> usize {
		match kind {
			ComponentKind::Transform => self.transform_ids.len(),
			ComponentKind::Collection => self.collection_ids.len(),
			ComponentKind::WindowingStrategy => self.windowing_strategy_ids.len(),
			ComponentKind::Coder => self.coder_ids.len(),
			ComponentKind::Environment => self.environment_ids.len(),
		}
	}

	/// Borrows the accumulator.
	pub fn components(&self) -> &Components {
		&self.components
	}

	/// Snapshots the accumulator. Registration may continue afterwards.
	pub fn to_components(&self) -> Components {
		self.components.clone()
	}

	/// Consumes the registry, returning the accumulator.
	pub fn into_components(self) -> Components {
		self.components
	}
}

impl Default for ComponentRegistry {
	fn default() -> Self {
		Self::new()
	}
}

fn fresh_id<K: std::hash::Hash + Eq + Clone>(reserved: &HashSet<String>, ids: &IdMap<K>, base: &str) -> String {
	uniquify(base, |candidate| ids.contains_id(candidate) || reserved.contains(candidate))
}

fn not_registered(kind: ComponentKind, entity: &str) -> Error {
	Error::NotRegistered {
		kind,
		entity: entity.to_owned(),
	}
}
