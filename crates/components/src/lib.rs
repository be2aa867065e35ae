//! Component registry for Sluice pipelines.
//!
//! Flattens a graph of pipeline entities into a single [`Components`] value in
//! which every entity appears exactly once under a unique, stable id:
//! - [`ComponentRegistry`]: Registration, deduplication and id lookup
//! - [`Translators`]: Per-kind collaborators producing serialized payloads
//! - [`EnvironmentResolver`]: Builds the default environment from [`PipelineOptions`]
//! - [`uniquify`]: The name collision policy

pub mod environment;
pub mod error;
mod id_map;
pub mod identity;
pub mod kind;
pub mod options;
pub mod registry;
pub mod translate;
pub mod uniquify;

pub use environment::{DefaultEnvironmentResolver, EnvironmentResolver};
pub use error::{Error, Result};
pub use identity::ByAddress;
pub use kind::ComponentKind;
pub use options::{OptionsError, PipelineOptions};
pub use registry::ComponentRegistry;
pub use sluice_model::Components;
pub use translate::{
	CoderTranslator, CollectionTranslator, StandardTranslator, TransformTranslator, Translators,
	WindowingStrategyTranslator,
};
pub use uniquify::uniquify;
