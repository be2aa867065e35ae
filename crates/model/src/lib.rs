//! Pipeline entity model for Sluice.
//!
//! This crate provides the in-memory entities a pipeline is built from and the
//! flat, id-keyed representation they are flattened into:
//! - [`Environment`]: Execution environment record (URN + payload)
//! - [`Coder`]: Value codec, compared by value but registered by allocation
//! - [`WindowFn`] / [`WindowingStrategy`]: Windowing configuration
//! - [`Collection`]: A named, typed collection of values
//! - [`AppliedTransform`]: A transform applied at a point in the pipeline
//! - [`Components`]: The flat output container, one id-keyed map per kind

pub mod coder;
pub mod collection;
pub mod components;
pub mod environment;
pub mod transform;
pub mod window;
pub mod wire;

pub use coder::Coder;
pub use collection::{Boundedness, Collection};
pub use components::{CoderProto, CollectionProto, Components, FunctionSpec, TransformProto, WindowingStrategyProto};
pub use environment::{DockerPayload, Environment, ExternalPayload, ProcessPayload};
pub use transform::AppliedTransform;
pub use window::{AccumulationMode, ClosingBehavior, MergeStatus, TimestampCombiner, WindowFn, WindowingStrategy};
pub use wire::WireError;
