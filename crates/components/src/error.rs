use sluice_model::WireError;

use crate::kind::ComponentKind;
use crate::options::OptionsError;

/// Errors raised by the registry and its collaborators.
///
/// Translators return this same type, so a translator failure reaches the
/// caller of the registration unchanged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// A registration was called with an argument it cannot accept.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
	/// An id was requested for an entity that was never registered.
	#[error("{kind} {entity:?} has not been previously registered")]
	NotRegistered { kind: ComponentKind, entity: String },
	#[error("expected exactly one environment, found {count}")]
	NotExactlyOneEnvironment { count: usize },
	/// Two entities of one kind were bound to the same id.
	#[error("duplicate {kind} id: {id:?}")]
	DuplicateId { kind: ComponentKind, id: String },
	/// A translator cannot express the given entity.
	#[error("unsupported {kind}: {detail}")]
	Unsupported { kind: ComponentKind, detail: String },
	#[error("unknown environment type: {0:?}")]
	UnknownEnvironmentType(String),
	#[error("invalid {environment_type} environment config: {reason}")]
	InvalidEnvironmentConfig { environment_type: &'static str, reason: String },
	#[error(transparent)]
	Wire(#[from] WireError),
	#[error(transparent)]
	Options(#[from] OptionsError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
