//! Execution environments.
//!
//! An [`Environment`] is a plain value record: a URN naming the kind of
//! environment and a JSON payload describing how to bring it up. Registries
//! deduplicate environments by value.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::wire::WireError;

/// Well-known environment URNs.
pub mod urns {
	pub const DOCKER: &str = "sluice:env:docker:v1";
	pub const PROCESS: &str = "sluice:env:process:v1";
	pub const EXTERNAL: &str = "sluice:env:external:v1";
	pub const EMBEDDED: &str = "sluice:env:embedded:v1";
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Environment {
	pub urn: String,
	pub payload: Vec<u8>,
}

/// Payload of a container-backed environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerPayload {
	pub container_image: String,
}

/// Payload of an environment started as a local process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessPayload {
	pub os: String,
	pub arch: String,
	pub command: String,
	pub env: BTreeMap<String, String>,
}

/// Payload of an environment managed outside the runner, reached at `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalPayload {
	pub url: String,
	#[serde(default)]
	pub params: BTreeMap<String, String>,
}

impl Environment {
	pub fn new(urn: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
		Self {
			urn: urn.into(),
			payload: payload.into(),
		}
	}

	pub fn docker(container_image: impl Into<String>) -> Result<Self, WireError> {
		Self::with_json_payload(urns::DOCKER, &DockerPayload {
			container_image: container_image.into(),
		})
	}

	pub fn process(payload: &ProcessPayload) -> Result<Self, WireError> {
		Self::with_json_payload(urns::PROCESS, payload)
	}

	pub fn external(url: impl Into<String>) -> Result<Self, WireError> {
		Self::with_json_payload(urns::EXTERNAL, &ExternalPayload {
			url: url.into(),
			params: BTreeMap::new(),
		})
	}

	/// Environment executed inside the runner itself; `config` is passed through verbatim.
	pub fn embedded(config: impl Into<Vec<u8>>) -> Self {
		Self::new(urns::EMBEDDED, config)
	}

	/// Decodes the JSON payload as `T`.
	pub fn decode_payload<T: DeserializeOwned>(&self) -> Result<T, WireError> {
		Ok(serde_json::from_slice(&self.payload)?)
	}

	fn with_json_payload<T: Serialize>(urn: &str, payload: &T) -> Result<Self, WireError> {
		Ok(Self::new(urn, serde_json::to_vec(payload)?))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn docker_payload_decodes() {
		let env = Environment::docker("registry.local/harness:1").unwrap();
		assert_eq!(env.urn, urns::DOCKER);
		let payload: DockerPayload = env.decode_payload().unwrap();
		assert_eq!(payload.container_image, "registry.local/harness:1");
	}

	#[test]
	fn environments_compare_by_value() {
		assert_eq!(Environment::external("localhost:50000").unwrap(), Environment::external("localhost:50000").unwrap());
		assert_ne!(Environment::embedded("a"), Environment::embedded("b"));
	}
}
