//! Default environment resolution.
//!
//! Maps the `default_environment_type` / `default_environment_config` pair
//! from [`PipelineOptions`](crate::PipelineOptions) to a concrete
//! [`Environment`]. Types are matched case-insensitively; an empty or missing
//! type selects a container environment.

use sluice_model::{Environment, ProcessPayload};

use crate::error::{Error, Result};

pub const ENVIRONMENT_DOCKER: &str = "DOCKER";
pub const ENVIRONMENT_PROCESS: &str = "PROCESS";
pub const ENVIRONMENT_EXTERNAL: &str = "EXTERNAL";
pub const ENVIRONMENT_EMBEDDED: &str = "EMBEDDED";

/// Image used for container environments when no config is given.
pub const DEFAULT_CONTAINER_IMAGE: &str = concat!("sluice/sdk-harness:", env!("CARGO_PKG_VERSION"));

/// Produces an environment from a declared type and an opaque config string.
pub trait EnvironmentResolver {
	fn resolve(&self, environment_type: Option<&str>, environment_config: Option<&str>) -> Result<Environment>;
}

/// Resolver for the built-in environment types.
///
/// | type       | config                                            |
/// |------------|---------------------------------------------------|
/// | `DOCKER`   | container image (defaults to the SDK harness image) |
/// | `PROCESS`  | JSON `{ "os", "arch", "command", "env" }`         |
/// | `EXTERNAL` | endpoint URL of an externally managed worker pool |
/// | `EMBEDDED` | passed through as the payload                     |
#[derive(Debug, Clone)]
pub struct DefaultEnvironmentResolver {
	default_container_image: String,
}

impl DefaultEnvironmentResolver {
	pub fn new() -> Self {
		Self {
			default_container_image: DEFAULT_CONTAINER_IMAGE.to_owned(),
		}
	}

	/// Overrides the image used when a container environment has no config.
	pub fn with_default_container_image(mut self, image: impl Into<String>) -> Self {
		self.default_container_image = image.into();
		self
	}

	fn docker(&self, config: Option<&str>) -> Result<Environment> {
		let image = config.unwrap_or(&self.default_container_image);
		Ok(Environment::docker(image)?)
	}

	fn process(config: Option<&str>) -> Result<Environment> {
		let config = config.ok_or_else(|| invalid(ENVIRONMENT_PROCESS, "a process config is required"))?;
		let payload: ProcessPayload =
			serde_json::from_str(config).map_err(|e| invalid(ENVIRONMENT_PROCESS, e.to_string()))?;
		if payload.command.is_empty() {
			return Err(invalid(ENVIRONMENT_PROCESS, "command must not be empty"));
		}
		Ok(Environment::process(&payload)?)
	}

	fn external(config: Option<&str>) -> Result<Environment> {
		let url = config.ok_or_else(|| invalid(ENVIRONMENT_EXTERNAL, "an endpoint url is required"))?;
		Ok(Environment::external(url)?)
	}
}

impl Default for DefaultEnvironmentResolver {
	fn default() -> Self {
		Self::new()
	}
}

impl EnvironmentResolver for DefaultEnvironmentResolver {
	fn resolve(&self, environment_type: Option<&str>, environment_config: Option<&str>) -> Result<Environment> {
		let config = environment_config.map(str::trim).filter(|c| !c.is_empty());
		let ty = environment_type.map(str::trim).unwrap_or_default();

		let env = if ty.is_empty() || ty.eq_ignore_ascii_case(ENVIRONMENT_DOCKER) {
			self.docker(config)?
		} else if ty.eq_ignore_ascii_case(ENVIRONMENT_PROCESS) {
			Self::process(config)?
		} else if ty.eq_ignore_ascii_case(ENVIRONMENT_EXTERNAL) {
			Self::external(config)?
		} else if ty.eq_ignore_ascii_case(ENVIRONMENT_EMBEDDED) {
			Environment::embedded(config.unwrap_or_default())
		} else {
			return Err(Error::UnknownEnvironmentType(ty.to_owned()));
		};

		tracing::debug!(environment_type = ty, urn = %env.urn, "resolved default environment");
		Ok(env)
	}
}

fn invalid(environment_type: &'static str, reason: impl Into<String>) -> Error {
	Error::InvalidEnvironmentConfig {
		environment_type,
		reason: reason.into(),
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use sluice_model::environment::urns;
	use sluice_model::{DockerPayload, ExternalPayload};

	use super::*;

	#[test]
	fn missing_type_resolves_to_default_container() {
		let env = DefaultEnvironmentResolver::new().resolve(None, None).unwrap();
		assert_eq!(env.urn, urns::DOCKER);
		let payload: DockerPayload = env.decode_payload().unwrap();
		assert_eq!(payload.container_image, DEFAULT_CONTAINER_IMAGE);
	}

	#[test]
	fn docker_config_names_the_image() {
		let resolver = DefaultEnvironmentResolver::new().with_default_container_image("unused");
		let env = resolver.resolve(Some("docker"), Some("registry.local/harness:2")).unwrap();
		let payload: DockerPayload = env.decode_payload().unwrap();
		assert_eq!(payload.container_image, "registry.local/harness:2");
	}

	#[test]
	fn process_config_is_json() {
		let config = r#"{ "os": "linux", "arch": "amd64", "command": "/opt/harness/boot", "env": { "RUST_LOG": "debug" } }"#;
		let env = DefaultEnvironmentResolver::new()
			.resolve(Some("PROCESS"), Some(config))
			.unwrap();
		assert_eq!(env.urn, urns::PROCESS);
		let payload: ProcessPayload = env.decode_payload().unwrap();
		assert_eq!(payload.command, "/opt/harness/boot");
		assert_eq!(payload.env.get("RUST_LOG").map(String::as_str), Some("debug"));
	}

	#[test]
	fn process_without_command_is_rejected() {
		let err = DefaultEnvironmentResolver::new()
			.resolve(Some("PROCESS"), Some(r#"{ "os": "linux" }"#))
			.unwrap_err();
		assert!(matches!(err, Error::InvalidEnvironmentConfig { environment_type: "PROCESS", .. }));
	}

	#[test]
	fn external_requires_url() {
		let resolver = DefaultEnvironmentResolver::new();
		let env = resolver.resolve(Some("EXTERNAL"), Some("localhost:50000")).unwrap();
		let payload: ExternalPayload = env.decode_payload().unwrap();
		assert_eq!(payload.url, "localhost:50000");

		assert!(matches!(
			resolver.resolve(Some("EXTERNAL"), Some("  ")),
			Err(Error::InvalidEnvironmentConfig { environment_type: "EXTERNAL", .. })
		));
	}

	#[test]
	fn embedded_passes_config_through() {
		let env = DefaultEnvironmentResolver::new().resolve(Some("embedded"), Some("opts")).unwrap();
		assert_eq!(env, Environment::embedded("opts"));
	}

	#[test]
	fn unknown_type_is_an_error() {
		let err = DefaultEnvironmentResolver::new().resolve(Some("LAMBDA"), None).unwrap_err();
		assert!(matches!(err, Error::UnknownEnvironmentType(ty) if ty == "LAMBDA"));
	}
}
