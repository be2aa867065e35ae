//! Pipeline options consumed when bootstrapping a registry.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Options controlling how a pipeline is translated.
///
/// Loaded from TOML; every field is optional:
///
/// ```toml
/// job-name = "wordcount"
/// default-environment-type = "PROCESS"
/// default-environment-config = '{ "command": "/opt/harness/boot" }'
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PipelineOptions {
	pub job_name: Option<String>,
	/// Environment type handed to the [`EnvironmentResolver`](crate::EnvironmentResolver).
	pub default_environment_type: Option<String>,
	/// Type-specific environment config, e.g. a container image.
	pub default_environment_config: Option<String>,
}

/// Errors loading [`PipelineOptions`].
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
	#[error("failed to read options from {path}: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid options: {0}")]
	Parse(#[from] toml::de::Error),
}

impl PipelineOptions {
	pub fn from_toml_str(content: &str) -> Result<Self, OptionsError> {
		Ok(toml::from_str(content)?)
	}

	/// Reads and parses an options file.
	pub fn load(path: &Path) -> Result<Self, OptionsError> {
		let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&content)
	}

	pub fn with_job_name(mut self, job_name: impl Into<String>) -> Self {
		self.job_name = Some(job_name.into());
		self
	}

	pub fn with_default_environment(mut self, environment_type: impl Into<String>, config: Option<String>) -> Self {
		self.default_environment_type = Some(environment_type.into());
		self.default_environment_config = config;
		self
	}
}
