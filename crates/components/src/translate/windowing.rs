use std::sync::Arc;

use sluice_model::{WindowingStrategy, WindowingStrategyProto};

use super::{StandardTranslator, WindowingStrategyTranslator};
use crate::error::Result;
use crate::registry::ComponentRegistry;

impl WindowingStrategyTranslator for StandardTranslator {
	fn translate(
		&self,
		strategy: &Arc<WindowingStrategy>,
		registry: &mut ComponentRegistry,
	) -> Result<WindowingStrategyProto> {
		let window_fn = strategy.window_fn();
		let window_coder_id = registry.register_coder(&window_fn.window_coder())?;
		// Custom window fns run inside the SDK harness.
		let environment_id = if window_fn.is_custom() {
			Some(registry.only_environment_id()?.to_owned())
		} else {
			None
		};
		Ok(WindowingStrategyProto {
			window_fn: window_fn.to_spec()?,
			merge_status: window_fn.merge_status(),
			window_coder_id,
			accumulation_mode: strategy.accumulation_mode(),
			allowed_lateness_ms: u64::try_from(strategy.allowed_lateness().as_millis()).unwrap_or(u64::MAX),
			closing_behavior: strategy.closing_behavior(),
			timestamp_combiner: strategy.timestamp_combiner(),
			environment_id,
		})
	}
}
