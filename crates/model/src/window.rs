//! Windowing functions and strategies.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::coder::Coder;
use crate::components::FunctionSpec;
use crate::wire::{self, WireError};

/// Well-known window fn URNs.
pub mod urns {
	pub const GLOBAL_WINDOWS: &str = "sluice:window_fn:global_windows:v1";
	pub const FIXED_WINDOWS: &str = "sluice:window_fn:fixed_windows:v1";
	pub const SLIDING_WINDOWS: &str = "sluice:window_fn:sliding_windows:v1";
	pub const SESSION_WINDOWS: &str = "sluice:window_fn:session_windows:v1";
	pub const CUSTOM: &str = "sluice:window_fn:custom:v1";
}

/// Assigns elements to windows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WindowFn {
	/// Every element lands in the single global window.
	Global,
	Fixed {
		size: Duration,
		offset: Duration,
	},
	Sliding {
		size: Duration,
		period: Duration,
		offset: Duration,
	},
	/// Merging windows separated by at least `gap` of inactivity.
	Sessions {
		gap: Duration,
	},
	/// Window fn implemented by SDK code. Requires an SDK environment to run.
	Custom {
		type_name: String,
		payload: Vec<u8>,
		window_coder: Arc<Coder>,
		merging: bool,
	},
}

impl WindowFn {
	/// Returns the simple name of the window fn kind.
	pub fn kind_name(&self) -> &str {
		match self {
			Self::Global => "GlobalWindows",
			Self::Fixed { .. } => "FixedWindows",
			Self::Sliding { .. } => "SlidingWindows",
			Self::Sessions { .. } => "Sessions",
			Self::Custom { type_name, .. } => type_name,
		}
	}

	pub fn urn(&self) -> &'static str {
		match self {
			Self::Global => urns::GLOBAL_WINDOWS,
			Self::Fixed { .. } => urns::FIXED_WINDOWS,
			Self::Sliding { .. } => urns::SLIDING_WINDOWS,
			Self::Sessions { .. } => urns::SESSION_WINDOWS,
			Self::Custom { .. } => urns::CUSTOM,
		}
	}

	/// Returns the coder for the windows this fn produces.
	pub fn window_coder(&self) -> Arc<Coder> {
		match self {
			Self::Global => Coder::global_window(),
			Self::Fixed { .. } | Self::Sliding { .. } | Self::Sessions { .. } => Coder::interval_window(),
			Self::Custom { window_coder, .. } => Arc::clone(window_coder),
		}
	}

	pub fn merge_status(&self) -> MergeStatus {
		match self {
			Self::Sessions { .. } | Self::Custom { merging: true, .. } => MergeStatus::NeedsMerge,
			_ => MergeStatus::NonMerging,
		}
	}

	/// Returns true if this fn can only be executed by SDK code.
	pub fn is_custom(&self) -> bool {
		matches!(self, Self::Custom { .. })
	}

	/// Serializes the window fn parameters into a [`FunctionSpec`].
	///
	/// Durations are encoded as whole milliseconds.
	pub fn to_spec(&self) -> Result<FunctionSpec, WireError> {
		let payload = match self {
			Self::Global => Vec::new(),
			Self::Fixed { size, offset } => wire::to_bytes(&(millis(size), millis(offset)))?,
			Self::Sliding { size, period, offset } => {
				wire::to_bytes(&(millis(size), millis(period), millis(offset)))?
			}
			Self::Sessions { gap } => wire::to_bytes(&millis(gap))?,
			Self::Custom { payload, .. } => payload.clone(),
		};
		Ok(FunctionSpec::new(self.urn()).with_payload(payload))
	}
}

pub(crate) fn millis(duration: &Duration) -> u64 {
	u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccumulationMode {
	#[default]
	Discarding,
	Accumulating,
}

/// Whether a final pane is emitted when a window closes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClosingBehavior {
	#[default]
	EmitIfNonempty,
	EmitAlways,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimestampCombiner {
	#[default]
	EndOfWindow,
	Earliest,
	Latest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MergeStatus {
	NonMerging,
	NeedsMerge,
}

/// How a collection is windowed and when its panes fire.
///
/// Unlike coders and collections, strategies are plain values: two strategies
/// with equal fields are the same strategy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowingStrategy {
	window_fn: WindowFn,
	accumulation_mode: AccumulationMode,
	allowed_lateness: Duration,
	closing_behavior: ClosingBehavior,
	timestamp_combiner: TimestampCombiner,
}

impl WindowingStrategy {
	/// Simple type name used when composing strategy ids.
	pub const TYPE_NAME: &'static str = "WindowingStrategy";

	pub fn new(window_fn: WindowFn) -> Self {
		Self {
			window_fn,
			accumulation_mode: AccumulationMode::default(),
			allowed_lateness: Duration::ZERO,
			closing_behavior: ClosingBehavior::default(),
			timestamp_combiner: TimestampCombiner::default(),
		}
	}

	/// The default strategy: global windows, discarding panes, no lateness.
	pub fn globally_windowed() -> Self {
		Self::new(WindowFn::Global)
	}

	pub fn with_accumulation_mode(mut self, mode: AccumulationMode) -> Self {
		self.accumulation_mode = mode;
		self
	}

	pub fn with_allowed_lateness(mut self, lateness: Duration) -> Self {
		self.allowed_lateness = lateness;
		self
	}

	pub fn with_closing_behavior(mut self, behavior: ClosingBehavior) -> Self {
		self.closing_behavior = behavior;
		self
	}

	pub fn with_timestamp_combiner(mut self, combiner: TimestampCombiner) -> Self {
		self.timestamp_combiner = combiner;
		self
	}

	pub fn window_fn(&self) -> &WindowFn {
		&self.window_fn
	}

	pub fn accumulation_mode(&self) -> AccumulationMode {
		self.accumulation_mode
	}

	pub fn allowed_lateness(&self) -> Duration {
		self.allowed_lateness
	}

	pub fn closing_behavior(&self) -> ClosingBehavior {
		self.closing_behavior
	}

	pub fn timestamp_combiner(&self) -> TimestampCombiner {
		self.timestamp_combiner
	}

	/// Returns the base name for this strategy's id, e.g. `WindowingStrategy(FixedWindows)`.
	pub fn base_name(&self) -> String {
		format!("{}({})", Self::TYPE_NAME, self.window_fn.kind_name())
	}
}

impl Default for WindowingStrategy {
	fn default() -> Self {
		Self::globally_windowed()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn base_name_composes_window_fn_kind() {
		let fixed = WindowingStrategy::new(WindowFn::Fixed {
			size: Duration::from_secs(60),
			offset: Duration::ZERO,
		});
		assert_eq!(fixed.base_name(), "WindowingStrategy(FixedWindows)");
		assert_eq!(WindowingStrategy::globally_windowed().base_name(), "WindowingStrategy(GlobalWindows)");
	}

	#[test]
	fn sessions_need_merging() {
		let sessions = WindowFn::Sessions { gap: Duration::from_secs(30) };
		assert_eq!(sessions.merge_status(), MergeStatus::NeedsMerge);
		assert_eq!(WindowFn::Global.merge_status(), MergeStatus::NonMerging);
	}

	#[test]
	fn spec_encodes_durations_as_millis() {
		let fixed = WindowFn::Fixed {
			size: Duration::from_secs(2),
			offset: Duration::from_millis(5),
		};
		let spec = fixed.to_spec().unwrap();
		assert_eq!(spec.urn, urns::FIXED_WINDOWS);
		let (size, offset): (u64, u64) = wire::from_bytes(&spec.payload).unwrap();
		assert_eq!((size, offset), (2000, 5));
	}

	#[test]
	fn strategies_compare_by_value() {
		let a = WindowingStrategy::globally_windowed().with_allowed_lateness(Duration::from_secs(1));
		let b = WindowingStrategy::globally_windowed().with_allowed_lateness(Duration::from_secs(1));
		assert_eq!(a, b);
		assert_ne!(a, WindowingStrategy::globally_windowed());
	}
}
