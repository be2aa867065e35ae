use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::coder::Coder;
use crate::window::WindowingStrategy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Boundedness {
	#[default]
	Bounded,
	Unbounded,
}

/// A named collection of values flowing between transforms.
///
/// Collections have no value equality; each allocation is a distinct
/// collection, even when two share a name.
#[derive(Debug)]
pub struct Collection {
	name: String,
	coder: Arc<Coder>,
	windowing_strategy: Arc<WindowingStrategy>,
	boundedness: Boundedness,
}

impl Collection {
	/// Creates a bounded, globally windowed collection.
	pub fn new(name: impl Into<String>, coder: Arc<Coder>) -> Self {
		Self {
			name: name.into(),
			coder,
			windowing_strategy: Arc::new(WindowingStrategy::globally_windowed()),
			boundedness: Boundedness::Bounded,
		}
	}

	pub fn with_windowing_strategy(mut self, strategy: Arc<WindowingStrategy>) -> Self {
		self.windowing_strategy = strategy;
		self
	}

	pub fn with_boundedness(mut self, boundedness: Boundedness) -> Self {
		self.boundedness = boundedness;
		self
	}

	/// Returns the declared name, used as the base of the collection's id.
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn coder(&self) -> &Arc<Coder> {
		&self.coder
	}

	pub fn windowing_strategy(&self) -> &Arc<WindowingStrategy> {
		&self.windowing_strategy
	}

	pub fn boundedness(&self) -> Boundedness {
		self.boundedness
	}
}
