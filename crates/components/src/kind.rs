/// The five kinds of entity a registry tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
	Transform,
	Collection,
	WindowingStrategy,
	Coder,
	Environment,
}

impl ComponentKind {
	pub const ALL: [ComponentKind; 5] = [
		Self::Transform,
		Self::Collection,
		Self::WindowingStrategy,
		Self::Coder,
		Self::Environment,
	];

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Transform => "transform",
			Self::Collection => "collection",
			Self::WindowingStrategy => "windowing strategy",
			Self::Coder => "coder",
			Self::Environment => "environment",
		}
	}
}

impl std::fmt::Display for ComponentKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
