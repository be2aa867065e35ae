//! Name collision policy.

/// Returns `base` if it is free, otherwise the first free `base1`, `base2`, ….
///
/// `taken` reports whether a candidate is already in use. Candidates are tried
/// in increasing suffix order, so the result depends only on which names are
/// taken, never on the order they were taken in.
pub fn uniquify(base: &str, mut taken: impl FnMut(&str) -> bool) -> String {
	if !taken(base) {
		return base.to_owned();
	}
	let mut suffix: u64 = 1;
	loop {
		let candidate = format!("{base}{suffix}");
		if !taken(&candidate) {
			tracing::trace!(base, id = %candidate, "uniquified colliding name");
			return candidate;
		}
		suffix += 1;
	}
}
