//! Encoding helpers shared by the flat representation and entity payloads.
//!
//! Two encodings are supported: JSON for human-inspectable interchange and
//! postcard for compact binary transport. Both are driven by the same serde
//! derives, so a [`Components`](crate::Components) value round-trips through
//! either one.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Errors produced while encoding or decoding wire payloads.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
	/// JSON encoding or decoding failed.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Binary encoding or decoding failed.
	#[error("postcard: {0}")]
	Postcard(#[from] postcard::Error),
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, WireError> {
	Ok(serde_json::to_string_pretty(value)?)
}

pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, WireError> {
	Ok(serde_json::from_str(json)?)
}

/// Encodes `value` with postcard.
pub fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, WireError> {
	Ok(postcard::to_stdvec(value)?)
}

/// Decodes a postcard-encoded `T`.
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, WireError> {
	Ok(postcard::from_bytes(bytes)?)
}
