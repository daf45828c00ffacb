//! Opaque capture-permission token.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One-time capture-permission token handed over by the host.
///
/// The value is opaque to the coordinator; `Debug` redacts it.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionToken(String);

impl PermissionToken {
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for PermissionToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("PermissionToken(<redacted>)")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn debug_output_redacts_value() {
		let token = PermissionToken::new("secret-projection-grant");
		assert!(!format!("{token:?}").contains("secret"));
		assert_eq!(token.as_str(), "secret-projection-grant");
	}
}
