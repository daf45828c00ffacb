//! Capture-permission token gating.

use runner_protocol::PermissionToken;
use tracing::{debug, info};

/// Single-slot holder for the capture-permission token.
///
/// Only the owning [`PermissionTokenGate`] writes to it. A stored token is
/// kept until [`TokenStore::clear`]; later tokens do not overwrite it.
#[derive(Debug, Default)]
pub struct TokenStore {
	slot: Option<PermissionToken>,
}

impl TokenStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `token` if the slot is empty. Returns `false` if occupied.
	pub fn set(&mut self, token: PermissionToken) -> bool {
		if self.slot.is_some() {
			return false;
		}
		self.slot = Some(token);
		true
	}

	pub fn clear(&mut self) -> Option<PermissionToken> {
		self.slot.take()
	}

	pub fn is_present(&self) -> bool {
		self.slot.is_some()
	}
}

/// What the coordinator should do once initialization consults the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitDecision {
	/// Prepare capture resources and show the overlay now.
	PrepareNow,
	/// Defer both until a token arrives.
	AwaitToken,
}

/// Tracks whether a token was requested or obtained, and whether capture
/// resources were prepared from it.
#[derive(Debug, Default)]
pub struct PermissionTokenGate {
	store: TokenStore,
	token_request_pending: bool,
	resources_prepared: bool,
}

impl PermissionTokenGate {
	pub fn new() -> Self {
		Self::default()
	}

	/// Places a token in the slot ahead of initialization.
	pub fn seed(&mut self, token: PermissionToken) -> bool {
		self.store.set(token)
	}

	pub fn on_init(&mut self, wants_token: bool, has_token: bool) -> InitDecision {
		if wants_token && !has_token {
			self.token_request_pending = true;
			info!(target = "runner.token", "capture token requested; deferring overlay and capture");
			InitDecision::AwaitToken
		} else {
			self.token_request_pending = false;
			InitDecision::PrepareNow
		}
	}

	/// Records a received token. Returns `true` when capture resources still
	/// need to be prepared.
	pub fn on_token_received(&mut self, token: PermissionToken) -> bool {
		if !self.store.set(token) {
			debug!(target = "runner.token", "token already present; keeping the first one");
		}
		self.token_request_pending = false;
		!self.resources_prepared
	}

	pub fn mark_prepared(&mut self) {
		self.resources_prepared = true;
	}

	/// Clears the token slot and all flags. Returns `true` if resources had been prepared.
	pub fn reset(&mut self) -> bool {
		let had_token = self.store.clear().is_some();
		let was_prepared = std::mem::take(&mut self.resources_prepared);
		self.token_request_pending = false;
		debug!(target = "runner.token", had_token, was_prepared, "token gate reset");
		was_prepared
	}

	pub fn token_present(&self) -> bool {
		self.store.is_present()
	}

	pub fn token_request_pending(&self) -> bool {
		self.token_request_pending
	}

	pub fn resources_prepared(&self) -> bool {
		self.resources_prepared
	}

	/// The overlay stays hidden while a requested token is outstanding.
	pub fn overlay_suppressed(&self) -> bool {
		self.token_request_pending
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn store_keeps_first_token_until_cleared() {
		let mut store = TokenStore::new();
		assert!(store.set(PermissionToken::new("first")));
		assert!(!store.set(PermissionToken::new("second")));
		assert_eq!(store.clear().as_ref().map(PermissionToken::as_str), Some("first"));

		assert!(store.set(PermissionToken::new("second")));
	}

	#[test]
	fn init_waits_only_when_token_wanted_and_missing() {
		let mut gate = PermissionTokenGate::new();
		assert_eq!(gate.on_init(true, false), InitDecision::AwaitToken);
		assert!(gate.token_request_pending());
		assert!(gate.overlay_suppressed());

		let mut gate = PermissionTokenGate::new();
		assert_eq!(gate.on_init(true, true), InitDecision::PrepareNow);
		assert_eq!(gate.on_init(false, false), InitDecision::PrepareNow);
		assert!(!gate.overlay_suppressed());
	}

	#[test]
	fn second_token_does_not_prepare_again() {
		let mut gate = PermissionTokenGate::new();
		gate.on_init(true, false);

		assert!(gate.on_token_received(PermissionToken::new("a")));
		gate.mark_prepared();
		assert!(!gate.token_request_pending());
		assert!(!gate.on_token_received(PermissionToken::new("b")));
		assert!(gate.token_present());
	}

	#[test]
	fn reset_clears_everything() {
		let mut gate = PermissionTokenGate::new();
		gate.on_init(true, false);
		gate.on_token_received(PermissionToken::new("a"));
		gate.mark_prepared();

		assert!(gate.reset());
		assert!(!gate.token_present());
		assert!(!gate.resources_prepared());
		assert!(!gate.reset());
	}

	#[test]
	fn seeded_token_counts_as_present() {
		let mut gate = PermissionTokenGate::new();
		assert!(gate.seed(PermissionToken::new("granted-earlier")));
		let present = gate.token_present();
		assert_eq!(gate.on_init(true, present), InitDecision::PrepareNow);
	}
}
