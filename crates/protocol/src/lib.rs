//! Wire and state types for the script runner coordinator.
//!
//! This crate contains the serde-serializable types shared between the
//! coordinator core and its host driver: session and overlay states, display
//! geometry, the permission token and the inbound signal envelope.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond small predicates and serialization
//! * Host-facing: Signals match the JSON-line format the driver feeds in
//! * Stable: Changes only when the host contract changes
//!
//! Behavior (pause protocol, overlay decisions, token gating) lives in `runner-rs`.

pub mod display;
pub mod session;
pub mod signal;
pub mod status;
pub mod token;

pub use display::*;
pub use session::*;
pub use signal::*;
pub use status::*;
pub use token::*;
