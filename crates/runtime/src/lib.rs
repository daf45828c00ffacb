//! Event-loop primitives for the runner coordinator.
//!
//! The coordinator runs every handler on a single cooperative queue. The
//! only work that leaves the queue is:
//! * a delayed pause, which sleeps on a [`DelayedTask`] and then posts back
//! * user dialogs, which run inside a [`TaskGroup`] and own nothing the
//!   coordinator needs

pub mod tasks;
pub mod timer;

pub use tasks::TaskGroup;
pub use timer::{DelayedTask, TimerSlot};
