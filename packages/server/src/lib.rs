//! Chat server library for the Parlor platform.
//!
//! The server owns all chat state in memory: the user directory, the room
//! store with per-room message logs, and the reaper that evicts idle empty
//! rooms. Its HTTP facade is discovered through the binder, with which every
//! procedure name is registered at startup.

pub mod binder;
pub mod domain;
pub mod error;
pub mod reaper;
pub mod store;
pub mod ui;
