//! Chat client library for the Parlor platform.
//!
//! The client resolves the chat server's address through the binder exactly
//! once, then issues every call directly to the resolved address and polls
//! for new messages at its own cadence.

pub mod api;
pub mod error;
pub mod session;
