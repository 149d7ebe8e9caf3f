//! Shared library for the Parlor chat platform.
//!
//! Holds the pieces every process needs: the JSON wire types exchanged
//! between binder, chat server and client, the sortable timestamp encoding,
//! logging setup and shutdown signal handling.

pub mod logger;
pub mod signal;
pub mod time;
pub mod wire;
