//! Binder service for the Parlor chat platform.
//!
//! The binder is a process-lifetime catalog mapping procedure names to the
//! network address of the chat server that hosts them. Servers register
//! themselves at startup; clients look up any one procedure name once, at
//! discovery time, and talk to the resolved address directly afterwards.

pub mod registry;
pub mod server;
