//! HTTP surface of the chat server.

pub mod handler;
pub mod server;
pub mod state;
