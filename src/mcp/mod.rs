//! Model Context Protocol server implementation.
//!
//! This module contains everything that faces the protocol client:
//!
//! - `types`: JSON-RPC 2.0 message types used on the stdio transport
//! - `server`: the tool registry and request dispatch loop
//! - `context`: the shared plugin context (account resolution state)
//! - `tools`: tool categories, the registration dispatcher, and the
//!   per-category tool registrars

pub mod context;
pub mod server;
pub mod tools;
pub mod types;
