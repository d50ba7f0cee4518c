//! mcp-relay-core: transport-agnostic building blocks for the relay.
//!
//! This library carries the pieces of the bridge that don't touch a socket:
//! JSON-RPC 2.0 message classification (used for structured diagnostics on
//! the HTTP path) and environment-sourced configuration. The binary crate
//! (`mcp-relay`) owns the actual I/O loops.

pub mod config;
pub mod jsonrpc;

pub use config::RelayConfig;
pub use jsonrpc::{JsonRpcId, JsonRpcMessageKind};
