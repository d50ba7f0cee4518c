//! mcp-relay: stdio-to-network bridge for MCP clients.
//!
//! Desktop MCP clients spawn a subprocess and speak newline-delimited
//! JSON-RPC over its stdin/stdout. This binary is that subprocess, bridging
//! the stdio pair to a remote gateway in one of two modes:
//!
//! - `mcp-relay http <URL>`: each stdin line is POSTed to `{URL}/mcp` and
//!   the JSON response comes back as one stdout line. Strictly one reply per
//!   request: server-initiated messages and streaming responses are not
//!   forwarded in this mode.
//! - `mcp-relay tcp <HOST> <PORT>`: a raw byte pipe in both directions over
//!   a single TCP connection, no framing imposed.
//!
//! Stdout carries protocol data only; all diagnostics go to stderr.

pub mod cli;
pub mod error;
pub mod relay;
