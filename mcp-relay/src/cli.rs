//! CLI argument types for the two bridging modes.
//!
//! Defined apart from `main.rs` so integration tests can exercise parsing
//! directly. The surface is deliberately frozen to positionals: desktop
//! clients template these command lines into their MCP server config, and
//! flags would just be one more thing for them to get wrong. Everything
//! tunable comes from the environment instead.

use clap::Args;

/// Arguments for `mcp-relay http`.
#[derive(Args, Debug)]
pub struct HttpArgs {
    /// Base URL of the remote MCP gateway (e.g. http://192.168.1.42:8080).
    pub url: String,
}

/// Arguments for `mcp-relay tcp`.
#[derive(Args, Debug)]
pub struct TcpArgs {
    /// Gateway host to connect to.
    pub host: String,

    /// Gateway TCP port.
    pub port: u16,
}
