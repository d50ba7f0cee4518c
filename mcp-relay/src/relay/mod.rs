//! The two bridging modes and their shared line framing.
//!
//! [`http`] is the request/response mode: one POST per stdin line, one
//! stdout line per successful response. [`tcp`] is the raw duplex mode: two
//! pumps moving bytes in both directions over a single connection. Both are
//! generic over their stdio streams so integration tests can drive them
//! without a child process.

pub mod framing;
pub mod http;
pub mod tcp;

pub use http::HttpRelay;
pub use tcp::{connect, run_tcp_relay};
