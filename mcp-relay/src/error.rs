//! Error types for the relay.
//!
//! The taxonomy is deliberately closed so tests can assert on failure kind:
//! `FramingError` covers per-line input problems (recovered, line skipped),
//! `TransportError` covers per-request remote failures (recovered, no output
//! line), and `RelayError` covers the fatal cases that end the process.

// ─────────────────────────────────────────────────────────────────────────────
// Framing Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors raised while reading and parsing one line of standard input.
///
/// All variants except `Io` are local to the offending line: the relay logs
/// a diagnostic and moves on to the next line.
#[derive(Debug, thiserror::Error)]
pub enum FramingError {
    /// A single input line exceeds the maximum size.
    ///
    /// Checked during the read, before any JSON parsing, so a peer that never
    /// sends a newline cannot force unbounded allocation.
    #[error("line exceeds maximum size of {max_bytes} bytes")]
    MessageTooLarge {
        /// The configured maximum line size in bytes.
        max_bytes: usize,
    },

    /// The line is not valid JSON.
    #[error("malformed JSON: {reason}")]
    MalformedJson {
        /// Human-readable description of the parse failure.
        reason: String,
    },

    /// The line is not valid UTF-8 and therefore cannot be valid JSON.
    #[error("line is not valid UTF-8")]
    InvalidUtf8,

    /// An underlying I/O error occurred while reading standard input.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FramingError {
    /// Stable label for diagnostics, one per variant.
    pub fn kind_label(&self) -> &'static str {
        match self {
            FramingError::MessageTooLarge { .. } => "message_too_large",
            FramingError::MalformedJson { .. } => "malformed_json",
            FramingError::InvalidUtf8 => "invalid_utf8",
            FramingError::Io(_) => "io_error",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transport Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Per-request failures on the HTTP path.
///
/// Each one costs exactly the reply for the line that triggered it; the
/// forwarding loop continues with the next line.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or timed out in flight.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The gateway answered with a non-success status.
    #[error("gateway returned {status}")]
    Status { status: reqwest::StatusCode },

    /// The response arrived but its body is not valid JSON.
    #[error("invalid response body: {0}")]
    Body(#[source] reqwest::Error),
}

// ─────────────────────────────────────────────────────────────────────────────
// Fatal Relay Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Failures that terminate the relay process.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The initial TCP connection could not be established.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        /// The host:port pair that refused the connection.
        addr: String,
        /// The underlying connect error.
        source: std::io::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Standard input or output failed in a way the loop cannot recover from.
    #[error("stdio failure: {0}")]
    Stdio(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framing_kind_labels() {
        assert_eq!(
            FramingError::MessageTooLarge { max_bytes: 10 }.kind_label(),
            "message_too_large"
        );
        assert_eq!(
            FramingError::MalformedJson {
                reason: "x".to_string()
            }
            .kind_label(),
            "malformed_json"
        );
        assert_eq!(FramingError::InvalidUtf8.kind_label(), "invalid_utf8");
        assert_eq!(
            FramingError::Io(std::io::Error::other("boom")).kind_label(),
            "io_error"
        );
    }

    #[test]
    fn test_connect_error_names_addr() {
        let err = RelayError::Connect {
            addr: "127.0.0.1:1".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::ConnectionRefused),
        };
        assert!(err.to_string().contains("127.0.0.1:1"));
    }
}
