//! Line framing for the HTTP relay path.
//!
//! Pure parsing plus one bounded async read helper. The forwarding loop in
//! [`super::http`] calls [`bounded_read_line`] for each line of standard
//! input and [`parse_relay_line`] on the decoded text. Parsing validates
//! JSON syntax only: the relay forwards whatever parses, and JSON-RPC
//! classification is best-effort input to diagnostics, never a gate.

use mcp_relay_core::jsonrpc::{JsonRpcId, JsonRpcMessageKind};

use crate::error::FramingError;

/// Maximum input line size (10 MB).
///
/// Lines exceeding this limit are rejected during the read, before JSON
/// parsing, to prevent allocation of oversized `serde_json::Value` trees
/// from a peer that never sends a newline.
pub const MAX_LINE_BYTES: usize = 10 * 1024 * 1024;

// ─────────────────────────────────────────────────────────────────────────────
// Parsed Line
// ─────────────────────────────────────────────────────────────────────────────

/// One parsed line of standard input, ready to forward.
#[derive(Debug, Clone)]
pub struct RelayLine {
    /// The parsed JSON payload. This is what gets POSTed to the gateway.
    pub payload: serde_json::Value,
    /// Best-effort JSON-RPC classification, for diagnostics only. `None`
    /// when the payload is valid JSON but not a classifiable JSON-RPC 2.0
    /// envelope (batch arrays, missing version field, exotic ids).
    pub kind: Option<JsonRpcMessageKind>,
}

impl RelayLine {
    /// Method name for diagnostics; `"unclassified"` when the payload is
    /// not a recognizable JSON-RPC envelope.
    pub fn method_label(&self) -> &str {
        self.kind
            .as_ref()
            .map(JsonRpcMessageKind::method_label)
            .unwrap_or("unclassified")
    }

    /// Correlation id, when the payload carries one.
    pub fn id(&self) -> Option<&JsonRpcId> {
        self.kind.as_ref().and_then(JsonRpcMessageKind::id)
    }
}

/// Parse a single input line into a [`RelayLine`].
///
/// Performs size validation and JSON parsing, then classifies the value as
/// JSON-RPC if it fits the 2.0 envelope. Classification failure is not an
/// error: anything that parses as JSON gets forwarded, the relay is a pipe,
/// not a validator.
///
/// # Errors
///
/// Returns [`FramingError::MessageTooLarge`] for oversized lines and
/// [`FramingError::MalformedJson`] for anything `serde_json` rejects
/// (including empty lines, which callers normally skip before parsing).
pub fn parse_relay_line(line: &str) -> Result<RelayLine, FramingError> {
    if line.len() > MAX_LINE_BYTES {
        return Err(FramingError::MessageTooLarge {
            max_bytes: MAX_LINE_BYTES,
        });
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(FramingError::MalformedJson {
            reason: "empty line".to_string(),
        });
    }

    let payload: serde_json::Value =
        serde_json::from_str(trimmed).map_err(|e| FramingError::MalformedJson {
            reason: e.to_string(),
        })?;

    let kind = JsonRpcMessageKind::classify(&payload);

    Ok(RelayLine { payload, kind })
}

// ─────────────────────────────────────────────────────────────────────────────
// Bounded Line Reading
// ─────────────────────────────────────────────────────────────────────────────

/// Read one newline-terminated line into `buf`, capped at `max_bytes`.
///
/// `read_until` would happily buffer forever against a peer that never sends
/// a newline, so this walks the `AsyncBufRead` buffer directly and gives up
/// once the line outgrows the cap. An oversized line is discarded through its
/// terminating newline, leaving the reader positioned on the next line.
///
/// Bytes accumulate raw so multi-byte UTF-8 sequences straddling internal
/// buffer boundaries survive intact; the caller converts to `str` once the
/// full line is assembled.
///
/// Returns the number of bytes appended to `buf`: 0 means EOF, and a final
/// line with no trailing newline is returned as-is.
pub async fn bounded_read_line<R: tokio::io::AsyncBufRead + Unpin>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    max_bytes: usize,
) -> Result<usize, FramingError> {
    use tokio::io::AsyncBufReadExt;

    let start = buf.len();
    loop {
        let chunk = reader.fill_buf().await.map_err(FramingError::Io)?;
        if chunk.is_empty() {
            return Ok(buf.len() - start);
        }

        let newline = chunk.iter().position(|&b| b == b'\n');
        let take = newline.map_or(chunk.len(), |pos| pos + 1);

        if buf.len() - start + take > max_bytes {
            reader.consume(take);
            if newline.is_none() {
                discard_rest_of_line(reader).await;
            }
            return Err(FramingError::MessageTooLarge { max_bytes });
        }

        buf.extend_from_slice(&chunk[..take]);
        reader.consume(take);
        if newline.is_some() {
            return Ok(buf.len() - start);
        }
    }
}

/// Throw away input until the end of the current line (or EOF).
///
/// Runs against a deadline so a stalled peer cannot wedge the relay inside
/// error recovery; if the deadline passes, whatever tail remains will surface
/// as a malformed line on the next read, which the loop already tolerates.
async fn discard_rest_of_line<R: tokio::io::AsyncBufRead + Unpin>(reader: &mut R) {
    use tokio::io::AsyncBufReadExt;

    let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(30);

    loop {
        let chunk = match tokio::time::timeout_at(deadline, reader.fill_buf()).await {
            Err(_) => {
                tracing::warn!("oversized line still unterminated after 30s, giving up");
                return;
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "read failed while discarding oversized line");
                return;
            }
            Ok(Ok(chunk)) => chunk,
        };
        if chunk.is_empty() {
            return;
        }

        match chunk.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                reader.consume(pos + 1);
                return;
            }
            None => {
                let len = chunk.len();
                reader.consume(len);
            }
        }
    }
}
