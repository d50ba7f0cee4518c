//! Mode A: request/response per line over HTTP POST.
//!
//! One sequential loop: read a line from standard input, POST the parsed
//! JSON to `{base}/mcp`, write the response body compactly as one flushed
//! line of standard output. Per-line failures (framing or transport) cost
//! exactly the reply for that line; the loop continues. Only local stdio
//! failures end the relay with an error.

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use mcp_relay_core::config::RelayConfig;

use crate::error::{FramingError, RelayError, TransportError};

use super::framing::{bounded_read_line, parse_relay_line, MAX_LINE_BYTES};

/// Fixed path appended to the gateway base URL.
const GATEWAY_PATH: &str = "/mcp";

/// Connect timeout for the HTTP client. Separate from the per-request
/// timeout: connection establishment should fail fast even when tool calls
/// are allowed to run for minutes.
const CONNECT_TIMEOUT_SECS: u64 = 10;

// ─────────────────────────────────────────────────────────────────────────────
// HttpRelay
// ─────────────────────────────────────────────────────────────────────────────

/// The HTTP bridging mode: newline-delimited JSON-RPC in, one POST per line,
/// one response line out per successful request.
pub struct HttpRelay {
    endpoint: String,
    client: reqwest::Client,
    auth_token: Option<String>,
    request_timeout: Duration,
}

impl HttpRelay {
    /// Build a relay for the given gateway base URL.
    ///
    /// Trailing slashes on `base_url` are trimmed before the fixed `/mcp`
    /// path is appended.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Client`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, config: RelayConfig) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(RelayError::Client)?;

        Ok(Self {
            endpoint: endpoint_url(base_url),
            client,
            auth_token: config.auth_token,
            request_timeout: config.request_timeout,
        })
    }

    /// The resolved POST endpoint, e.g. `http://192.168.1.42:8080/mcp`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run the forwarding loop until `reader` reaches end-of-stream.
    ///
    /// Generic over the stdio pair so tests can drive the loop with
    /// in-memory streams; `main` passes `tokio::io::stdin()` / `stdout()`.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Stdio`] when standard input or output fails in
    /// a way the loop cannot recover from. EOF is a clean `Ok(())`.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<(), RelayError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut reader = BufReader::new(reader);
        let mut raw_buf = Vec::new();

        loop {
            raw_buf.clear();

            let bytes_read = match bounded_read_line(&mut reader, &mut raw_buf, MAX_LINE_BYTES)
                .await
            {
                Ok(n) => n,
                Err(FramingError::Io(e)) => return Err(RelayError::Stdio(e)),
                Err(e) => {
                    tracing::warn!(error = %e, kind = e.kind_label(), "skipping unreadable line");
                    continue;
                }
            };

            if bytes_read == 0 {
                tracing::debug!("stdin EOF, relay finished");
                break;
            }

            // Strict UTF-8: lossy conversion would silently corrupt payload
            // content, and invalid bytes cannot be valid JSON anyway.
            let line = match std::str::from_utf8(&raw_buf) {
                Ok(s) => s,
                Err(_) => {
                    let e = FramingError::InvalidUtf8;
                    tracing::warn!(len = raw_buf.len(), kind = e.kind_label(), "{e}, skipping");
                    continue;
                }
            };

            // Blank lines are keepalive noise, not errors.
            if line.trim().is_empty() {
                continue;
            }

            let parsed = match parse_relay_line(line) {
                Ok(p) => p,
                Err(e) => {
                    tracing::warn!(error = %e, kind = e.kind_label(), "skipping malformed line");
                    continue;
                }
            };

            let method = parsed.method_label();
            let id = parsed.id().map(tracing::field::display);

            match self.forward(&parsed.payload).await {
                Ok(response) => {
                    let mut out = serde_json::to_string(&response)
                        .unwrap_or_else(|_| "null".to_string());
                    out.push('\n');
                    writer.write_all(out.as_bytes()).await.map_err(RelayError::Stdio)?;
                    writer.flush().await.map_err(RelayError::Stdio)?;
                    tracing::debug!(method, id, "response forwarded");
                }
                Err(e) => {
                    tracing::warn!(method, id, error = %e, "request failed, no reply forwarded");
                }
            }
        }

        Ok(())
    }

    /// POST one payload to the gateway and decode the JSON response body.
    async fn forward(&self, payload: &serde_json::Value) -> Result<serde_json::Value, TransportError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .timeout(self.request_timeout)
            .json(payload);

        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(TransportError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status { status });
        }

        response.json().await.map_err(TransportError::Body)
    }
}

/// Join the gateway base URL with the fixed POST path.
fn endpoint_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), GATEWAY_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_plain() {
        assert_eq!(
            endpoint_url("http://192.168.1.42:8080"),
            "http://192.168.1.42:8080/mcp"
        );
    }

    #[test]
    fn test_endpoint_url_trailing_slash() {
        assert_eq!(endpoint_url("http://h:1"), "http://h:1/mcp");
        assert_eq!(endpoint_url("http://h:1/"), "http://h:1/mcp");
        assert_eq!(endpoint_url("http://h:1//"), "http://h:1/mcp");
    }

    #[test]
    fn test_relay_resolves_endpoint() {
        let relay = HttpRelay::new("http://127.0.0.1:9999/", RelayConfig::default()).unwrap();
        assert_eq!(relay.endpoint(), "http://127.0.0.1:9999/mcp");
    }
}
