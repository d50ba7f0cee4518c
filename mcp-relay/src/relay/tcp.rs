//! Mode B: raw byte duplex over TCP.
//!
//! A pure byte-pipe. Two pumps run as concurrent tasks: standard input
//! forwards to the socket line by line, the socket forwards to standard
//! output in fixed-size chunks. No framing, acknowledgement, or backpressure
//! beyond what the streams themselves provide; payload bytes are never
//! inspected or modified. Either pump ending (EOF or stream error) shuts the
//! whole relay down.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::error::RelayError;

/// Socket read chunk size.
const CHUNK_BYTES: usize = 4096;

// ─────────────────────────────────────────────────────────────────────────────
// Connection
// ─────────────────────────────────────────────────────────────────────────────

/// Open the single outbound connection.
///
/// # Errors
///
/// Returns [`RelayError::Connect`]; connection failure is fatal, the process
/// exits nonzero without entering the forwarding loops.
pub async fn connect(host: &str, port: u16) -> Result<TcpStream, RelayError> {
    let addr = format!("{host}:{port}");
    match TcpStream::connect((host, port)).await {
        Ok(stream) => {
            tracing::debug!(addr, "connected");
            Ok(stream)
        }
        Err(source) => Err(RelayError::Connect { addr, source }),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pumps
// ─────────────────────────────────────────────────────────────────────────────

/// Inbound pump: read newline-delimited byte lines, forward them verbatim.
///
/// Lines are forwarded exactly as read, trailing newline included; a final
/// line without a newline is still delivered before EOF ends the pump.
/// Returns the total bytes forwarded.
pub async fn pump_lines<R, W>(reader: R, mut writer: W) -> std::io::Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut total = 0u64;

    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf).await?;
        if n == 0 {
            return Ok(total);
        }
        writer.write_all(&buf).await?;
        writer.flush().await?;
        total += n as u64;
    }
}

/// Outbound pump: read fixed-size chunks, forward them verbatim, flushing
/// after every write so the local peer never waits on a buffer.
///
/// Returns the total bytes forwarded; a zero-byte read (peer closed) ends
/// the pump.
pub async fn pump_chunks<R, W>(mut reader: R, mut writer: W) -> std::io::Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut chunk = [0u8; CHUNK_BYTES];
    let mut total = 0u64;

    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Ok(total);
        }
        writer.write_all(&chunk[..n]).await?;
        writer.flush().await?;
        total += n as u64;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Relay Orchestration
// ─────────────────────────────────────────────────────────────────────────────

/// Run both pumps over an established connection until either one ends.
///
/// The stream splits into owned halves, each consumed by exactly one task,
/// so the socket closes exactly once when the halves drop: there is no
/// shared handle to double-close and nothing to leak on any exit path.
///
/// Generic over the stdio pair so tests can drive the relay with in-memory
/// streams; `main` passes `tokio::io::stdin()` / `stdout()`.
pub async fn run_tcp_relay<R, W>(stream: TcpStream, input: R, output: W)
where
    R: AsyncRead + Send + Unpin + 'static,
    W: AsyncWrite + Send + Unpin + 'static,
{
    let (read_half, write_half) = stream.into_split();

    let mut inbound = tokio::spawn(pump_lines(input, write_half));
    let mut outbound = tokio::spawn(pump_chunks(read_half, output));

    // Either direction ending shuts down the whole relay; the straggler is
    // aborted rather than drained (resilience belongs to the supervisor).
    tokio::select! {
        result = &mut inbound => {
            log_pump_end("stdin→socket", result);
            outbound.abort();
        }
        result = &mut outbound => {
            log_pump_end("socket→stdout", result);
            inbound.abort();
        }
    }
}

fn log_pump_end(direction: &str, result: Result<std::io::Result<u64>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(bytes)) => tracing::debug!(direction, bytes, "stream closed"),
        Ok(Err(e)) => tracing::warn!(direction, error = %e, "stream failed, shutting down"),
        Err(e) => tracing::error!(direction, error = %e, "pump task panicked"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pump_lines_verbatim() {
        // Trailing newline kept; final unterminated line still delivered.
        let input: &[u8] = b"one\ntwo\nthree";
        let mut output = Vec::new();

        let total = pump_lines(input, &mut output).await.unwrap();

        assert_eq!(total, 13);
        assert_eq!(&output, b"one\ntwo\nthree");
    }

    #[tokio::test]
    async fn test_pump_lines_empty_input() {
        let input: &[u8] = b"";
        let mut output = Vec::new();

        let total = pump_lines(input, &mut output).await.unwrap();

        assert_eq!(total, 0);
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_pump_chunks_forwards_until_eof() {
        let input: &[u8] = b"hello\n";
        let mut output = Vec::new();

        let total = pump_chunks(input, &mut output).await.unwrap();

        assert_eq!(total, 6);
        assert_eq!(&output, b"hello\n");
    }

    #[tokio::test]
    async fn test_pump_chunks_larger_than_chunk_size() {
        // Payload spanning multiple 4096-byte reads arrives intact and ordered.
        let payload: Vec<u8> = (0..3 * CHUNK_BYTES + 17).map(|i| (i % 251) as u8).collect();
        let mut output = Vec::new();

        let total = pump_chunks(payload.as_slice(), &mut output).await.unwrap();

        assert_eq!(total, payload.len() as u64);
        assert_eq!(output, payload);
    }

    #[tokio::test]
    async fn test_pump_chunks_no_payload_inspection() {
        // Arbitrary non-UTF-8 bytes pass through unmodified.
        let payload = [0u8, 159, 146, 150, b'\n', 0xff];
        let mut output = Vec::new();

        pump_chunks(&payload[..], &mut output).await.unwrap();

        assert_eq!(output, payload);
    }
}
