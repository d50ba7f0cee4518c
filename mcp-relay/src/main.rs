//! mcp-relay CLI entry point.
//!
//! Dispatches to the `http` (request/response per line) or `tcp` (raw byte
//! duplex) bridging mode. Exit code 0 means clean shutdown: end-of-input,
//! peer close, or interrupt. Nonzero means the relay never got started.

use clap::{Parser, Subcommand};

use mcp_relay::cli::{HttpArgs, TcpArgs};
use mcp_relay::relay::{connect, run_tcp_relay, HttpRelay};
use mcp_relay_core::config::RelayConfig;

// ─────────────────────────────────────────────────────────────────────────────
// CLI Definitions
// ─────────────────────────────────────────────────────────────────────────────

/// mcp-relay: bridge local stdio JSON-RPC to a remote MCP gateway.
#[derive(Parser)]
#[command(name = "mcp-relay", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forward each stdin line as an HTTP POST; print each response line.
    Http(HttpArgs),
    /// Pipe raw bytes both ways over a single TCP connection.
    Tcp(TcpArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Entry Point
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    let code = match cli.command {
        Commands::Http(args) => run_http(args).await,
        Commands::Tcp(args) => run_tcp(args).await,
    };

    std::process::exit(code);
}

/// Run the HTTP bridging mode over the process's real stdio.
async fn run_http(args: HttpArgs) -> i32 {
    let config = RelayConfig::from_env();
    let relay = match HttpRelay::new(&args.url, config) {
        Ok(relay) => relay,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            eprintln!("mcp-relay http: {e}");
            return 1;
        }
    };
    tracing::debug!(endpoint = relay.endpoint(), "forwarding stdin to gateway");

    tokio::select! {
        result = relay.run(tokio::io::stdin(), tokio::io::stdout()) => {
            match result {
                Ok(()) => 0,
                Err(e) => {
                    tracing::error!(error = %e, "relay failed");
                    eprintln!("mcp-relay http: {e}");
                    1
                }
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::debug!("interrupt received, shutting down");
            0
        }
    }
}

/// Run the TCP bridging mode over the process's real stdio.
async fn run_tcp(args: TcpArgs) -> i32 {
    let stream = match connect(&args.host, args.port).await {
        Ok(stream) => stream,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            eprintln!("mcp-relay tcp: {e}");
            return 1;
        }
    };

    tokio::select! {
        _ = run_tcp_relay(stream, tokio::io::stdin(), tokio::io::stdout()) => 0,
        _ = tokio::signal::ctrl_c() => {
            tracing::debug!("interrupt received, shutting down");
            0
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tracing Init
// ─────────────────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber with stderr output.
///
/// `RUST_LOG` controls the filter; the default is `warn` so per-line framing
/// and transport failures reach stderr while the forwarding happy path stays
/// silent. Stdout is never written to: it belongs to the protocol.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
