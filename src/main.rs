//! Entry point: parses CLI args, builds the initial index, and serves the
//! twelve documentation tools over stdio MCP. Panic hook and SIGPIPE
//! handling mirror the teacher's approach to a client disconnecting
//! mid-response.

use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use rmcp::ServiceExt;
use tracing::info;

use fluentui_docs_mcp::context::ServerContext;
use fluentui_docs_mcp::server::DocsServer;

#[derive(Parser, Debug)]
#[command(name = "fluentui-docs-mcp")]
#[command(about = "MCP server exposing a Fluent UI documentation corpus to AI coding agents")]
#[command(version)]
struct Args {
    /// Root directory of the Markdown documentation corpus to index.
    #[arg(long, default_value = "./docs")]
    docs_root: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Install a panic hook that treats a broken pipe (client disconnect) as a
/// clean exit rather than a crash.
fn install_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        if msg.contains("Broken pipe") || msg.contains("os error 32") {
            eprintln!("[fluentui-docs-mcp] Client disconnected (broken pipe), shutting down");
        } else {
            let location = panic_info
                .location()
                .map(|loc| format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column()))
                .unwrap_or_default();
            eprintln!("[fluentui-docs-mcp] Panic{}: {}", location, msg);
        }

        std::process::exit(1);
    }));
}

#[cfg(unix)]
fn ignore_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_IGN);
    }
}

#[cfg(not(unix))]
fn ignore_sigpipe() {}

async fn run_server() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.parse().unwrap_or_default()),
        )
        .init();

    info!(
        "Starting fluentui-docs-mcp v{}",
        env!("CARGO_PKG_VERSION")
    );

    let ctx = Arc::new(ServerContext::new(args.docs_root)?);
    let server = DocsServer::new(ctx);

    info!("Server ready. Listening on stdio...");

    server
        .serve(rmcp::transport::stdio())
        .await?
        .waiting()
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    ignore_sigpipe();
    install_panic_hook();

    match run_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let err_str = format!("{:?}", e);
            if err_str.contains("Broken pipe") || err_str.contains("os error 32") {
                eprintln!("[fluentui-docs-mcp] Client disconnected, shutting down");
                ExitCode::SUCCESS
            } else {
                eprintln!("[fluentui-docs-mcp] Error: {:#}", e);
                ExitCode::FAILURE
            }
        }
    }
}
