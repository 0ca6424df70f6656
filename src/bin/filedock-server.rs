//! In-memory file store for development and integration tests.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use clap::Parser;
use tokio::sync::RwLock;

#[path = "filedock_server/handlers_files.rs"]
mod handlers_files;
use self::handlers_files::*;
#[path = "filedock_server/http_error.rs"]
mod http_error;
use self::http_error::*;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
struct FileMeta {
    id: String,
    name: String,
    size: u64,
    last_modified: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,

    created_at: String,
}

struct StoredFile {
    meta: FileMeta,
    bytes: Vec<u8>,
}

#[derive(Clone)]
struct AppState {
    // Insertion order is the listing order.
    files: Arc<RwLock<Vec<StoredFile>>>,
}

fn new_file_id() -> Result<String> {
    let mut raw = [0u8; 16];
    getrandom::getrandom(&mut raw).context("generate file id")?;
    Ok(raw.iter().map(|b| format!("{:02x}", b)).collect())
}

fn now_ts() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

#[derive(Parser)]
#[command(name = "filedock-server")]
#[command(about = "In-memory file store (development)", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let state = AppState {
        files: Arc::new(RwLock::new(Vec::new())),
    };

    let app = Router::new()
        .route("/health", get(health))
        .route("/files", get(list_files))
        .route("/upload", post(upload_file))
        .route(
            "/files/:id",
            get(get_file).put(rename_file).delete(delete_file),
        )
        .route("/files/:id/content", get(download_file))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    eprintln!("filedock-server listening on {}", local_addr);

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
