use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use filedock::model::{FileId, RemoteConfig};
use filedock::remote::RemoteClient;

#[derive(Parser)]
#[command(name = "filedock")]
#[command(about = "Terminal client for a remote file store", long_about = None)]
struct Cli {
    /// Base URL of the file store (falls back to FILEDOCK_URL)
    #[arg(long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List files
    Ls {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Upload a local file
    Upload { path: PathBuf },

    /// Delete a file by id
    Rm { id: String },

    /// Rename a file
    Rename { id: String, name: String },

    /// Show one file's metadata
    Show {
        id: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Download a file's content
    Get {
        id: String,
        /// Write to this path (defaults to the remote name)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Open the interactive file panel (default)
    Tui,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let base_url = cli
        .url
        .or_else(|| std::env::var("FILEDOCK_URL").ok())
        .context("no base URL (pass --url or set FILEDOCK_URL)")?;
    let remote = RemoteConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
    };

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Ls { json } => {
            let client = RemoteClient::new(remote)?;
            let files = client.list_files()?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&files).context("serialize file list")?
                );
            } else {
                for f in files {
                    println!("{}  {:>12}  {}  {}", f.id, f.size, f.last_modified, f.name);
                }
            }
        }

        Commands::Upload { path } => {
            let client = RemoteClient::new(remote)?;
            let bytes =
                std::fs::read(&path).with_context(|| format!("read {}", path.display()))?;
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .context("path has no file name")?;
            client.upload_file(name, bytes)?;
            println!("Uploaded {}", name);
        }

        Commands::Rm { id } => {
            let client = RemoteClient::new(remote)?;
            client.delete_file(&FileId(id.clone()))?;
            println!("Deleted {}", id);
        }

        Commands::Rename { id, name } => {
            let client = RemoteClient::new(remote)?;
            client.rename_file(&FileId(id.clone()), &name)?;
            println!("Renamed {} to {}", id, name);
        }

        Commands::Show { id, json } => {
            let client = RemoteClient::new(remote)?;
            let record = client.get_file(&FileId(id))?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&record).context("serialize record")?
                );
            } else {
                println!("id: {}", record.id);
                println!("name: {}", record.name);
                println!("size: {}", record.size);
                println!("last_modified: {}", record.last_modified);
                if let Some(ct) = record.content_type {
                    println!("content_type: {}", ct);
                }
            }
        }

        Commands::Get { id, out } => {
            let client = RemoteClient::new(remote)?;
            let id = FileId(id);
            let record = client.get_file(&id)?;
            let bytes = client.download_file(&id)?;
            let out = out.unwrap_or_else(|| PathBuf::from(&record.name));
            std::fs::write(&out, bytes).with_context(|| format!("write {}", out.display()))?;
            println!("Wrote {}", out.display());
        }

        Commands::Tui => {
            filedock::tui_shell::run(remote)?;
        }
    }

    Ok(())
}
