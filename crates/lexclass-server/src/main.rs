use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

use lexclass_core::models::document::DocumentUpload;
use lexclass_server::config::Settings;
use lexclass_server::page::IndexPage;
use lexclass_server::state::AppState;

#[derive(Parser)]
#[command(name = "lexclass", version, about = "Classify legal documents with an LLM")]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the upload form and JSON API.
    Serve {
        #[arg(long, env = "LEXCLASS_BIND", default_value = "127.0.0.1:7860")]
        bind: SocketAddr,

        /// Largest accepted request body, in bytes.
        #[arg(long, env = "LEXCLASS_MAX_UPLOAD_BYTES", default_value_t = 20 * 1024 * 1024)]
        max_upload_bytes: usize,
    },
    /// Classify one PDF and print the result.
    Classify {
        file: PathBuf,

        /// Characteristic to apply (defaults to 1a1).
        #[arg(long, short)]
        characteristic: Option<String>,
    },
    /// List the available characteristics.
    Characteristics,
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    init_tracing(matches!(cli.command, Command::Serve { .. }));
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }

    match cli.command {
        Command::Serve {
            bind,
            max_upload_bytes,
        } => serve(&cli.settings, bind, max_upload_bytes).await,
        Command::Classify {
            file,
            characteristic,
        } => classify(&cli.settings, file, characteristic).await,
        Command::Characteristics => {
            let registry = cli.settings.registry()?;
            println!("{}", registry.information_block());
            Ok(())
        }
    }
}

/// Structured JSON logs for the server, plain text for one-shot commands.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn serve(settings: &Settings, bind: SocketAddr, max_upload_bytes: usize) -> Result<()> {
    let pipeline = settings.pipeline()?;
    let page = IndexPage::new(pipeline.registry()).wrap_err("failed to load page template")?;

    let state = AppState {
        pipeline,
        page: Arc::new(page),
        max_upload_bytes,
    };
    let app = lexclass_server::router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .wrap_err_with(|| format!("failed to bind {bind}"))?;
    tracing::info!(address = %bind, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

async fn classify(settings: &Settings, file: PathBuf, characteristic: Option<String>) -> Result<()> {
    let pipeline = settings.pipeline()?;

    let bytes = tokio::fs::read(&file)
        .await
        .wrap_err_with(|| format!("failed to read {}", file.display()))?;
    let filename = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    let document = DocumentUpload::new(filename, bytes);

    let outcome = tokio::task::spawn_blocking(move || {
        pipeline.handle(Some(&document), characteristic.as_deref())
    })
    .await?;

    println!("{}", outcome.output);
    if !outcome.ok {
        std::process::exit(1);
    }
    Ok(())
}
