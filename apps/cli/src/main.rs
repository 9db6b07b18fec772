mod config;
mod encoder;
mod errors;
mod extraction;
mod gemini;
mod illustration;
mod models;
mod render;
mod shell;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::gemini::GeminiClient;
use crate::render::render_html;
use crate::shell::{AppShell, SelectedFile, ShellState};

/// Converts a LinkedIn-exported profile PDF into a printable, ATS-friendly
/// resume document.
#[derive(Debug, Parser)]
#[command(name = "atsready")]
#[command(about = "Turn a LinkedIn PDF export into an ATS-ready resume")]
struct Cli {
    /// Path to the LinkedIn profile PDF export.
    input: PathBuf,

    /// Where to write the rendered resume document.
    #[arg(short, long, default_value = "resume.html")]
    output: PathBuf,

    /// Also generate the decorative before/after illustrations into this
    /// directory (best-effort; failures are skipped).
    #[arg(long, value_name = "DIR")]
    mocks: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting atsready v{}", env!("CARGO_PKG_VERSION"));

    let client = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_base_url.clone());

    // Decorative sub-flow: fires at startup, runs concurrently with the
    // main pipeline, and never blocks it.
    let mock_task = cli.mocks.clone().map(|dir| {
        let client = client.clone();
        tokio::spawn(async move {
            let pair = illustration::generate_mock_pair(&client).await;
            write_mock_pair(&dir, pair).await;
        })
    });

    let mut shell = AppShell::new();
    shell.select_file(SelectedFile::from_path(&cli.input));

    if shell.state() == ShellState::FileSelected {
        info!("Processing {}", shell.file().map(|f| f.name.as_str()).unwrap_or_default());
        shell.process(&client).await;
    }

    let outcome = if let Some(record) = shell.record() {
        let html = render_html(record);
        tokio::fs::write(&cli.output, html)
            .await
            .with_context(|| format!("Failed to write {}", cli.output.display()))?;
        println!("✅ ATS resume written to {}", cli.output.display());
        println!("   Open it in a browser and use print-to-PDF to export.");
        Ok(())
    } else {
        let message = shell.error().unwrap_or("Processing did not complete.");
        Err(anyhow::anyhow!("{message}"))
    };

    // Let the decorative task settle before exit; its failure is not ours.
    if let Some(task) = mock_task {
        if task.await.is_err() {
            warn!("Illustration task panicked; skipping mock images");
        }
    }

    outcome
}

/// Writes the decoded before/after images into `dir`, skipping whichever
/// slots came back empty.
async fn write_mock_pair(dir: &std::path::Path, pair: (Option<String>, Option<String>)) {
    if let Err(e) = tokio::fs::create_dir_all(dir).await {
        warn!("Cannot create mock directory {}: {e}", dir.display());
        return;
    }
    for (slot, uri) in [("before.png", pair.0), ("after.png", pair.1)] {
        let Some(uri) = uri else {
            warn!("No {slot} illustration available; skipping");
            continue;
        };
        let Some(bytes) = encoder::decode_png_data_uri(&uri) else {
            warn!("Illustration for {slot} was not a PNG data URI; skipping");
            continue;
        };
        let path = dir.join(slot);
        match tokio::fs::write(&path, bytes).await {
            Ok(()) => info!("Wrote {}", path.display()),
            Err(e) => warn!("Failed to write {}: {e}", path.display()),
        }
    }
}
