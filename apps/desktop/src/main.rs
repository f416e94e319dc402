use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use client_core::{
    load_settings, view::render_text_report, PredictorController, SelectedFile, SubmitOutcome,
};
use tracing_subscriber::EnvFilter;

/// Upload a short audio clip and print the predicted genres.
#[derive(Parser, Debug)]
struct Args {
    /// Audio file to classify (.wav expected by the backend).
    #[arg(long)]
    file: PathBuf,
    /// Backend base URL; overrides predictor.toml and the environment.
    #[arg(long)]
    server_url: Option<String>,
    /// Width of the text progress bars.
    #[arg(long, default_value_t = 30)]
    width: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.backend_url = server_url;
    }
    let controller = PredictorController::from_settings(&settings)?;

    let file = SelectedFile::load(&args.file).await?;
    if !file.has_accepted_extension() {
        eprintln!(
            "warning: '{}' is not a .wav file; the backend may reject it",
            file.name()
        );
    }
    controller.select_file(file);

    let outcome = controller.submit().await;
    println!("{}", render_text_report(&controller.snapshot(), args.width));

    exit_status(outcome)
}

/// Only a completed prediction exits cleanly.
fn exit_status(outcome: SubmitOutcome) -> Result<()> {
    match outcome {
        SubmitOutcome::Succeeded => Ok(()),
        SubmitOutcome::Failed => bail!("prediction request failed"),
        other => bail!("submission did not complete: {other:?}"),
    }
}
