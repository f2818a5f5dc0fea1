//! `fitting-room generate`: run the whole wizard for one photo.

use crate::render;
use chrono::{DateTime, Utc};
use clap::Args;
use color_eyre::eyre::{bail, eyre, Result, WrapErr};
use fr_core::api::{GenerationApi, HttpGenerationApi};
use fr_core::camera::CapturedImage;
use fr_core::session::SessionManager;
use fr_protocol::ipc::Event;
use fr_protocol::wizard_models::{Gender, Selections, WizardStep};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Photo of the person (jpg, png or webp).
    #[arg(long)]
    pub photo: PathBuf,

    /// Catalog variant to shop from.
    #[arg(long)]
    pub gender: Option<Gender>,

    #[arg(long)]
    pub top: String,

    #[arg(long)]
    pub bottom: String,

    #[arg(long)]
    pub background: String,

    /// Generation backend base URL.
    #[arg(long)]
    pub api_url: Option<String>,

    /// Download the finished video into this directory.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub async fn run(args: GenerateArgs, root: &Path) -> Result<()> {
    let config = super::load_with_overrides(root, args.api_url).await?;
    let photo = CapturedImage::from_file(&args.photo)
        .wrap_err_with(|| format!("Failed to load photo {}", args.photo.display()))?;

    let api = Arc::new(HttpGenerationApi::new(config.global.api_base_url.clone()));
    let (events_tx, mut events_rx) = mpsc::channel(256);
    let manager = SessionManager::from_config(api.clone(), &config.global, config.catalog, events_tx);

    tracing::info!(api = %config.global.api_base_url, photo = %args.photo.display(), "Starting session");

    manager
        .capture_photo(photo.to_data_url())
        .await
        .map_err(|e| eyre!(e))?;

    if manager.snapshot().await.step == WizardStep::GenderSelect {
        manager
            .select_gender(args.gender.unwrap_or_default())
            .await
            .map_err(|e| eyre!(e))?;
    } else if args.gender.is_some() {
        tracing::warn!("Gender selection is disabled in config.toml; ignoring --gender");
    }

    manager
        .finalize_selections(Selections::new(args.top, args.bottom, args.background))
        .await
        .map_err(|e| eyre!(e))?;

    let outcome = loop {
        tokio::select! {
            event = events_rx.recv() => {
                let Some(event) = event else {
                    bail!("Session closed before generation finished");
                };
                render::print_event(&event);
                match event {
                    Event::GenerationCompleted { video, .. } => break Ok(video),
                    Event::GenerationFailed { error, .. } => break Err(error),
                    _ => {}
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, cancelling generation");
                manager.shutdown().await.map_err(|e| eyre!(e))?;
                bail!("Generation interrupted");
            }
        }
    };
    manager.wait_for_generation().await.map_err(|e| eyre!(e))?;

    let video = match outcome {
        Ok(video) => video,
        Err(error) => bail!("Generation failed: {error}"),
    };
    render::print_result(&video);

    if let Some(dir) = args.output {
        let path = download_video(api.as_ref(), &video, &dir).await?;
        render::print_saved(&path);
    }
    Ok(())
}

/// File name the downloaded video is saved under.
pub fn showcase_file_name(now: DateTime<Utc>) -> String {
    format!("apparel-showcase-{}.mp4", now.timestamp_millis())
}

async fn download_video(api: &dyn GenerationApi, video: &str, dir: &Path) -> Result<PathBuf> {
    let bytes = api
        .download(video)
        .await
        .wrap_err_with(|| format!("Failed to download {video}"))?;

    tokio::fs::create_dir_all(dir)
        .await
        .wrap_err_with(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join(showcase_file_name(Utc::now()));
    tokio::fs::write(&path, &bytes)
        .await
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "Video saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_showcase_file_name_uses_unix_millis() {
        let now = Utc.timestamp_millis_opt(1_718_000_000_123).unwrap();
        assert_eq!(showcase_file_name(now), "apparel-showcase-1718000000123.mp4");
    }
}
