//! Test fixtures for scripted backends and sample sessions.

use fr_core::api::{ScriptedGenerationApi, ScriptedReply};
use fr_core::config::builtin_catalog;
use fr_core::session::SessionManager;
use fr_protocol::config_models::GlobalConfig;
use fr_protocol::ipc::{Event, Op};
use fr_protocol::job_models::JobStatusResponse;
use fr_protocol::wizard_models::{Gender, Selections};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;

pub const PHOTO: &str = "data:image/jpeg;base64,/9j/4AAQSkZJRg==";
pub const IMAGE_STATUS_URL: &str = "/api/status/img-1";
pub const VIDEO_STATUS_URL: &str = "/api/video/status/vid-1";

pub fn pending() -> ScriptedReply {
    ScriptedReply::Status(JobStatusResponse::pending("processing"))
}

/// A backend where the image job takes `image_pending` pending rounds and
/// the video job `video_pending`, then both complete.
#[allow(dead_code)]
pub fn scripted_success(image_pending: usize, video_pending: usize) -> ScriptedGenerationApi {
    let mut image = vec![pending(); image_pending];
    image.push(ScriptedReply::Status(JobStatusResponse::completed_image(
        "outputs/portrait_001.png",
    )));
    let mut video = vec![pending(); video_pending];
    video.push(ScriptedReply::Status(JobStatusResponse::completed_video(
        "https://cdn.example.com/clip_001.mp4",
    )));

    ScriptedGenerationApi::new()
        .on_submit("/api/generate", "img-1")
        .on_status(IMAGE_STATUS_URL, image)
        .on_submit("/api/video", "vid-1")
        .on_status(VIDEO_STATUS_URL, video)
}

/// A manager over the built-in catalog, with its event receiver.
pub fn manager_with(api: Arc<ScriptedGenerationApi>) -> (SessionManager, mpsc::Receiver<Event>) {
    let global = GlobalConfig::default();
    let catalog = builtin_catalog(&global).expect("built-in catalog should parse");
    let (tx, rx) = mpsc::channel(1000);
    (SessionManager::from_config(api, &global, catalog, tx), rx)
}

/// Drive a session from Capture to Select.
pub async fn capture_and_choose(manager: &SessionManager, gender: Gender) {
    manager
        .handle_op(Op::CapturePhoto {
            image: PHOTO.to_string(),
        })
        .await
        .expect("capture should succeed");
    manager
        .handle_op(Op::SelectGender { gender })
        .await
        .expect("gender selection should succeed");
}

#[allow(dead_code)]
pub fn male_outfit() -> Selections {
    Selections::new("Blue T-Shirt", "Black Jeans", "Studio")
}

#[allow(dead_code)]
pub fn formal_dress() -> Selections {
    Selections::new("Formal Dress", "Black Skirt", "Office")
}

/// Drain every event currently buffered in the channel.
pub fn drain(rx: &mut mpsc::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Create a temporary project directory with a `.fitting-room/` config.
#[allow(dead_code)]
pub fn create_test_project(config_toml: &str) -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let fr_dir = temp_dir.path().join(".fitting-room");
    std::fs::create_dir_all(fr_dir.join("catalog"))?;
    std::fs::write(fr_dir.join("config.toml"), config_toml)?;
    std::fs::write(
        fr_dir.join("catalog/male.yaml"),
        "gender: male\ntops:\n  - name: Blue T-Shirt\nbottoms:\n  - name: Black Jeans\n",
    )?;
    Ok(temp_dir)
}
