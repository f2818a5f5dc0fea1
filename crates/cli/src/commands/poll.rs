//! `fitting-room poll`: wait for a job submitted elsewhere.

use crate::render;
use async_trait::async_trait;
use clap::{Args, ValueEnum};
use color_eyre::eyre::{bail, eyre, Result};
use fr_core::api::HttpGenerationApi;
use fr_core::engine::default_stages;
use fr_core::poller::{JobPoller, PollConfig, ProgressObserver, ProgressUpdate};
use fr_protocol::job_models::{Job, JobResult};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StageKind {
    Image,
    Video,
}

impl StageKind {
    fn name(self) -> &'static str {
        match self {
            StageKind::Image => "image",
            StageKind::Video => "video",
        }
    }
}

#[derive(Debug, Args)]
pub struct PollArgs {
    /// Job id returned by the submission call.
    pub job_id: String,

    /// Which status endpoint the job lives under.
    #[arg(long, value_enum, default_value_t = StageKind::Image)]
    pub stage: StageKind,

    /// Generation backend base URL.
    #[arg(long)]
    pub api_url: Option<String>,

    /// Print the outcome as JSON.
    #[arg(long)]
    pub json: bool,
}

struct PrintProgress {
    stage: &'static str,
}

#[async_trait]
impl ProgressObserver for PrintProgress {
    async fn on_progress(&self, update: ProgressUpdate) {
        render::print_progress(self.stage, &update.message);
    }
}

pub async fn run(args: PollArgs, root: &Path) -> Result<()> {
    let config = super::load_with_overrides(root, args.api_url).await?;
    let stage = default_stages(&config.global)
        .into_iter()
        .find(|s| s.name == args.stage.name())
        .ok_or_else(|| eyre!("No {} stage configured", args.stage.name()))?;

    let api = Arc::new(HttpGenerationApi::new(config.global.api_base_url.clone()));
    let poller = JobPoller::new(api, PollConfig::from(&config.global.polling));

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let job = Job::new(args.job_id, stage.status_path.clone());
    let observer = PrintProgress {
        stage: args.stage.name(),
    };
    let result = poller
        .poll(&job, &stage.progress_label, &observer, &cancel)
        .await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    match result {
        JobResult::Completed { artifact } => {
            if !args.json {
                render::print_result(&artifact);
            }
            Ok(())
        }
        JobResult::Failed { reason } => bail!("Job {} failed: {reason}", job.id),
        JobResult::TimedOut { attempts } => {
            bail!("Generation timeout: job {} still pending after {attempts} attempts", job.id)
        }
        JobResult::Cancelled => bail!("Polling of job {} cancelled", job.id),
    }
}
