//! Session manager for driving a wizard session.
//!
//! The SessionManager owns the session, dispatches IPC operations onto the
//! state machine and runs at most one generation in the background. A
//! restart or shutdown cancels the running generation, and anything a
//! superseded run reports afterwards is discarded.

use super::process::{
    capture_photo, choose_gender, complete_generation, create_session, fail_generation,
    finalize_selections, restart_session, set_loading_message,
};
use crate::api::GenerationApi;
use crate::catalog::Catalog;
use crate::engine::{default_stages, EventSink, GenerationEngine, StageDescriptor};
use crate::poller::PollConfig;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use fr_protocol::config_models::GlobalConfig;
use fr_protocol::ipc::{Event, Op};
use fr_protocol::wizard_models::{Gender, Selections, WizardSession};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// The generation run allowed to update the session.
struct ActiveRun {
    run_id: Uuid,
    cancel: CancellationToken,
}

/// The session plus its active run.
///
/// Clearing `current_run` and cancelling its token happen under the same
/// lock, so a run can never outlive the restart that superseded it.
struct SessionSlot {
    session: WizardSession,
    current_run: Option<ActiveRun>,
}

impl SessionSlot {
    fn is_current(&self, run_id: Uuid) -> bool {
        self.current_run.as_ref().is_some_and(|run| run.run_id == run_id)
    }

    /// Cancel and forget the active run, returning its id.
    fn cancel_run(&mut self) -> Option<Uuid> {
        let run = self.current_run.take()?;
        run.cancel.cancel();
        Some(run.run_id)
    }
}

struct InFlight {
    run_id: Uuid,
    handle: JoinHandle<()>,
}

/// Collects events emitted while the session lock is held.
#[derive(Default)]
struct EventBuffer {
    events: std::sync::Mutex<Vec<Event>>,
}

impl EventBuffer {
    fn take(&self) -> Vec<Event> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    async fn flush(&self, events_tx: &mpsc::Sender<Event>) {
        for event in self.take() {
            let _ = events_tx.send(event).await;
        }
    }
}

#[async_trait]
impl EventSink for EventBuffer {
    async fn emit(&self, event: Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Forwards engine events for one run, mirroring loading messages into
/// the session while the run is current.
struct RunRelay {
    slot: Arc<Mutex<SessionSlot>>,
    run_id: Uuid,
    events_tx: mpsc::Sender<Event>,
}

#[async_trait]
impl EventSink for RunRelay {
    async fn emit(&self, event: Event) {
        {
            let mut slot = self.slot.lock().await;
            if !slot.is_current(self.run_id) {
                return;
            }
            if let Event::LoadingMessage { message, .. }
            | Event::GenerationProgress { message, .. } = &event
            {
                let _ = set_loading_message(&mut slot.session, message.clone());
            }
        }
        let _ = self.events_tx.send(event).await;
    }
}

/// Drives one wizard session.
pub struct SessionManager {
    slot: Arc<Mutex<SessionSlot>>,
    engine: Arc<GenerationEngine>,
    stages: Arc<Vec<StageDescriptor>>,
    catalog: Catalog,
    gender_select: bool,
    in_flight: Mutex<Option<InFlight>>,
    events_tx: mpsc::Sender<Event>,
}

impl SessionManager {
    /// Create a manager with an explicit stage list.
    pub fn new(
        engine: GenerationEngine,
        stages: Vec<StageDescriptor>,
        catalog: Catalog,
        gender_select: bool,
        events_tx: mpsc::Sender<Event>,
    ) -> Self {
        Self {
            slot: Arc::new(Mutex::new(SessionSlot {
                session: create_session(),
                current_run: None,
            })),
            engine: Arc::new(engine),
            stages: Arc::new(stages),
            catalog,
            gender_select,
            in_flight: Mutex::new(None),
            events_tx,
        }
    }

    /// Create a manager running the image then video stages from `config`.
    pub fn from_config(
        api: Arc<dyn GenerationApi>,
        config: &GlobalConfig,
        catalog: Catalog,
        events_tx: mpsc::Sender<Event>,
    ) -> Self {
        let engine = GenerationEngine::new(api, PollConfig::from(&config.polling));
        Self::new(
            engine,
            default_stages(config),
            catalog,
            config.gender_select,
            events_tx,
        )
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Dispatch one operation from the front end.
    ///
    /// # Errors
    ///
    /// Returns an error if the operation is not valid for the current step
    /// or its input is rejected. The session is left unchanged in that case.
    pub async fn handle_op(&self, op: Op) -> Result<()> {
        tracing::debug!(?op, "Handling operation");
        match op {
            Op::CapturePhoto { image } => self.capture_photo(image).await,
            Op::SelectGender { gender } => self.select_gender(gender).await,
            Op::FinalizeSelections { selections } => {
                self.finalize_selections(selections).await.map(|_| ())
            }
            Op::Restart => {
                self.restart().await;
                Ok(())
            }
            Op::GetSessionState => {
                let session = self.snapshot().await;
                let _ = self.events_tx.send(Event::SessionState { session }).await;
                Ok(())
            }
            Op::Shutdown => self.shutdown().await,
        }
    }

    pub async fn capture_photo(&self, image: String) -> Result<()> {
        let buffer = EventBuffer::default();
        {
            let mut slot = self.slot.lock().await;
            capture_photo(&mut slot.session, &buffer, image, self.gender_select).await?;
        }
        buffer.flush(&self.events_tx).await;
        Ok(())
    }

    pub async fn select_gender(&self, gender: Gender) -> Result<()> {
        let buffer = EventBuffer::default();
        {
            let mut slot = self.slot.lock().await;
            choose_gender(&mut slot.session, &buffer, gender).await?;
        }
        buffer.flush(&self.events_tx).await;
        Ok(())
    }

    /// Enter Loading and start generation in the background.
    ///
    /// Returns the id of the new run.
    pub async fn finalize_selections(&self, selections: Selections) -> Result<Uuid> {
        let buffer = EventBuffer::default();
        let run_id = Uuid::new_v4();
        let cancel = CancellationToken::new();
        let (session_id, request) = {
            let mut slot = self.slot.lock().await;
            let request =
                finalize_selections(&mut slot.session, &buffer, selections, &self.catalog).await?;
            if let Some(previous) = slot.cancel_run() {
                tracing::debug!(run_id = %previous, "Cancelling superseded generation");
            }
            slot.current_run = Some(ActiveRun {
                run_id,
                cancel: cancel.clone(),
            });
            (slot.session.id, request)
        };
        buffer.flush(&self.events_tx).await;

        let engine = Arc::clone(&self.engine);
        let stages = Arc::clone(&self.stages);
        let slot = Arc::clone(&self.slot);
        let events_tx = self.events_tx.clone();

        tracing::info!(%session_id, %run_id, "Starting generation");

        let handle = tokio::spawn(async move {
            let relay = RunRelay {
                slot: Arc::clone(&slot),
                run_id,
                events_tx: events_tx.clone(),
            };
            let result = engine
                .run(session_id, &request, &stages, &relay, &cancel)
                .await;

            let buffer = EventBuffer::default();
            {
                let mut slot = slot.lock().await;
                if !slot.is_current(run_id) {
                    tracing::debug!(%session_id, %run_id, "Discarding result of superseded run");
                    return;
                }
                slot.current_run = None;

                let applied = match result {
                    Ok(output) => complete_generation(&mut slot.session, &buffer, &output).await,
                    Err(e) => {
                        tracing::warn!(%session_id, %run_id, error = %e, "Generation failed");
                        fail_generation(&mut slot.session, &buffer, e.to_string()).await
                    }
                };
                if let Err(e) = applied {
                    tracing::error!(%session_id, %run_id, error = %e, "Could not apply generation result");
                }
            }
            buffer.flush(&events_tx).await;
        });

        // A restart may already have cancelled this run; the handle is kept
        // so the task can still be awaited.
        *self.in_flight.lock().await = Some(InFlight { run_id, handle });

        Ok(run_id)
    }

    /// Cancel any generation in flight and return to Capture.
    pub async fn restart(&self) {
        let buffer = EventBuffer::default();
        {
            let mut slot = self.slot.lock().await;
            let session_id = slot.session.id;
            if let Some(run_id) = slot.cancel_run() {
                tracing::info!(%session_id, %run_id, "Cancelled generation for restart");
                buffer.emit(Event::GenerationCancelled { session_id }).await;
            }
            restart_session(&mut slot.session, &buffer).await;
        }
        buffer.flush(&self.events_tx).await;
    }

    /// Cancel any generation in flight and wait for its task to exit.
    pub async fn shutdown(&self) -> Result<()> {
        let cancelled = {
            let mut slot = self.slot.lock().await;
            let session_id = slot.session.id;
            slot.cancel_run().map(|run_id| (session_id, run_id))
        };
        if let Some((session_id, run_id)) = cancelled {
            tracing::info!(%session_id, %run_id, "Cancelled generation for shutdown");
            let _ = self
                .events_tx
                .send(Event::GenerationCancelled { session_id })
                .await;
        }
        self.wait_for_generation().await
    }

    /// Wait until the generation in flight, if any, has settled.
    ///
    /// The run stays cancellable by `restart` and `shutdown` while this
    /// waits.
    pub async fn wait_for_generation(&self) -> Result<()> {
        let in_flight = self.in_flight.lock().await.take();
        if let Some(in_flight) = in_flight {
            in_flight
                .handle
                .await
                .map_err(|e| anyhow!("Generation task {} panicked: {}", in_flight.run_id, e))?;
        }
        Ok(())
    }

    /// Id of the generation currently allowed to update the session.
    pub async fn current_run(&self) -> Option<Uuid> {
        self.slot.lock().await.current_run.as_ref().map(|run| run.run_id)
    }

    pub async fn snapshot(&self) -> WizardSession {
        self.slot.lock().await.session.clone()
    }
}
