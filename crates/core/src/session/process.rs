//! Wizard session state machine.
//!
//! This module provides functions that move a `WizardSession` between
//! steps. Each transition checks the current step first; an invalid
//! transition returns an error and leaves the session untouched. Successful
//! transitions emit their events through the given sink.

use super::error::{SessionError, SessionResult};
use crate::apparel::shape_outfit;
use crate::catalog::Catalog;
use crate::engine::{EventSink, GenerationOutput, GenerationRequest};
use chrono::Utc;
use fr_protocol::ipc::Event;
use fr_protocol::wizard_models::{
    Gender, Selections, WizardSession, WizardStep, DEFAULT_LOADING_MESSAGE,
};
use uuid::Uuid;

/// Create a new session on the Capture step.
pub fn create_session() -> WizardSession {
    WizardSession {
        id: Uuid::new_v4(),
        step: WizardStep::Capture,
        gender: Gender::default(),
        person_image: None,
        selections: None,
        generated_image: None,
        generated_video: None,
        loading_message: DEFAULT_LOADING_MESSAGE.to_string(),
        last_error: None,
        started_at: None,
        completed_at: None,
    }
}

fn require_step(
    session: &WizardSession,
    allowed: &[WizardStep],
    action: &'static str,
) -> SessionResult<()> {
    if allowed.contains(&session.step) {
        Ok(())
    } else {
        Err(SessionError::InvalidTransition {
            from: session.step,
            action,
        })
    }
}

async fn enter_step(session: &mut WizardSession, sink: &dyn EventSink, step: WizardStep) {
    session.step = step;
    sink.emit(Event::StepChanged {
        session_id: session.id,
        step,
    })
    .await;
}

/// Store the captured photo and leave the Capture step.
///
/// Goes to GenderSelect, or straight to Select when `gender_select` is off.
pub async fn capture_photo(
    session: &mut WizardSession,
    sink: &dyn EventSink,
    image: String,
    gender_select: bool,
) -> SessionResult<()> {
    require_step(session, &[WizardStep::Capture], "capture a photo")?;
    if image.trim().is_empty() {
        return Err(SessionError::MissingPhoto);
    }

    session.person_image = Some(image);
    let next = if gender_select {
        WizardStep::GenderSelect
    } else {
        WizardStep::Select
    };
    enter_step(session, sink, next).await;
    Ok(())
}

/// Pick the catalog variant and move to Select.
pub async fn choose_gender(
    session: &mut WizardSession,
    sink: &dyn EventSink,
    gender: Gender,
) -> SessionResult<()> {
    require_step(session, &[WizardStep::GenderSelect], "choose a gender")?;

    session.gender = gender;
    enter_step(session, sink, WizardStep::Select).await;
    Ok(())
}

/// Validate and store the selections, then enter Loading.
///
/// Returns the request the generation stages are built from. Artifacts and
/// the error of any previous attempt are cleared.
pub async fn finalize_selections(
    session: &mut WizardSession,
    sink: &dyn EventSink,
    selections: Selections,
    catalog: &Catalog,
) -> SessionResult<GenerationRequest> {
    require_step(session, &[WizardStep::Select], "finalize selections")?;
    let person_image = session
        .person_image
        .clone()
        .ok_or(SessionError::MissingPhoto)?;
    catalog.validate(session.gender, &selections)?;

    let outfit = shape_outfit(session.gender, &selections, catalog);
    let request = GenerationRequest {
        person_image,
        gender: session.gender,
        selections: selections.clone(),
        outfit,
    };

    session.selections = Some(selections);
    session.generated_image = None;
    session.generated_video = None;
    session.last_error = None;
    session.started_at = Some(Utc::now());
    session.completed_at = None;
    session.loading_message = DEFAULT_LOADING_MESSAGE.to_string();

    enter_step(session, sink, WizardStep::Loading).await;
    sink.emit(Event::LoadingMessage {
        session_id: session.id,
        message: session.loading_message.clone(),
    })
    .await;

    Ok(request)
}

/// Update the loading screen headline.
///
/// Does not emit: the message arrives as an event from the engine already.
pub fn set_loading_message(session: &mut WizardSession, message: String) -> SessionResult<()> {
    require_step(session, &[WizardStep::Loading], "update the loading message")?;
    session.loading_message = message;
    Ok(())
}

/// Store the generated artifacts and show the result.
pub async fn complete_generation(
    session: &mut WizardSession,
    sink: &dyn EventSink,
    output: &GenerationOutput,
) -> SessionResult<()> {
    require_step(session, &[WizardStep::Loading], "complete generation")?;
    let video = output
        .final_artifact()
        .ok_or(SessionError::MissingArtifact)?
        .to_string();

    session.generated_image = output.artifact("image").map(str::to_string);
    session.generated_video = Some(video.clone());
    session.completed_at = Some(Utc::now());

    enter_step(session, sink, WizardStep::Result).await;
    sink.emit(Event::GenerationCompleted {
        session_id: session.id,
        video,
    })
    .await;
    Ok(())
}

/// Record a failed generation and return to Select.
///
/// The photo and selections are kept so the user can retry.
pub async fn fail_generation(
    session: &mut WizardSession,
    sink: &dyn EventSink,
    error: String,
) -> SessionResult<()> {
    require_step(session, &[WizardStep::Loading], "fail generation")?;

    session.last_error = Some(error.clone());
    session.loading_message = DEFAULT_LOADING_MESSAGE.to_string();

    enter_step(session, sink, WizardStep::Select).await;
    sink.emit(Event::GenerationFailed {
        session_id: session.id,
        error,
    })
    .await;
    Ok(())
}

/// Return to Capture from any step, dropping everything but the session id.
pub async fn restart_session(session: &mut WizardSession, sink: &dyn EventSink) {
    let id = session.id;
    *session = WizardSession {
        id,
        ..create_session()
    };

    sink.emit(Event::SessionRestarted { session_id: id }).await;
    enter_step(session, sink, WizardStep::Capture).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StageArtifact;
    use fr_protocol::catalog_models::{Background, GenderCatalog, OutfitItem};
    use tokio::sync::mpsc;

    fn item(name: &str, full_outfit: bool) -> OutfitItem {
        OutfitItem {
            name: name.to_string(),
            image: String::new(),
            full_outfit,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![GenderCatalog {
                gender: Gender::Female,
                tops: vec![item("Pink Blouse", false), item("Formal Dress", true)],
                bottoms: vec![item("Black Skirt", false)],
            }],
            vec![Background {
                name: "Office".to_string(),
                description: String::new(),
            }],
        )
    }

    fn output() -> GenerationOutput {
        GenerationOutput {
            artifacts: vec![
                StageArtifact {
                    stage: "image".to_string(),
                    artifact: "portrait.png".to_string(),
                },
                StageArtifact {
                    stage: "video".to_string(),
                    artifact: "clip.mp4".to_string(),
                },
            ],
        }
    }

    async fn session_in_loading(tx: &mpsc::Sender<Event>) -> WizardSession {
        let mut session = create_session();
        capture_photo(&mut session, tx, "data:image/png;base64,AA".to_string(), true)
            .await
            .unwrap();
        choose_gender(&mut session, tx, Gender::Female).await.unwrap();
        finalize_selections(
            &mut session,
            tx,
            Selections::new("Formal Dress", "Black Skirt", "Office"),
            &catalog(),
        )
        .await
        .unwrap();
        session
    }

    #[test]
    fn test_create_session() {
        let session = create_session();
        assert_eq!(session.step, WizardStep::Capture);
        assert_eq!(session.gender, Gender::Male);
        assert!(session.person_image.is_none());
        assert_eq!(session.loading_message, DEFAULT_LOADING_MESSAGE);
    }

    #[tokio::test]
    async fn test_capture_photo_moves_to_gender_select() {
        let mut session = create_session();
        let (tx, mut rx) = mpsc::channel(10);

        capture_photo(&mut session, &tx, "data:image/png;base64,AA".to_string(), true)
            .await
            .unwrap();

        assert_eq!(session.step, WizardStep::GenderSelect);
        assert!(matches!(
            rx.recv().await.unwrap(),
            Event::StepChanged {
                step: WizardStep::GenderSelect,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_capture_photo_skips_gender_select_when_disabled() {
        let mut session = create_session();
        let (tx, _rx) = mpsc::channel(10);

        capture_photo(&mut session, &tx, "data:image/png;base64,AA".to_string(), false)
            .await
            .unwrap();

        assert_eq!(session.step, WizardStep::Select);
    }

    #[tokio::test]
    async fn test_invalid_transition_leaves_state_untouched() {
        let mut session = create_session();
        let (tx, mut rx) = mpsc::channel(10);

        let err = choose_gender(&mut session, &tx, Gender::Female)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SessionError::InvalidTransition {
                from: WizardStep::Capture,
                action: "choose a gender",
            }
        );
        assert_eq!(session.gender, Gender::Male);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_finalize_shapes_request_and_enters_loading() {
        let (tx, _rx) = mpsc::channel(20);
        let mut session = create_session();
        capture_photo(&mut session, &tx, "data:image/png;base64,AA".to_string(), true)
            .await
            .unwrap();
        choose_gender(&mut session, &tx, Gender::Female).await.unwrap();

        let request = finalize_selections(
            &mut session,
            &tx,
            Selections::new("Formal Dress", "Black Skirt", "Office"),
            &catalog(),
        )
        .await
        .unwrap();

        assert_eq!(session.step, WizardStep::Loading);
        assert!(session.started_at.is_some());
        assert_eq!(request.outfit.outfit_bottom, "");
        assert_eq!(request.outfit.apparel_type, "Formal Dress");
        assert_eq!(request.person_image, "data:image/png;base64,AA");
    }

    #[tokio::test]
    async fn test_finalize_rejects_unknown_option_and_stays_on_select() {
        let (tx, _rx) = mpsc::channel(20);
        let mut session = create_session();
        capture_photo(&mut session, &tx, "data:image/png;base64,AA".to_string(), false)
            .await
            .unwrap();
        session.gender = Gender::Female;

        let err = finalize_selections(
            &mut session,
            &tx,
            Selections::new("Tuxedo", "Black Skirt", "Office"),
            &catalog(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, SessionError::UnknownOption(_)));
        assert_eq!(session.step, WizardStep::Select);
        assert!(session.selections.is_none());
    }

    #[tokio::test]
    async fn test_fail_generation_keeps_photo_and_selections() {
        let (tx, _rx) = mpsc::channel(20);
        let mut session = session_in_loading(&tx).await;

        fail_generation(&mut session, &tx, "Generation timeout".to_string())
            .await
            .unwrap();

        assert_eq!(session.step, WizardStep::Select);
        assert_eq!(session.last_error.as_deref(), Some("Generation timeout"));
        assert!(session.person_image.is_some());
        assert_eq!(
            session.selections.as_ref().map(|s| s.top.as_str()),
            Some("Formal Dress")
        );
    }

    #[tokio::test]
    async fn test_complete_generation_stores_artifacts() {
        let (tx, mut rx) = mpsc::channel(20);
        let mut session = session_in_loading(&tx).await;
        while rx.try_recv().is_ok() {}

        complete_generation(&mut session, &tx, &output()).await.unwrap();

        assert_eq!(session.step, WizardStep::Result);
        assert_eq!(session.generated_image.as_deref(), Some("portrait.png"));
        assert_eq!(session.generated_video.as_deref(), Some("clip.mp4"));
        assert!(session.completed_at.is_some());

        rx.recv().await.unwrap();
        assert!(matches!(
            rx.recv().await.unwrap(),
            Event::GenerationCompleted { video, .. } if video == "clip.mp4"
        ));
    }

    #[tokio::test]
    async fn test_set_loading_message_only_while_loading() {
        let (tx, _rx) = mpsc::channel(20);
        let mut session = session_in_loading(&tx).await;

        set_loading_message(&mut session, "Creating... (3s)".to_string()).unwrap();
        assert_eq!(session.loading_message, "Creating... (3s)");

        let mut idle = create_session();
        assert!(set_loading_message(&mut idle, "x".to_string()).is_err());
    }

    #[tokio::test]
    async fn test_restart_from_every_step_resets_to_capture() {
        let (tx, _rx) = mpsc::channel(100);

        for step in WizardStep::ALL {
            let mut session = session_in_loading(&tx).await;
            session.step = step;
            session.generated_video = Some("clip.mp4".to_string());
            let id = session.id;

            restart_session(&mut session, &tx).await;

            assert_eq!(session.id, id);
            assert_eq!(session.step, WizardStep::Capture);
            assert_eq!(session.gender, Gender::Male);
            assert!(session.person_image.is_none());
            assert!(session.selections.is_none());
            assert!(session.generated_image.is_none());
            assert!(session.generated_video.is_none());
            assert!(session.last_error.is_none());
        }
    }
}
