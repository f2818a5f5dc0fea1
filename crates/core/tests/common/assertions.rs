//! Event assertion helpers.

use fr_protocol::ipc::Event;
use fr_protocol::wizard_models::WizardStep;

/// Steps entered, in the order the events announced them.
pub fn steps(events: &[Event]) -> Vec<WizardStep> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::StepChanged { step, .. } => Some(*step),
            _ => None,
        })
        .collect()
}

/// Progress messages for one stage, in order.
#[allow(dead_code)]
pub fn progress_messages(events: &[Event], stage: &str) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::GenerationProgress {
                stage: s, message, ..
            } if s == stage => Some(message.clone()),
            _ => None,
        })
        .collect()
}

/// Position of the first event matching `predicate`.
#[allow(dead_code)]
pub fn position(events: &[Event], predicate: impl Fn(&Event) -> bool) -> usize {
    events
        .iter()
        .position(predicate)
        .unwrap_or_else(|| panic!("no matching event in {events:#?}"))
}

/// Assert every event belongs to `session_id`.
#[allow(dead_code)]
pub fn assert_single_session(events: &[Event]) {
    if let Some(first) = events.first() {
        let id = first.session_id();
        assert!(
            events.iter().all(|e| e.session_id() == id),
            "events from more than one session: {events:#?}"
        );
    }
}
