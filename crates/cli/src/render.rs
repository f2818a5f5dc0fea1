//! Terminal rendering of session events.

use colored::Colorize;
use fr_protocol::ipc::Event;
use std::path::Path;

/// One line for an event, or `None` for events not worth showing.
pub fn format_event(event: &Event) -> Option<String> {
    let line = match event {
        Event::StepChanged { step, .. } => format!("{} {step}", "→".dimmed()),
        Event::LoadingMessage { message, .. } => message.cyan().to_string(),
        Event::StageStarted { stage, job_id, .. } => {
            format!("{} submitted as job {job_id}", stage_tag(stage))
        }
        Event::GenerationProgress { stage, message, .. } => {
            format!("{} {message}", stage_tag(stage))
        }
        Event::StageCompleted {
            stage, artifact, ..
        } => format!("{} {} {artifact}", stage_tag(stage), "done".green()),
        Event::GenerationCompleted { .. } => "Generation complete".green().bold().to_string(),
        Event::GenerationFailed { error, .. } => {
            format!("{} {error}", "Generation failed:".red().bold())
        }
        Event::GenerationCancelled { .. } => "Generation cancelled".yellow().to_string(),
        Event::SessionRestarted { .. } => "Session restarted".yellow().to_string(),
        Event::SessionState { .. } => return None,
    };
    Some(line)
}

fn stage_tag(stage: &str) -> String {
    format!("[{stage}]").yellow().to_string()
}

pub fn print_event(event: &Event) {
    if let Some(line) = format_event(event) {
        println!("{line}");
    }
}

pub fn print_progress(stage: &str, message: &str) {
    println!("{} {message}", stage_tag(stage));
}

pub fn print_result(artifact: &str) {
    println!("{} {artifact}", "Result:".green().bold());
}

pub fn print_saved(path: &Path) {
    println!("{} {}", "Saved:".green().bold(), path.display());
}
