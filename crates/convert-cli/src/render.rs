//! Terminal rendering of the submission display state.

use convert_core::{Banner, DisplayState, SubmissionState};

const BAR_WIDTH: usize = 20;

/// Lines to print for the given display state.
pub fn render(display: &DisplayState) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(busy) = &display.busy {
        lines.push(busy.title.to_string());
        lines.push(format!("  {}", busy.text));
        lines.push(format!("  {} {}", progress_bar(busy.progress), busy.label));
    }

    if let Some(Banner::Success { title, message } | Banner::Error { title, message }) =
        &display.banner
    {
        lines.push(title.to_string());
        lines.push(format!("  {}", message));
    }

    lines
}

fn progress_bar(progress: f32) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * BAR_WIDTH as f32).round()) as usize;
    format!("[{}{}]", "#".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}

/// Process exit code for a settled state.
pub fn exit_code(state: &SubmissionState) -> i32 {
    match state {
        SubmissionState::Success { .. } => 0,
        SubmissionState::Failed { .. } => 1,
        // Finished without a success banner.
        SubmissionState::Idle => 2,
        SubmissionState::Pending { .. } => 3,
    }
}
