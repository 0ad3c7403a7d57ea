// ABOUTME: Renders a progress event as a single human-readable line.
// ABOUTME: Errors first, then build output, then status with layer counters.

use super::event::ProgressEvent;

/// Render `event` for display. Pure and deterministic.
///
/// Errors win over everything else, build output is shown as-is, and
/// status lines get the layer ID and byte counters when present.
pub fn format_progress(event: &ProgressEvent) -> String {
    if let Some(message) = event.error_message() {
        return format!("[ERROR] {}", message);
    }

    if let Some(stream) = &event.stream {
        return stream.trim_end_matches(['\r', '\n']).to_string();
    }

    let mut line = match (&event.id, &event.status) {
        (Some(id), Some(status)) => format!("[{}] {}", id, status),
        (None, Some(status)) => status.clone(),
        (Some(id), None) => format!("[{}]", id),
        (None, None) => String::new(),
    };

    if let Some(detail) = &event.progress_detail {
        match (detail.current, detail.total) {
            (Some(current), Some(total)) if total > 0 => {
                line.push_str(&format!(" {}/{}", current, total));
            }
            (Some(current), _) => line.push_str(&format!(" {}", current)),
            _ => {}
        }
    }

    line
}
