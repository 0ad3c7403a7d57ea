// ABOUTME: Streamed progress events: decoding from engine output and rendering as text.
// ABOUTME: Events are handed to callers one at a time and never retained.

mod decoder;
mod event;
mod formatter;

pub use decoder::{ProgressDecodeError, ProgressDecoder};
pub use event::{AuxDetail, ProgressDetail, ProgressEvent};
pub use formatter::format_progress;
