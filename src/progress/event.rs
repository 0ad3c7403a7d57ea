// ABOUTME: One parsed unit of the engine's streamed JSON output.
// ABOUTME: Normalizes the engine's two error fields into a single message.

use serde::{Deserialize, Serialize};

/// Byte counters for a layer download, upload or extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

/// Auxiliary result data: image ID for builds, digest for pushes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuxDetail {
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

/// A single progress message from a pull, push or build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireEvent", rename_all = "camelCase")]
pub struct ProgressEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_detail: Option<ProgressDetail>,
    /// Pre-rendered progress bar, when the engine supplies one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
    /// Build step output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aux: Option<AuxDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ProgressEvent {
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Default::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error_message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Error reported by the engine, if non-empty.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref().filter(|m| !m.is_empty())
    }

    pub fn is_error(&self) -> bool {
        self.error_message().is_some()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEvent {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    progress_detail: Option<ProgressDetail>,
    #[serde(default)]
    progress: Option<String>,
    #[serde(default)]
    stream: Option<String>,
    #[serde(default)]
    aux: Option<AuxDetail>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_detail: Option<WireErrorDetail>,
    // Our own serialized form, so JSON output can be read back.
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct WireErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

impl From<WireEvent> for ProgressEvent {
    fn from(wire: WireEvent) -> Self {
        let detail_message = wire
            .error_detail
            .and_then(|d| d.message)
            .filter(|m| !m.is_empty());
        let error_message = detail_message
            .or(wire.error.filter(|m| !m.is_empty()))
            .or(wire.error_message);

        // Engines send `"progressDetail": {}` for steps without counters.
        let progress_detail = wire
            .progress_detail
            .filter(|d| d.current.is_some() || d.total.is_some());

        Self {
            status: wire.status,
            id: wire.id,
            progress_detail,
            progress: wire.progress,
            stream: wire.stream,
            aux: wire.aux,
            error_message,
        }
    }
}
