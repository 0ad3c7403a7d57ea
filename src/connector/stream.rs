// ABOUTME: Reads engine responses: progress streams and single JSON bodies.
// ABOUTME: Delivers each progress event to the caller before reading further.

use super::endpoint::ConnectionGuard;
use super::error::ConnectorError;
use crate::progress::{ProgressDecoder, ProgressEvent};
use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::body::{Frame, Incoming};
use serde::Deserialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Response from the engine with the connection it arrived on.
pub(crate) struct EngineResponse {
    pub status: u16,
    pub body: Incoming,
    // Dropped with the response, closing the connection.
    pub _guard: ConnectionGuard,
}

/// Drain a progress stream, calling `on_progress` for every event in order.
///
/// Stops at the first event carrying an error and returns it as
/// [`ConnectorError::RemoteOperation`]. Cancellation is checked before each
/// callback and while waiting for data.
pub(crate) async fn drain_progress<F>(
    response: EngineResponse,
    read_timeout: Option<Duration>,
    cancel: &CancellationToken,
    mut on_progress: F,
) -> Result<(), ConnectorError>
where
    F: FnMut(&ProgressEvent),
{
    let EngineResponse {
        mut body, _guard, ..
    } = response;
    let mut decoder = ProgressDecoder::new();

    loop {
        let frame = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ConnectorError::Cancelled),
            frame = next_frame(&mut body, read_timeout) => frame?,
        };

        let Some(frame) = frame else { break };
        let Ok(data) = frame.into_data() else {
            continue;
        };
        decoder.push(&data);

        while let Some(event) = decoder
            .next_event()
            .map_err(|e| ConnectorError::Protocol(e.to_string()))?
        {
            if cancel.is_cancelled() {
                return Err(ConnectorError::Cancelled);
            }
            tracing::trace!(status = ?event.status, id = ?event.id, "progress event");
            on_progress(&event);

            if let Some(message) = event.error_message() {
                return Err(ConnectorError::RemoteOperation(message.to_string()));
            }
        }
    }

    decoder
        .finish()
        .map_err(|e| ConnectorError::Protocol(e.to_string()))
}

/// Collect a whole (non-streaming) response body.
pub(crate) async fn read_body(
    body: &mut Incoming,
    read_timeout: Option<Duration>,
) -> Result<Vec<u8>, ConnectorError> {
    let mut bytes = Vec::new();
    while let Some(frame) = next_frame(body, read_timeout).await? {
        if let Ok(data) = frame.into_data() {
            bytes.extend_from_slice(&data);
        }
    }
    Ok(bytes)
}

/// Turn a non-2xx response into an error, using the engine's `message` field.
pub(crate) async fn error_message(
    mut response: EngineResponse,
    read_timeout: Option<Duration>,
) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    match read_body(&mut response.body, read_timeout).await {
        Ok(bytes) => match serde_json::from_slice::<ErrorBody>(&bytes) {
            Ok(parsed) => parsed.message,
            Err(_) => String::from_utf8_lossy(&bytes).trim().to_string(),
        },
        Err(e) => e.to_string(),
    }
}

async fn next_frame(
    body: &mut Incoming,
    read_timeout: Option<Duration>,
) -> Result<Option<Frame<Bytes>>, ConnectorError> {
    let frame = match read_timeout {
        Some(limit) => tokio::time::timeout(limit, body.frame())
            .await
            .map_err(|_| {
                ConnectorError::Transport(format!("no data from engine for {:?}", limit))
            })?,
        None => body.frame().await,
    };

    frame
        .transpose()
        .map_err(|e| ConnectorError::Transport(format!("connection dropped: {}", e)))
}
