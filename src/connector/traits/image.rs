// ABOUTME: Streaming image operations: pull, push and build.
// ABOUTME: Progress is delivered synchronously, one event at a time, in engine order.

use super::sealed::Sealed;
use crate::connector::ConnectorError;
use crate::params::{BuildImageParams, PullParams, PushParams};
use crate::progress::ProgressEvent;
use crate::types::ImageId;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Image operations that report progress while they run.
///
/// `on_progress` runs on the task draining the response and is never called
/// concurrently with itself. After `cancel` fires no further events are
/// delivered and the call returns [`ConnectorError::Cancelled`].
#[async_trait]
pub trait ImageOps: Sealed + Send + Sync {
    /// Pull an image. Fails with [`ConnectorError::RemoteOperation`] when the
    /// engine reports an error in the stream.
    async fn pull<F>(
        &self,
        params: &PullParams,
        cancel: &CancellationToken,
        on_progress: F,
    ) -> Result<(), ConnectorError>
    where
        F: FnMut(&ProgressEvent) + Send;

    /// Push a repository. Returns the pushed digest when the engine reports one.
    async fn push<F>(
        &self,
        params: &PushParams,
        cancel: &CancellationToken,
        on_progress: F,
    ) -> Result<Option<String>, ConnectorError>
    where
        F: FnMut(&ProgressEvent) + Send;

    /// Build an image and return its ID.
    async fn build_image<F>(
        &self,
        params: &BuildImageParams,
        cancel: &CancellationToken,
        on_progress: F,
    ) -> Result<ImageId, ConnectorError>
    where
        F: FnMut(&ProgressEvent) + Send;
}
