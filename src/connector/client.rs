// ABOUTME: Connector: issues engine requests and consumes their responses.
// ABOUTME: Stateless per call; safe to share between concurrent operations.

use super::endpoint::Endpoint;
use super::error::ConnectorError;
use super::request::{
    EngineRequest, build_request, inspect_network_request, pull_request, push_request,
};
use super::stream::{EngineResponse, drain_progress, error_message, read_body};
use super::traits::sealed::Sealed;
use super::traits::{ImageOps, NetworkOps};
use crate::auth::AuthResolver;
use crate::config::Config;
use crate::params::{BuildContext, BuildImageParams, InspectNetworkParams, PullParams, PushParams};
use crate::progress::ProgressEvent;
use crate::types::{ImageId, NetworkDescriptor};
use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::Full;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for a container engine's remote API.
///
/// Holds only configuration; every call opens its own connection and keeps
/// its state on its own stack.
#[derive(Debug, Clone)]
pub struct Connector {
    endpoint: Endpoint,
    api_version: Option<String>,
    connect_timeout: Duration,
    read_timeout: Option<Duration>,
    resolver: AuthResolver,
}

impl Connector {
    pub fn new(endpoint: Endpoint, resolver: AuthResolver) -> Self {
        Self {
            endpoint,
            api_version: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: None,
            resolver,
        }
    }

    /// Build a connector from loaded configuration.
    pub fn from_config(config: &Config) -> crate::error::Result<Self> {
        let store = Arc::new(config.registry_auth.credential_store()?);
        let mut connector = Self::new(config.engine.endpoint()?, AuthResolver::new(store))
            .with_connect_timeout(config.engine.connect_timeout);
        if let Some(version) = &config.engine.api_version {
            connector = connector.with_api_version(version.clone());
        }
        if let Some(limit) = config.engine.read_timeout {
            connector = connector.with_read_timeout(limit);
        }
        Ok(connector)
    }

    /// Pin the API version, e.g. `1.41`.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Maximum wait for the next chunk of a response.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn resolver(&self) -> &AuthResolver {
        &self.resolver
    }

    async fn send(&self, request: EngineRequest) -> Result<EngineResponse, ConnectorError> {
        let uri = request.uri(self.api_version.as_deref());
        tracing::debug!(method = %request.method, uri = %uri, endpoint = %self.endpoint, "sending engine request");

        let mut builder = hyper::Request::builder()
            .method(request.method)
            .uri(&uri)
            .header("Host", self.endpoint.host_header());
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        let req = builder
            .body(Full::new(request.body))
            .map_err(|e| ConnectorError::Protocol(format!("failed to build request: {}", e)))?;

        let (mut sender, guard) = self.endpoint.connect(self.connect_timeout).await?;

        let sending = sender.send_request(req);
        let resp = match self.read_timeout {
            Some(limit) => tokio::time::timeout(limit, sending).await.map_err(|_| {
                ConnectorError::Transport(format!("engine did not respond within {:?}", limit))
            })?,
            None => sending.await,
        }
        .map_err(|e| ConnectorError::Transport(format!("request failed: {}", e)))?;

        let status = resp.status().as_u16();
        tracing::debug!(status, uri = %uri, "engine responded");

        Ok(EngineResponse {
            status,
            body: resp.into_body(),
            _guard: guard,
        })
    }

    /// Send a streaming request and drain its progress events.
    async fn stream<F>(
        &self,
        request: EngineRequest,
        cancel: &CancellationToken,
        on_progress: F,
    ) -> Result<(), ConnectorError>
    where
        F: FnMut(&ProgressEvent) + Send,
    {
        if cancel.is_cancelled() {
            return Err(ConnectorError::Cancelled);
        }

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ConnectorError::Cancelled),
            response = self.send(request) => response?,
        };

        if !(200..300).contains(&response.status) {
            let status = response.status;
            let message = error_message(response, self.read_timeout).await;
            return Err(ConnectorError::Api { status, message });
        }

        drain_progress(response, self.read_timeout, cancel, on_progress).await
    }
}

impl Sealed for Connector {}

#[async_trait]
impl ImageOps for Connector {
    async fn pull<F>(
        &self,
        params: &PullParams,
        cancel: &CancellationToken,
        on_progress: F,
    ) -> Result<(), ConnectorError>
    where
        F: FnMut(&ProgressEvent) + Send,
    {
        let request = pull_request(params, &self.resolver);
        self.stream(request, cancel, on_progress).await
    }

    async fn push<F>(
        &self,
        params: &PushParams,
        cancel: &CancellationToken,
        mut on_progress: F,
    ) -> Result<Option<String>, ConnectorError>
    where
        F: FnMut(&ProgressEvent) + Send,
    {
        let request = push_request(params, &self.resolver);
        let mut digest = None;
        self.stream(request, cancel, |event| {
            if let Some(found) = pushed_digest(event) {
                digest = Some(found);
            }
            on_progress(event);
        })
        .await?;
        Ok(digest)
    }

    async fn build_image<F>(
        &self,
        params: &BuildImageParams,
        cancel: &CancellationToken,
        mut on_progress: F,
    ) -> Result<ImageId, ConnectorError>
    where
        F: FnMut(&ProgressEvent) + Send,
    {
        let archive = match params.context() {
            BuildContext::Directory(dir) => archive_context(dir).await?,
            BuildContext::Remote(_) => Bytes::new(),
        };
        let request = build_request(params, &self.resolver, archive);

        let mut image_id = None;
        self.stream(request, cancel, |event| {
            if let Some(found) = built_image_id(event) {
                image_id = Some(found);
            }
            on_progress(event);
        })
        .await?;

        image_id.map(ImageId::new).ok_or_else(|| {
            ConnectorError::Protocol("build finished without reporting an image id".to_string())
        })
    }
}

#[async_trait]
impl NetworkOps for Connector {
    async fn inspect_network(
        &self,
        params: &InspectNetworkParams,
    ) -> Result<NetworkDescriptor, ConnectorError> {
        let mut response = self.send(inspect_network_request(params)).await?;

        let status = response.status;
        match status {
            200..=299 => {}
            404 => {
                let message = error_message(response, self.read_timeout).await;
                let message = if message.is_empty() {
                    format!("network {}", params.network_id())
                } else {
                    message
                };
                return Err(ConnectorError::NotFound(message));
            }
            _ => {
                let message = error_message(response, self.read_timeout).await;
                return Err(ConnectorError::Api { status, message });
            }
        }

        let bytes = read_body(&mut response.body, self.read_timeout).await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ConnectorError::Protocol(format!("invalid network description: {}", e)))
    }
}

/// Tar the build directory on the blocking pool.
async fn archive_context(dir: &Path) -> Result<Bytes, ConnectorError> {
    let dir = dir.to_path_buf();
    let archive = tokio::task::spawn_blocking(move || -> std::io::Result<Vec<u8>> {
        let mut tar_data = Vec::new();
        {
            let mut builder = tar::Builder::new(&mut tar_data);
            builder.append_dir_all(".", &dir)?;
            builder.finish()?;
        }
        Ok(tar_data)
    })
    .await
    .map_err(|e| ConnectorError::BuildContext(std::io::Error::other(e)))?
    .map_err(ConnectorError::BuildContext)?;

    Ok(Bytes::from(archive))
}

/// Image ID from a build event: `aux.ID`, the classic "Successfully built"
/// line, or the bare ID printed in quiet mode.
fn built_image_id(event: &ProgressEvent) -> Option<String> {
    if let Some(id) = event.aux.as_ref().and_then(|aux| aux.id.clone()) {
        return Some(id);
    }
    let line = event.stream.as_deref()?.trim();
    if let Some(id) = line.strip_prefix("Successfully built ") {
        return Some(id.trim().to_string());
    }
    line.starts_with("sha256:").then(|| line.to_string())
}

/// Digest from a push event: `aux.Digest` or the `digest: sha256:...` status.
fn pushed_digest(event: &ProgressEvent) -> Option<String> {
    if let Some(digest) = event.aux.as_ref().and_then(|aux| aux.digest.clone()) {
        return Some(digest);
    }
    let status = event.status.as_deref()?;
    let (_, rest) = status.split_once("digest: ")?;
    rest.split_whitespace().next().map(str::to_string)
}
