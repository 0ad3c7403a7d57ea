// ABOUTME: Engine endpoint addresses and connection setup.
// ABOUTME: Supports unix sockets and plain TCP; one HTTP/1.1 connection per request.

use super::error::ConnectorError;
use bytes::Bytes;
use http_body_util::Full;
use hyper::client::conn::http1::SendRequest;
use hyper_util::rt::TokioIo;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpStream, UnixStream};
use tokio::task::JoinHandle;

/// Default engine socket.
pub const DEFAULT_SOCKET: &str = "/var/run/docker.sock";

/// Where the engine's remote API listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Unix(PathBuf),
    Tcp { host: String, port: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointError {
    #[error("endpoint cannot be empty")]
    Empty,

    #[error("unsupported endpoint scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid endpoint address: {0}")]
    InvalidAddress(String),
}

impl Default for Endpoint {
    fn default() -> Self {
        Endpoint::Unix(PathBuf::from(DEFAULT_SOCKET))
    }
}

impl Endpoint {
    /// Parse `unix:///path`, `tcp://host:port` or `http://host:port`.
    pub fn parse(input: &str) -> Result<Self, EndpointError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(EndpointError::Empty);
        }

        let Some((scheme, rest)) = input.split_once("://") else {
            return Err(EndpointError::InvalidAddress(input.to_string()));
        };

        match scheme {
            "unix" => {
                if rest.is_empty() {
                    return Err(EndpointError::InvalidAddress(input.to_string()));
                }
                Ok(Endpoint::Unix(PathBuf::from(rest)))
            }
            "tcp" | "http" => {
                let authority = rest.trim_end_matches('/');
                let (host, port) = authority
                    .rsplit_once(':')
                    .ok_or_else(|| EndpointError::InvalidAddress(input.to_string()))?;
                let port = port
                    .parse::<u16>()
                    .map_err(|_| EndpointError::InvalidAddress(input.to_string()))?;
                if host.is_empty() {
                    return Err(EndpointError::InvalidAddress(input.to_string()));
                }
                Ok(Endpoint::Tcp {
                    host: host.to_string(),
                    port,
                })
            }
            other => Err(EndpointError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Value for the HTTP `Host` header.
    pub fn host_header(&self) -> String {
        match self {
            Endpoint::Unix(_) => "localhost".to_string(),
            Endpoint::Tcp { host, port } => format!("{}:{}", host, port),
        }
    }

    /// Open a connection and complete the HTTP/1.1 handshake.
    pub(crate) async fn connect(
        &self,
        timeout: Duration,
    ) -> Result<(SendRequest<Full<Bytes>>, ConnectionGuard), ConnectorError> {
        let connecting = async {
            match self {
                Endpoint::Unix(path) => {
                    let stream = UnixStream::connect(path).await.map_err(|e| {
                        ConnectorError::Transport(format!("failed to connect to {}: {}", self, e))
                    })?;
                    handshake(stream).await
                }
                Endpoint::Tcp { host, port } => {
                    let stream = TcpStream::connect((host.as_str(), *port))
                        .await
                        .map_err(|e| {
                            ConnectorError::Transport(format!(
                                "failed to connect to {}: {}",
                                self, e
                            ))
                        })?;
                    handshake(stream).await
                }
            }
        };

        tokio::time::timeout(timeout, connecting)
            .await
            .map_err(|_| {
                ConnectorError::Transport(format!(
                    "timed out connecting to {} after {:?}",
                    self, timeout
                ))
            })?
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Unix(path) => write!(f, "unix://{}", path.display()),
            Endpoint::Tcp { host, port } => write!(f, "tcp://{}:{}", host, port),
        }
    }
}

/// Owns the task driving a connection. Dropping it closes the connection.
pub(crate) struct ConnectionGuard {
    driver: JoinHandle<()>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

async fn handshake<S>(
    stream: S,
) -> Result<(SendRequest<Full<Bytes>>, ConnectionGuard), ConnectorError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let (sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
        .await
        .map_err(|e| ConnectorError::Transport(format!("HTTP handshake failed: {}", e)))?;

    let driver = tokio::spawn(async move {
        if let Err(e) = conn.await {
            tracing::warn!("engine connection error: {}", e);
        }
    });

    Ok((sender, ConnectionGuard { driver }))
}
