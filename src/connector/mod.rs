// ABOUTME: Engine connector: endpoints, request construction and response streaming.
// ABOUTME: Resolves registry auth per call and reports progress through a callback.

mod client;
mod endpoint;
mod error;
pub mod request;
mod stream;
pub mod traits;

pub use client::Connector;
pub use endpoint::{DEFAULT_SOCKET, Endpoint, EndpointError};
pub use error::{ConnectorError, ErrorKind};
pub use traits::{ImageOps, NetworkOps};
