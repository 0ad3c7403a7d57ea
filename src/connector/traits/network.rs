// ABOUTME: Network operations trait.
// ABOUTME: Inspection is a single request/response; no progress stream.

use super::sealed::Sealed;
use crate::connector::ConnectorError;
use crate::params::InspectNetworkParams;
use crate::types::NetworkDescriptor;
use async_trait::async_trait;

#[async_trait]
pub trait NetworkOps: Sealed + Send + Sync {
    /// Describe a network. Unknown IDs fail with [`ConnectorError::NotFound`].
    async fn inspect_network(
        &self,
        params: &InspectNetworkParams,
    ) -> Result<NetworkDescriptor, ConnectorError>;
}
