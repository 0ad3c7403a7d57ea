// ABOUTME: Parameters for inspecting a network by ID or name.
// ABOUTME: The identifier is passed to the engine verbatim.

use super::{ValidationError, required};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InspectNetworkParams {
    network_id: String,
}

impl InspectNetworkParams {
    pub fn create(network_id: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            network_id: required("network id", network_id)?,
        })
    }

    pub fn network_id(&self) -> &str {
        &self.network_id
    }
}
