// ABOUTME: Immutable, validated parameter objects for engine operations.
// ABOUTME: Factories reject missing required fields; derived names are pure functions.

mod build;
mod network;
mod pull;
mod push;

pub use build::{BuildContext, BuildImageParams};
pub use network::InspectNetworkParams;
pub use pull::PullParams;
pub use push::PushParams;

/// A required parameter was missing or empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

fn required(field: &'static str, value: impl Into<String>) -> Result<String, ValidationError> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value)
}

/// Empty optional strings are treated as unset.
fn optional(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    (!value.is_empty()).then_some(value)
}
