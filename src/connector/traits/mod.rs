// ABOUTME: Capability traits for engine operations.
// ABOUTME: ImageOps streams pull/push/build progress; NetworkOps inspects networks.

mod image;
mod network;
pub(crate) mod sealed;

pub use image::ImageOps;
pub use network::NetworkOps;
