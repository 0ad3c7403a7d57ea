// ABOUTME: Typed identifiers and engine descriptions returned by operations.
// ABOUTME: Keeps image and network IDs from being passed for one another.

mod id;
mod network;

pub use id::{ImageId, NetworkId};
pub use network::{Ipam, IpamConfig, NetworkDescriptor, NetworkEndpoint};
