// ABOUTME: Sealed trait pattern for connector capability traits.
// ABOUTME: Only this crate's connectors may implement the operation traits.

pub trait Sealed {}
