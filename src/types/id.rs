// ABOUTME: Newtype identifiers for engine-assigned image and network IDs.
// ABOUTME: Serialize transparently as the engine's plain string form.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! engine_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        #[must_use = "IDs reference engine resources and should not be ignored"]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }

            /// Twelve-character form without the digest algorithm prefix.
            pub fn short(&self) -> &str {
                let hex = self.0.strip_prefix("sha256:").unwrap_or(&self.0);
                hex.get(..12).unwrap_or(hex)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

engine_id!(
    /// Image ID as reported by the engine, usually `sha256:<hex>`.
    ImageId
);

engine_id!(
    /// Network ID as reported by the engine.
    NetworkId
);
