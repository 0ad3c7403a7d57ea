// ABOUTME: Config values that are either literal or read from the environment.
// ABOUTME: Keeps registry passwords out of the config file.

use crate::error::{Error, Result};
use serde::Deserialize;

/// `password: secret` or `password: { env: REGISTRY_PASSWORD, default: "" }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Literal(String),
    FromEnv {
        #[serde(rename = "env")]
        var: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl EnvValue {
    pub fn resolve(&self) -> Result<String> {
        match self {
            EnvValue::Literal(s) => Ok(s.clone()),
            EnvValue::FromEnv { var, default } => match std::env::var(var) {
                Ok(val) => Ok(val),
                Err(_) => default
                    .clone()
                    .ok_or_else(|| Error::MissingEnvVar(var.clone())),
            },
        }
    }
}

impl Default for EnvValue {
    fn default() -> Self {
        EnvValue::Literal(String::new())
    }
}
