//! Environment-driven run configuration.

use std::env;

use crate::error::RunError;

/// Kernel selection hint used when `PYTHON_VERSION` is not set.
pub const DEFAULT_PYTHON_VERSION: &str = "3.11";

/// Immutable configuration for a single run, read from the environment once
/// at startup and passed along; nothing reads the environment mid-flow.
///
/// All fields are raw input. Requiredness of the notebook source and the
/// shape of the parameters are enforced by the orchestrator's validation
/// step, not by construction, so a validation failure can still be reported
/// through the webhook that was read alongside it.
#[derive(Debug, Clone)]
pub struct Config {
    /// `NOTEBOOK`: URL of the notebook document to fetch and execute.
    pub notebook: Option<String>,
    /// `PARAMETERS`: JSON injected as the papermill parameter set.
    pub parameters: Option<String>,
    /// `WEBHOOK`: destination for the completion notification.
    pub webhook: Option<String>,
    /// `WEBHOOK_SECRET`: bearer credential attached to the notification.
    pub webhook_secret: Option<String>,
    /// `PYTHON_VERSION`: kernel selection hint.
    pub python_version: String,
}

impl Config {
    /// Read the configuration from the process environment. Unset and
    /// empty variables are treated alike, matching shell truthiness.
    pub fn from_env() -> Self {
        Self {
            notebook: env_opt("NOTEBOOK"),
            parameters: env_opt("PARAMETERS"),
            webhook: env_opt("WEBHOOK"),
            webhook_secret: env_opt("WEBHOOK_SECRET"),
            python_version: env_opt("PYTHON_VERSION")
                .unwrap_or_else(|| DEFAULT_PYTHON_VERSION.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notebook: None,
            parameters: None,
            webhook: None,
            webhook_secret: None,
            python_version: DEFAULT_PYTHON_VERSION.to_string(),
        }
    }
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

/// Validate a raw `PARAMETERS` value and re-serialize it with two-space
/// indentation, the form the parameter file is written in.
///
/// Any JSON value is accepted; whether it is usable as a parameter set is
/// the engine's call.
pub fn format_parameters(raw: &str) -> Result<String, RunError> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| RunError::Config(format!("Invalid JSON parameters: {e}")))?;
    serde_json::to_string_pretty(&value)
        .map_err(|e| RunError::Config(format!("Invalid JSON parameters: {e}")))
}
