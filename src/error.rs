//! Error taxonomy for the run pipeline.

use thiserror::Error;

/// Failures surfaced by the run pipeline.
///
/// Every variant except [`RunError::Notify`] is fatal: the run stops at the
/// first failure, the failure is reported through the webhook when one is
/// configured, and the process exits non-zero. `Notify` is produced by the
/// best-effort webhook call and is logged, never propagated.
///
/// The `Display` strings double as the webhook `message` field, so the
/// wording for missing input, download failures, and execution failures is
/// part of the external contract.
#[derive(Debug, Error)]
pub enum RunError {
    /// Missing or malformed required input. The message is complete as-is,
    /// e.g. `NOTEBOOK environment variable is not set`.
    #[error("{0}")]
    Config(String),

    /// The notebook document could not be retrieved: transport error or a
    /// non-2xx response.
    #[error("Failed to download notebook: {0}")]
    Fetch(String),

    /// Kernelspec discovery failed or no usable kernel was installed. The
    /// message is complete as-is and starts with `Error getting kernel:`.
    #[error("{0}")]
    Kernel(String),

    /// The execution engine reported a non-zero completion status. Carries
    /// the engine's stderr.
    #[error("Notebook execution failed: {0}")]
    Execution(String),

    /// The completion notification could not be delivered. Never fatal.
    #[error("Failed to send webhook: {0}")]
    Notify(String),

    /// Scratch workspace I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
