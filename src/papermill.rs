//! Papermill engine invocation.

use std::ffi::OsString;
use std::path::Path;

use tokio::process::Command;

use crate::error::RunError;

/// Handle to the external notebook-execution engine.
#[derive(Debug, Clone)]
pub struct Engine {
    program: String,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            program: "papermill".to_string(),
        }
    }

    /// Use a different engine program (tests substitute a stub binary).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Execute `input` into `output`, launching `kernel` when given and
    /// injecting the parameter file when given.
    ///
    /// Output is captured, not streamed. A non-zero completion status maps
    /// to [`RunError::Execution`] carrying the engine's stderr; which cell
    /// failed is not extracted from it.
    pub async fn execute(
        &self,
        input: &Path,
        output: &Path,
        kernel: Option<&str>,
        parameters: Option<&Path>,
    ) -> Result<(), RunError> {
        let result = Command::new(&self.program)
            .args(build_args(input, output, kernel, parameters))
            .output()
            .await
            .map_err(|e| RunError::Execution(e.to_string()))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(RunError::Execution(stderr.trim().to_string()));
        }

        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Assemble the engine argument list:
/// `<input> <output> [--kernel <name>] [-f <parameters>]`.
fn build_args(
    input: &Path,
    output: &Path,
    kernel: Option<&str>,
    parameters: Option<&Path>,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![input.into(), output.into()];
    if let Some(kernel) = kernel {
        args.push("--kernel".into());
        args.push(kernel.into());
    }
    if let Some(parameters) = parameters {
        args.push("-f".into());
        args.push(parameters.into());
    }
    args
}
