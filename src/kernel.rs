//! Runtime kernel selection.
//!
//! Papermill launches a named kernel; which names exist depends on what the
//! image has installed. This module asks `jupyter kernelspec list --json`
//! for the installed kernelspecs and picks one matching the requested
//! Python version.

use std::collections::BTreeMap;

use serde::Deserialize;
use tokio::process::Command;

use crate::error::RunError;

/// Output shape of `jupyter kernelspec list --json`. Spec contents are kept
/// opaque; selection only looks at the kernel names.
#[derive(Debug, Deserialize)]
struct KernelspecList {
    kernelspecs: BTreeMap<String, serde_json::Value>,
}

/// Probes the kernelspec listing and resolves a kernel name.
#[derive(Debug, Clone)]
pub struct KernelSelector {
    program: String,
}

impl KernelSelector {
    pub fn new() -> Self {
        Self {
            program: "jupyter".to_string(),
        }
    }

    /// Use a different listing program (tests substitute a stub binary).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Resolve the kernel name for the requested Python version.
    ///
    /// Prefers a kernel whose name contains `python<version>`, falls back
    /// to any kernel with `python` in its name, and fails with
    /// [`RunError::Kernel`] when the listing cannot be obtained or no
    /// Python kernel is installed. Every failure message carries the
    /// `Error getting kernel:` prefix, the no-kernel case included.
    pub async fn select(&self, python_version: &str) -> Result<String, RunError> {
        let output = Command::new(&self.program)
            .args(["kernelspec", "list", "--json"])
            .output()
            .await
            .map_err(kernel_err)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(kernel_err(stderr.trim()));
        }

        let listing: KernelspecList =
            serde_json::from_slice(&output.stdout).map_err(kernel_err)?;

        pick_kernel(&listing.kernelspecs, python_version).ok_or_else(|| {
            kernel_err(format!(
                "No Python kernel found for version {python_version}"
            ))
        })
    }
}

/// Every discovery failure, the no-kernel case included, carries the
/// `Error getting kernel:` prefix.
fn kernel_err(cause: impl std::fmt::Display) -> RunError {
    RunError::Kernel(format!("Error getting kernel: {cause}"))
}

impl Default for KernelSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick a kernel name from the listing: exact `python<version>` substring
/// match first, then any kernel with `python` in its name.
fn pick_kernel(
    specs: &BTreeMap<String, serde_json::Value>,
    python_version: &str,
) -> Option<String> {
    let versioned = format!("python{python_version}");
    if let Some(name) = specs.keys().find(|k| k.to_lowercase().contains(&versioned)) {
        return Some(name.clone());
    }
    specs
        .keys()
        .find(|k| k.to_lowercase().contains("python"))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs(names: &[&str]) -> BTreeMap<String, serde_json::Value> {
        names
            .iter()
            .map(|n| (n.to_string(), serde_json::json!({})))
            .collect()
    }

    #[test]
    fn prefers_exact_version_match() {
        let specs = specs(&["ir", "python3", "python3.11"]);
        assert_eq!(pick_kernel(&specs, "3.11").as_deref(), Some("python3.11"));
    }

    #[test]
    fn version_match_is_case_insensitive() {
        let specs = specs(&["Python3.12-conda"]);
        assert_eq!(
            pick_kernel(&specs, "3.12").as_deref(),
            Some("Python3.12-conda")
        );
    }

    #[test]
    fn falls_back_to_any_python_kernel() {
        let specs = specs(&["ir", "python3"]);
        assert_eq!(pick_kernel(&specs, "3.11").as_deref(), Some("python3"));
    }

    #[test]
    fn returns_none_without_python_kernels() {
        let specs = specs(&["ir", "julia-1.9"]);
        assert_eq!(pick_kernel(&specs, "3.11"), None);
    }

    #[test]
    fn parses_kernelspec_listing_json() {
        let raw = r#"{
            "kernelspecs": {
                "python311": {
                    "resource_dir": "/opt/kernels/python311",
                    "spec": {
                        "argv": ["python", "-m", "ipykernel_launcher"],
                        "display_name": "Python 3.11",
                        "language": "python"
                    }
                }
            }
        }"#;
        let listing: KernelspecList = serde_json::from_str(raw).unwrap();
        assert_eq!(
            pick_kernel(&listing.kernelspecs, "311").as_deref(),
            Some("python311")
        );
    }
}
