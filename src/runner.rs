//! The run orchestrator: validate, fetch, select kernel, execute, notify.

use reqwest::Url;

use crate::config::{self, Config};
use crate::error::RunError;
use crate::fetch;
use crate::kernel::KernelSelector;
use crate::papermill::Engine;
use crate::webhook::{Notifier, Outcome};

/// The required inputs in their checked form, produced by the validation
/// step from the raw [`Config`].
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    /// Parsed notebook source URL.
    pub notebook: Url,
    /// Pretty-formatted parameters JSON, ready to be written to the
    /// parameter file.
    pub parameters: Option<String>,
}

impl ExecutionRequest {
    /// Validate the raw configuration into a runnable request.
    ///
    /// Fails with [`RunError::Config`] when the notebook source is absent
    /// or not a well-formed URL, or when `PARAMETERS` is not valid JSON.
    pub fn validate(config: &Config) -> Result<Self, RunError> {
        let source = config
            .notebook
            .as_deref()
            .ok_or_else(|| RunError::Config("NOTEBOOK environment variable is not set".into()))?;

        let notebook = Url::parse(source)
            .map_err(|e| RunError::Config(format!("NOTEBOOK is not a valid URL: {e}")))?;

        let parameters = config
            .parameters
            .as_deref()
            .map(config::format_parameters)
            .transpose()?;

        Ok(Self {
            notebook,
            parameters,
        })
    }
}

/// Drives one run end to end.
///
/// Steps run strictly in order and the first failure short-circuits the
/// rest; both terminal paths route through the notifier before the caller
/// maps the outcome to an exit code.
pub struct Runner {
    config: Config,
    client: reqwest::Client,
    engine: Engine,
    kernels: KernelSelector,
    notifier: Notifier,
}

impl Runner {
    pub fn new(config: Config) -> Self {
        let client = reqwest::Client::new();
        let notifier = Notifier::new(
            client.clone(),
            config.webhook.clone(),
            config.webhook_secret.clone(),
        );
        Self {
            config,
            client,
            engine: Engine::new(),
            kernels: KernelSelector::new(),
            notifier,
        }
    }

    /// Replace the execution engine (tests substitute a stub binary).
    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    /// Replace the kernel selector (tests substitute a stub binary).
    pub fn with_kernel_selector(mut self, kernels: KernelSelector) -> Self {
        self.kernels = kernels;
        self
    }

    /// Run the pipeline and report the outcome through the webhook.
    pub async fn run(&self) -> Outcome {
        let outcome = match self.execute().await {
            Ok(()) => Outcome::success(),
            Err(err) => {
                tracing::error!("{err}");
                Outcome::failed(err.to_string())
            }
        };

        self.notifier.notify(&outcome).await;
        outcome
    }

    async fn execute(&self) -> Result<(), RunError> {
        let request = ExecutionRequest::validate(&self.config)?;

        // The workspace owns every artifact of the run, the parameter file
        // included; dropping it removes them on success and failure alike.
        let workspace = tempfile::tempdir()?;
        let notebook_path = workspace.path().join("notebook.ipynb");
        let output_path = workspace.path().join("output.ipynb");

        tracing::info!("Downloading notebook from {}", request.notebook);
        fetch::download(&self.client, &request.notebook, &notebook_path).await?;

        tracing::info!(
            "Checking available kernels for Python {}...",
            self.config.python_version
        );
        let kernel = self.kernels.select(&self.config.python_version).await?;
        tracing::info!("Using kernel: {kernel}");

        let parameters_path = match request.parameters.as_deref() {
            Some(formatted) => {
                tracing::info!("Executing notebook with parameters");
                tracing::info!("Formatted parameters:\n{formatted}");
                let path = workspace.path().join("parameters.json");
                tokio::fs::write(&path, formatted).await?;
                Some(path)
            }
            None => {
                tracing::info!("Executing notebook without parameters");
                None
            }
        };

        self.engine
            .execute(
                &notebook_path,
                &output_path,
                Some(&kernel),
                parameters_path.as_deref(),
            )
            .await?;

        tracing::info!("Notebook execution completed successfully");
        Ok(())
    }
}
