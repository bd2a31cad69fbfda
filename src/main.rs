//! `nbrun` -- containerized notebook runner.
//!
//! Downloads a notebook document, executes it with papermill, and reports
//! the terminal status to an optional webhook endpoint.
//!
//! # Environment variables
//!
//! | Variable         | Required | Default | Description                             |
//! |------------------|----------|---------|-----------------------------------------|
//! | `NOTEBOOK`       | yes      | --      | URL of the notebook document to execute |
//! | `PARAMETERS`     | no       | --      | JSON injected as the parameter set      |
//! | `WEBHOOK`        | no       | --      | completion notification endpoint        |
//! | `WEBHOOK_SECRET` | no       | --      | bearer credential for the notification  |
//! | `PYTHON_VERSION` | no       | `3.11`  | kernel selection hint                   |

use nbrun::config::Config;
use nbrun::runner::Runner;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nbrun=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let outcome = Runner::new(config).run().await;

    std::process::exit(if outcome.is_success() { 0 } else { 1 });
}
