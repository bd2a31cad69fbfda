//! Notebook document download.

use std::path::Path;

use reqwest::{Client, Url};

use crate::error::RunError;

/// Download the document at `url` into `dest`.
///
/// A single GET, redirects followed (client default), no retry. Transport
/// errors and non-2xx responses map to [`RunError::Fetch`].
pub async fn download(client: &Client, url: &Url, dest: &Path) -> Result<(), RunError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| RunError::Fetch(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(RunError::Fetch(format!("HTTP status {status}")));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| RunError::Fetch(e.to_string()))?;
    tokio::fs::write(dest, &bytes)
        .await
        .map_err(|e| RunError::Fetch(e.to_string()))?;

    Ok(())
}
