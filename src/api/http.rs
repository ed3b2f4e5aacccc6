//! Shared request handling for the HTTP provider clients.

use crate::error::{AppError, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

/// Builds a `reqwest` client whose every request is bounded by `timeout`.
pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("aqi-engine/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(AppError::from)
}

/// Sends `request`, checks the status and decodes the JSON body.
///
/// `what` names the call in log lines. API keys never appear in logs since the
/// URL is logged without its query string.
pub(crate) async fn get_json<T: DeserializeOwned>(request: RequestBuilder, what: &str) -> Result<T> {
    let response = request.send().await.map_err(|e| {
        let e = e.without_url();
        if e.is_timeout() {
            error!("{} request timed out: {}", what, e);
        } else {
            error!("Error sending {} request: {}", what, e);
        }
        AppError::from(e)
    })?;

    // Check HTTP status code and handle potential API errors
    let status = response.status();
    if !status.is_success() {
        error!(
            "{} request to {} failed with status {}",
            what,
            response.url().path(),
            status
        );
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            error!("Received 401/403. Check the API key for {}.", what);
        }
        return Err(AppError::Provider(format!(
            "{} request failed with status {}",
            what, status
        )));
    }

    let body = response.text().await.map_err(|e| {
        let e = e.without_url();
        error!("Error reading {} response body: {}", what, e);
        AppError::from(e)
    })?;

    serde_json::from_str(&body).map_err(|e| {
        error!("Error parsing {} response JSON: {}", what, e);
        debug!(
            "Unparseable {} body (first 200 chars): {}",
            what,
            body.chars().take(200).collect::<String>()
        );
        AppError::from(e)
    })
}
