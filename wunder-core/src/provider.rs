use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde_json::Value;

use crate::model::FetchOutcome;

const BASE_URL: &str = "http://api.wunderground.com/api";

/// Client for the Weather Underground combined conditions + astronomy
/// endpoint.
#[derive(Debug, Clone)]
pub struct WundergroundClient {
    api_key: String,
    http: Client,
}

impl WundergroundClient {
    pub fn new(api_key: String) -> Self {
        Self { api_key, http: Client::new() }
    }

    /// Fetch current conditions and astronomy data for one location.
    ///
    /// Service-level rejections (bad key, ambiguous location) arrive in a
    /// successful HTTP body and come back as [`FetchOutcome`] variants;
    /// transport and decode failures are errors. There is no retry.
    pub async fn conditions(&self, location: &str) -> Result<FetchOutcome> {
        let url = format!("{BASE_URL}/{}/conditions/astronomy/q/{}.json", self.api_key, location);
        log::info!("Retrieving weather report from {url}");

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .context("Failed to send request to Weather Underground")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Weather Underground response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Weather Underground request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        log::debug!("json response received: {body}");

        let document: Value =
            serde_json::from_str(&body).context("Failed to parse Weather Underground JSON")?;

        Ok(classify(document))
    }
}

/// Split a decoded response document into report, service error, or
/// ambiguous-location candidates.
///
/// The service flags both failure modes inside the top-level `response`
/// object: an `error` entry carries a description, a `results` list
/// enumerates the locations a query could have meant.
pub fn classify(document: Value) -> FetchOutcome {
    let Some(response) = document.get("response") else {
        return FetchOutcome::Report(document);
    };

    if let Some(error) = response.get("error") {
        let description = error
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("no description provided")
            .to_string();
        return FetchOutcome::ApiError(description);
    }

    if let Some(results) = response.get("results").and_then(Value::as_array) {
        let candidates = results.iter().filter_map(|r| r.as_object().cloned()).collect();
        return FetchOutcome::AmbiguousLocation(candidates);
    }

    FetchOutcome::Report(document)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
