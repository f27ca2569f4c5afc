//! Shared plumbing for the backend clients.

use std::time::Duration;

use reqwest::{Client, Response, Url};

/// Build a client with the configured request timeout.
pub(crate) fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).build()
}

/// Join path segments onto a base URL, percent-encoding each one.
pub(crate) fn endpoint(base: &str, segments: &[&str]) -> Result<Url, String> {
    let mut url = Url::parse(base).map_err(|err| format!("{base}: {err}"))?;
    url.path_segments_mut()
        .map_err(|()| format!("{base}: cannot be a base URL"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Status code and best-effort message from a failed response.
///
/// Prefers the JSON body's `message`, then the raw body, then the status
/// reason.
pub(crate) async fn failure(response: Response) -> (u16, String) {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    (status.as_u16(), failure_message(status.as_u16(), &body, status.canonical_reason()))
}

fn failure_message(status: u16, body: &str, reason: Option<&str>) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned));

    from_json
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_owned()))
        .unwrap_or_else(|| reason.map_or_else(|| format!("HTTP {status}"), str::to_owned))
}
