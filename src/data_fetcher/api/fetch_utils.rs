//! GET-and-decode against the Stats API, with retries for transient
//! failures.

use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::constants::retry::{INITIAL_BACKOFF_MS, MAX_RETRIES};
use crate::error::AppError;

/// Fetches `url` and decodes the JSON body into `T`.
///
/// Rate limits, server errors, timeouts and refused connections are retried
/// up to `MAX_RETRIES` times. The wait doubles after each retry unless the
/// server sends `Retry-After`.
#[instrument(skip(client))]
pub(crate) async fn fetch<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, AppError> {
    debug!("GET {url}");
    let response = send_with_retries(client, url).await?;

    let status = response.status();
    if !status.is_success() {
        warn!("GET {url} returned {status}");
        return Err(status_error(status, url));
    }

    let body = response.text().await?;
    serde_json::from_str::<T>(&body).map_err(|e| {
        warn!("Could not decode {} byte body from {url}: {e}", body.len());
        body_error(&body, e, url)
    })
}

async fn send_with_retries(client: &Client, url: &str) -> Result<Response, AppError> {
    let mut backoff = Duration::from_millis(INITIAL_BACKOFF_MS);
    let mut retries = 0u32;
    loop {
        let can_retry = retries < MAX_RETRIES;
        let wait = match client.get(url).send().await {
            Ok(resp) if can_retry && is_transient(resp.status()) => {
                let wait = retry_after(&resp).unwrap_or(backoff);
                warn!("{} from {url}, retry {}/{MAX_RETRIES} in {wait:?}", resp.status(), retries + 1);
                wait
            }
            Ok(resp) => return Ok(resp),
            Err(e) if can_retry && (e.is_timeout() || e.is_connect()) => {
                warn!("{e} for {url}, retry {}/{MAX_RETRIES} in {backoff:?}", retries + 1);
                backoff
            }
            Err(e) if e.is_timeout() => return Err(AppError::network_timeout(url)),
            Err(e) if e.is_connect() => {
                return Err(AppError::network_connection(url, e.to_string()));
            }
            Err(e) => return Err(AppError::ApiFetch(e)),
        };
        tokio::time::sleep(wait).await;
        retries += 1;
        backoff = backoff.saturating_mul(2);
    }
}

fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

fn status_error(status: StatusCode, url: &str) -> AppError {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Unknown error");
    match code {
        404 => AppError::api_not_found(url),
        429 => AppError::api_rate_limit(reason, url),
        400..=499 => AppError::api_client_error(code, reason, url),
        502 | 503 => AppError::api_service_unavailable(code, reason, url),
        _ => AppError::api_server_error(code, reason, url),
    }
}

/// Sorts a body that failed to decode into empty, not JSON, or JSON of
/// the wrong shape.
fn body_error(body: &str, error: serde_json::Error, url: &str) -> AppError {
    let trimmed = body.trim_start();
    if trimmed.is_empty() {
        AppError::api_no_data("Response body is empty", url)
    } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
        AppError::api_malformed_json("Response is not valid JSON", url)
    } else {
        AppError::api_unexpected_structure(error.to_string(), url)
    }
}
