use async_trait::async_trait;
use thiserror::Error;

use crate::config::HostConfig;
use crate::probe::{deliver, HostError, HostSurface, IntegrationOutcome};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("request for {url} failed: {reason}")]
    Network { url: String, reason: String },
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("response from {url} is not text: {reason}")]
    Decode { url: String, reason: String },
    #[error("host rejected the map: {0}")]
    Host(#[from] HostError),
}

/// Status line and body of one GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    /// Empty unless the status was successful.
    pub body: String,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Uncached GET transport. Implementations skip reading the body for
/// unsuccessful statuses.
#[async_trait(?Send)]
pub trait ResourceFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, LoadError>;
}

/// Follow-up hooks for a finished load attempt.
pub trait LoadObserver {
    fn delivered(&self, outcome: &IntegrationOutcome, refresh_after_ms: u32);
    fn failed(&self, error: &LoadError);
}

/// Fetched map text; dropped once delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResource {
    pub url: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy)]
pub struct LoadRequest<'a> {
    pub url: &'a str,
    /// File name shown to the host when a drop is simulated.
    pub file_name: &'a str,
    /// Timestamp used for cache busting.
    pub now_ms: f64,
}

/// Append a `cb=<now_ms>` query parameter.
pub fn cache_busted(url: &str, now_ms: f64) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}cb={}", now_ms.max(0.0) as u64)
}

async fn fetch_resource<F: ResourceFetcher + ?Sized>(
    fetcher: &F,
    request: &LoadRequest<'_>,
) -> Result<RemoteResource, LoadError> {
    let resp = fetcher.fetch(&cache_busted(request.url, request.now_ms)).await?;
    if !resp.is_success() {
        return Err(LoadError::Status {
            status: resp.status,
            url: request.url.to_string(),
        });
    }
    Ok(RemoteResource {
        url: request.url.to_string(),
        text: resp.body,
    })
}

/// Fetch the map and deliver it to the host.
///
/// The observer hears about the result exactly once: `delivered` with the
/// configured refresh delay on success, `failed` otherwise. Nothing is
/// retried.
pub async fn load_into_host<F, H, O>(
    fetcher: &F,
    host: &H,
    observer: &O,
    config: &HostConfig,
    request: LoadRequest<'_>,
) -> Result<IntegrationOutcome, LoadError>
where
    F: ResourceFetcher + ?Sized,
    H: HostSurface + ?Sized,
    O: LoadObserver + ?Sized,
{
    let result = match fetch_resource(fetcher, &request).await {
        Ok(resource) => {
            deliver(host, config, &resource, request.file_name).map_err(LoadError::from)
        }
        Err(err) => Err(err),
    };
    match &result {
        Ok(outcome) => observer.delivered(outcome, config.refresh_delay_ms),
        Err(err) => observer.failed(err),
    }
    result
}
