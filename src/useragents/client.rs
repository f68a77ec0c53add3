// src/useragents/client.rs
use crate::utils::error::FetchError;
use reqwest::header;
use std::time::Duration;

pub const DEFAULT_SOURCE_URL: &str = "https://useragents.me";

// Plain desktop Chrome identification; the page refuses obvious bots.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36";

/// Creates a reqwest client with the browser User-Agent and the fetch deadline.
fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Maps a non-2xx status onto the matching `FetchError`.
fn check_status(status: reqwest::StatusCode, url: &str) -> Result<(), FetchError> {
    if status.is_success() {
        return Ok(());
    }
    tracing::error!("HTTP error status: {} for URL: {}", status, url);
    if status == reqwest::StatusCode::FORBIDDEN {
        tracing::warn!("Received 403 Forbidden - the User-Agent may have been blocked.");
        return Err(FetchError::Forbidden(url.to_string()));
    }
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(FetchError::PageNotFound(url.to_string()));
    }
    Err(FetchError::Http(status))
}

/// Downloads the statistics page with a single GET. No retries.
pub async fn fetch_page(url: &str, timeout: Duration) -> Result<String, FetchError> {
    let client = build_client(timeout)?;

    tracing::info!("Downloading page from: {}", url);
    tracing::debug!("Using User-Agent: {}", BROWSER_USER_AGENT);

    let response = client.get(url)
        .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
        .send()
        .await?; // Propagates reqwest::Error as FetchError::Network

    check_status(response.status(), url)?;

    let body = response.text().await?;
    tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_status_mapping() {
        assert!(check_status(StatusCode::OK, DEFAULT_SOURCE_URL).is_ok());
        assert!(matches!(check_status(StatusCode::FORBIDDEN, DEFAULT_SOURCE_URL), Err(FetchError::Forbidden(_))));
        assert!(matches!(check_status(StatusCode::NOT_FOUND, DEFAULT_SOURCE_URL), Err(FetchError::PageNotFound(_))));
        assert!(matches!(
            check_status(StatusCode::BAD_GATEWAY, DEFAULT_SOURCE_URL),
            Err(FetchError::Http(StatusCode::BAD_GATEWAY))
        ));
    }

    #[test]
    fn test_client_builds_with_deadline() {
        assert!(build_client(Duration::from_secs(5)).is_ok());
    }
}
