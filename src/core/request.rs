use crate::domain::model::LoadOutcome;
use crate::domain::ports::{FetchResponse, Fetcher};
use crate::utils::error::{DashError, Result};

/// Why a request produced no usable body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    pub status: Option<u16>,
    pub reason: String,
}

impl RequestFailure {
    pub fn into_outcome<T>(self) -> LoadOutcome<T> {
        LoadOutcome::Failed {
            status: self.status,
            reason: self.reason,
        }
    }
}

/// Fetch `path`, turning transport errors and non-success statuses into a
/// `RequestFailure`. Only errors that are not about the request itself
/// (such as an unresolvable path) are returned as `Err`.
pub async fn fetch_checked<F: Fetcher + ?Sized>(
    fetcher: &F,
    path: &str,
) -> Result<std::result::Result<FetchResponse, RequestFailure>> {
    match fetcher.fetch(path).await {
        Ok(response) if response.is_success() => Ok(Ok(response)),
        Ok(response) => {
            tracing::warn!("Request to '{}' returned status {}", path, response.status);
            Ok(Err(RequestFailure {
                status: Some(response.status),
                reason: format!("HTTP status {}", response.status),
            }))
        }
        Err(DashError::TransportError(e)) => {
            tracing::warn!("Request to '{}' failed: {}", path, e);
            Ok(Err(RequestFailure {
                status: e.status().map(|s| s.as_u16()),
                reason: e.to_string(),
            }))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::HttpFetcher;
    use httpmock::prelude::*;

    fn dead_port_fetcher() -> HttpFetcher {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        HttpFetcher::new(&format!("http://127.0.0.1:{}/", port)).unwrap()
    }

    #[tokio::test]
    async fn test_refused_connection_is_request_failure() {
        let result = fetch_checked(&dead_port_fetcher(), "checker-states")
            .await
            .unwrap();

        let failure = result.unwrap_err();
        assert_eq!(failure.status, None);
        assert!(!failure.reason.is_empty());
        assert!(failure.into_outcome::<()>().is_failed());
    }

    #[tokio::test]
    async fn test_error_status_is_request_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/state");
            then.status(404);
        });

        let fetcher = HttpFetcher::new(&server.url("/")).unwrap();
        let failure = fetch_checked(&fetcher, "state").await.unwrap().unwrap_err();

        assert_eq!(
            failure,
            RequestFailure {
                status: Some(404),
                reason: "HTTP status 404".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_success_passes_response_through() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/state");
            then.status(200).body("{}");
        });

        let fetcher = HttpFetcher::new(&server.url("/")).unwrap();
        let response = fetch_checked(&fetcher, "state").await.unwrap().unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"{}");
    }

    #[tokio::test]
    async fn test_unresolvable_path_is_error() {
        let fetcher = HttpFetcher::new("http://127.0.0.1:1/").unwrap();
        let result = fetch_checked(&fetcher, "http://[::1").await;

        assert!(matches!(result, Err(DashError::InvalidUrl { .. })));
    }
}
