//! Downloading remote calendar feeds.
//!
//! This is the only module that performs network I/O. Failures here are
//! folded into the extraction result instead of being raised, so a dead feed
//! looks the same to callers as a feed with no reservations.

use tracing::{Instrument, debug, info, info_span, warn};

use crate::config::FetchConfig;
use crate::error::{HostcalError, HostcalResult};
use crate::extract::{Diagnostic, Extraction, extract};

/// How many bytes of the response body to log at debug level.
const SNIPPET_LEN: usize = 200;

/// GET a calendar feed and return the raw body.
///
/// Non-2xx responses are treated the same as connection errors.
pub async fn fetch_feed(url: &str, config: &FetchConfig) -> HostcalResult<Vec<u8>> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| HostcalError::Transport(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| HostcalError::Transport(e.to_string()))?;

    debug!(status = response.status().as_u16(), "Feed responded");

    let body = response
        .bytes()
        .await
        .map_err(|e| HostcalError::Transport(e.to_string()))?;

    let snippet = &body[..body.len().min(SNIPPET_LEN)];
    debug!(snippet = %String::from_utf8_lossy(snippet), "Feed body");

    Ok(body.to_vec())
}

/// Download a feed and extract its guest reservations.
pub async fn fetch_reservations(url: &str, config: &FetchConfig) -> Extraction {
    let span = info_span!("feed", url);

    async {
        let raw = match fetch_feed(url, config).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Could not download calendar feed");
                return Extraction::failed(Diagnostic::TransportFailure {
                    url: url.to_string(),
                    reason: e.to_string(),
                });
            }
        };

        let extraction = extract(&raw);
        info!(
            reservations = extraction.reservations.len(),
            "Fetched reservations from feed"
        );
        extraction
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one HTTP response on a free local port. The handle yields the
    /// raw request head the client sent.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/calendar.ics", listener.local_addr().unwrap());

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/calendar\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            String::from_utf8_lossy(&request).into_owned()
        });

        (url, server)
    }

    #[tokio::test]
    async fn test_invalid_url_is_transport_error() {
        let result = fetch_feed("not a url", &FetchConfig::default()).await;

        assert!(matches!(result, Err(HostcalError::Transport(_))));
    }

    #[tokio::test]
    async fn test_transport_failure_yields_empty_extraction() {
        let extraction = fetch_reservations("not a url", &FetchConfig::default()).await;

        assert!(extraction.reservations.is_empty());
        match extraction.diagnostics.as_slice() {
            [Diagnostic::TransportFailure { url, .. }] => assert_eq!(url, "not a url"),
            other => panic!("Expected a single TransportFailure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport_failure() {
        let (url, server) = serve_once("404 Not Found", "Not found").await;

        let extraction = fetch_reservations(&url, &FetchConfig::default()).await;
        let request = server.await.unwrap().to_ascii_lowercase();

        assert!(extraction.reservations.is_empty());
        match extraction.diagnostics.as_slice() {
            [Diagnostic::TransportFailure { url: failed, reason }] => {
                assert_eq!(failed, &url);
                assert!(reason.contains("404"), "{}", reason);
            }
            other => panic!("Expected a single TransportFailure, got {:?}", other),
        }
        assert!(
            request.contains("user-agent: mozilla/5.0 (compatible; cleaningapp/1.0)"),
            "{}",
            request
        );
    }

    #[tokio::test]
    async fn test_successful_feed_is_extracted() {
        let (url, server) = serve_once(
            "200 OK",
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nSUMMARY:Reserved\r\nDTSTART;VALUE=DATE:20250601\r\nDTEND;VALUE=DATE:20250604\r\nUID:served@airbnb.com\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n",
        )
        .await;

        let extraction = fetch_reservations(&url, &FetchConfig::default()).await;
        server.await.unwrap();

        assert!(extraction.diagnostics.is_empty(), "{:?}", extraction.diagnostics);
        assert_eq!(extraction.reservations.len(), 1);
        assert_eq!(extraction.reservations[0].identifier, "served@airbnb.com");
    }
}
