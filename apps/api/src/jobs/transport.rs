//! HTTP transports for the job search API.
//!
//! Two interchangeable strategies behind [`JobTransport`]:
//! - [`ClientTransport`]: the async `reqwest` client with query and JSON helpers.
//! - [`RawTransport`]: a hand-built URL fetched with `ureq` on a blocking
//!   thread, body decoded from bytes. `ureq` brings its own HTTP and TLS
//!   stack, so it still works when the `reqwest` client cannot be built.
//!
//! Both report any non-200 status as [`FetchError::Status`].

use std::io::Read;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Bound on every request, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {0}")]
    Status(u16),

    #[error("Raw transport error: {0}")]
    Transport(Box<ureq::Error>),

    #[error("Failed to read response body: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Response body is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Transport task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait JobTransport: Send + Sync {
    /// Issues a GET and returns the decoded JSON body of a 200 response.
    async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<Value, FetchError>;

    /// Short label for logs.
    fn name(&self) -> &'static str;
}

/// High-level strategy: async `reqwest::Client`.
#[derive(Clone)]
pub struct ClientTransport {
    client: Client,
}

impl ClientTransport {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl JobTransport for ClientTransport {
    async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<Value, FetchError> {
        let response = self.client.get(url).query(params).send().await?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(FetchError::Status(status));
        }

        Ok(response.json::<Value>().await?)
    }

    fn name(&self) -> &'static str {
        "client"
    }
}

/// Fallback strategy: manual query string, blocking GET, bytes decoded by hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawTransport;

impl RawTransport {
    fn fetch_blocking(full_url: &str) -> Result<(u16, Vec<u8>), FetchError> {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        let response = match agent.get(full_url).call() {
            Ok(response) | Err(ureq::Error::Status(_, response)) => response,
            Err(e) => return Err(FetchError::Transport(Box::new(e))),
        };

        let status = response.status();
        let mut body = Vec::new();
        response.into_reader().read_to_end(&mut body)?;
        Ok((status, body))
    }
}

#[async_trait]
impl JobTransport for RawTransport {
    async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<Value, FetchError> {
        let full_url = build_url(url, params)?;
        debug!("Raw GET {}", redact(&full_url));

        let (status, body) =
            tokio::task::spawn_blocking(move || Self::fetch_blocking(&full_url)).await??;

        decode_body(status, body)
    }

    fn name(&self) -> &'static str {
        "raw"
    }
}

/// `url?k=v&...` with form-urlencoded values.
pub fn build_url(url: &str, params: &[(&str, String)]) -> Result<String, FetchError> {
    let base = url::Url::parse(url)?;
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
        .finish();
    Ok(format!("{base}?{query}"))
}

/// Status check, then UTF-8 and JSON decoding of a raw body.
pub fn decode_body(status: u16, body: Vec<u8>) -> Result<Value, FetchError> {
    if status != 200 {
        return Err(FetchError::Status(status));
    }
    let text = String::from_utf8(body)?;
    Ok(serde_json::from_str(&text)?)
}

/// Hides credential values before a URL reaches the logs.
fn redact(full_url: &str) -> String {
    match url::Url::parse(full_url) {
        Ok(mut parsed) => {
            let pairs: Vec<(String, String)> = parsed
                .query_pairs()
                .map(|(k, v)| {
                    let v = if k == "app_key" || k == "app_id" {
                        "***".to_string()
                    } else {
                        v.into_owned()
                    };
                    (k.into_owned(), v)
                })
                .collect();
            parsed.query_pairs_mut().clear().extend_pairs(pairs);
            parsed.to_string()
        }
        Err(_) => "<invalid url>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    #[test]
    fn test_build_url_encodes_params() {
        let url = build_url(
            "https://api.example.com/search/1",
            &[("what", "python+django".to_string()), ("where", "New Delhi".to_string())],
        )
        .unwrap();
        assert_eq!(
            url,
            "https://api.example.com/search/1?what=python%2Bdjango&where=New+Delhi"
        );
    }

    #[test]
    fn test_build_url_rejects_relative_base() {
        let err = build_url("not a url", &[]).unwrap_err();
        assert!(matches!(err, FetchError::Url(_)));
    }

    #[test]
    fn test_decode_body_ok() {
        let body = br#"{"results": [{"title": "Rust Dev"}]}"#.to_vec();
        let value = decode_body(200, body).unwrap();
        assert_eq!(value["results"][0]["title"], "Rust Dev");
    }

    #[test]
    fn test_decode_body_non_200() {
        let err = decode_body(503, b"{}".to_vec()).unwrap_err();
        assert!(matches!(err, FetchError::Status(503)));
    }

    #[test]
    fn test_decode_body_invalid_utf8() {
        let err = decode_body(200, vec![0xff, 0xfe, 0xfd]).unwrap_err();
        assert!(matches!(err, FetchError::Utf8(_)));
    }

    #[test]
    fn test_decode_body_malformed_json() {
        let err = decode_body(200, b"<html>oops</html>".to_vec()).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn test_redact_hides_credentials() {
        let redacted = redact("https://api.example.com/s?app_id=abc&app_key=secret&what=rust");
        assert!(!redacted.contains("secret"));
        assert!(!redacted.contains("abc"));
        assert!(redacted.contains("what=rust"));
    }

    #[test]
    fn test_client_transport_builds() {
        let transport = ClientTransport::new().unwrap();
        assert_eq!(transport.name(), "client");
    }

    /// Serves one canned response on a local port and hands back the request head.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&head).into_owned()
        });

        (format!("http://{addr}/v1/api/jobs/in/search/1"), handle)
    }

    const RESULTS_BODY: &str = r#"{"results": [{"title": "Rust Dev"}]}"#;

    fn search_params() -> Vec<(&'static str, String)> {
        vec![
            ("what", "python+django".to_string()),
            ("where", "New Delhi".to_string()),
        ]
    }

    fn request_line(head: &str) -> &str {
        head.lines().next().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_client_transport_get_decodes_200() {
        let (url, server) = serve_once("200 OK", RESULTS_BODY).await;
        let body = ClientTransport::new()
            .unwrap()
            .get(&url, &search_params())
            .await
            .unwrap();
        assert_eq!(body["results"][0]["title"], "Rust Dev");

        let head = server.await.unwrap();
        let line = request_line(&head);
        assert!(line.starts_with("GET /v1/api/jobs/in/search/1?"), "{line}");
        assert!(line.contains("what=python%2Bdjango"), "{line}");
        assert!(line.contains("where=New+Delhi"), "{line}");
    }

    #[tokio::test]
    async fn test_client_transport_get_reports_non_200() {
        let (url, server) = serve_once("500 Internal Server Error", "{}").await;
        let err = ClientTransport::new()
            .unwrap()
            .get(&url, &search_params())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status(500)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_raw_transport_get_decodes_200() {
        let (url, server) = serve_once("200 OK", RESULTS_BODY).await;
        let body = RawTransport.get(&url, &search_params()).await.unwrap();
        assert_eq!(body["results"][0]["title"], "Rust Dev");

        let head = server.await.unwrap();
        let line = request_line(&head);
        assert!(
            line.starts_with("GET /v1/api/jobs/in/search/1?what=python%2Bdjango&where=New+Delhi "),
            "{line}"
        );
    }

    #[tokio::test]
    async fn test_raw_transport_get_reports_non_200() {
        let (url, server) = serve_once("500 Internal Server Error", "{}").await;
        let err = RawTransport.get(&url, &search_params()).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(500)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_raw_transport_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = RawTransport
            .get(&format!("http://{addr}/search"), &search_params())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
