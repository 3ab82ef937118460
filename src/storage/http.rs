//! HTTP document store.
//!
//! Reads the data directory as published on a static site
//! (e.g. `https://<user>.github.io/<repo>/data/`).

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::error::{AppError, Result};
use crate::storage::DocumentStore;
use crate::utils::join_key;

/// HTTP-based read-only document store.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base: Url,
}

impl HttpStore {
    /// Create a store serving keys relative to `base_url`.
    pub fn new(client: Client, base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { client, base })
    }

    fn url(&self, key: &str) -> Result<Url> {
        join_key(&self.base, key)
    }
}

#[async_trait]
impl DocumentStore for HttpStore {
    async fn read_bytes_optional(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let url = self.url(key)?;
        log::debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::fetch(url.as_str(), format!("HTTP {}", status)));
        }

        let bytes = response.bytes().await?;
        Ok(Some(bytes.to_vec()))
    }

    fn describe(&self, key: &str) -> String {
        self.url(key)
            .map(String::from)
            .unwrap_or_else(|_| format!("{}{}", self.base, key))
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;
    use crate::models::IndexDocument;
    use crate::storage::read_json;

    /// Serve canned responses keyed by request path; unknown paths get 404.
    async fn serve(routes: Vec<(&'static str, u16, &'static str)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let routes = routes.clone();
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut buf).await {
                            Ok(0) | Err(_) => break,
                            Ok(n) => request.extend_from_slice(&buf[..n]),
                        }
                    }

                    let request = String::from_utf8_lossy(&request);
                    let path = request.split_whitespace().nth(1).unwrap_or("/");
                    let (status, body) = routes
                        .iter()
                        .find(|(route, _, _)| *route == path)
                        .map(|(_, status, body)| (*status, *body))
                        .unwrap_or((404, ""));
                    let reason = match status {
                        200 => "OK",
                        404 => "Not Found",
                        _ => "Internal Server Error",
                    };

                    let response = format!(
                        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        reason,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        format!("http://{}/data", addr)
    }

    #[tokio::test]
    async fn test_reads_published_document() {
        let base = serve(vec![(
            "/data/index.json",
            200,
            r#"{"sources": ["weibo"], "dates": {"weibo": ["2026-02-01"]}}"#,
        )])
        .await;
        let store = HttpStore::new(Client::new(), &base).unwrap();

        let index: IndexDocument = read_json(&store, "index.json").await.unwrap();
        assert_eq!(index.sources, vec!["weibo".to_string()]);
    }

    #[tokio::test]
    async fn test_404_is_missing() {
        let base = serve(Vec::new()).await;
        let store = HttpStore::new(Client::new(), &base).unwrap();

        assert!(store.read_bytes_optional("status.json").await.unwrap().is_none());

        let err = read_json::<IndexDocument>(&store, "index.json").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_server_error_is_fetch_error() {
        let base = serve(vec![("/data/index.json", 500, "oops")]).await;
        let store = HttpStore::new(Client::new(), &base).unwrap();

        let err = store.read_bytes_optional("index.json").await.unwrap_err();
        match err {
            AppError::Fetch { key, message } => {
                assert!(key.ends_with("/data/index.json"));
                assert!(message.contains("500"));
            }
            other => panic!("expected fetch error, got {:?}", other),
        }
        assert!(!read_json::<IndexDocument>(&store, "index.json")
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_base_without_trailing_slash() {
        let store = HttpStore::new(Client::new(), "https://example.com/site/data").unwrap();
        assert_eq!(
            store.describe("raw/weibo/2026-02-01.json"),
            "https://example.com/site/data/raw/weibo/2026-02-01.json"
        );
    }

    #[test]
    fn test_base_with_trailing_slash() {
        let store = HttpStore::new(Client::new(), "https://example.com/data/").unwrap();
        assert_eq!(store.describe("index.json"), "https://example.com/data/index.json");
    }

    #[test]
    fn test_invalid_base() {
        assert!(HttpStore::new(Client::new(), "::nope").is_err());
    }
}
