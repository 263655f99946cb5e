//! HTTP data source.
//!
//! Issues a single GET for the record resource on a background task. The
//! result is handed over a oneshot channel, so a result that arrives after the
//! consumer has been dropped is discarded rather than applied.

use reqwest::Client;
use tokio::sync::oneshot;
use tracing::{debug, error, info};

use super::{decode_payload, DataSource, RawPayload};
use crate::error::LoadError;

/// Fixed path of the record resource.
pub const RESOURCE_PATH: &str = "/simulation_data.json";

/// Join a base URL and a resource path with exactly one slash.
pub fn resource_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Fetch and decode the record payload.
pub async fn fetch_payload(client: &Client, url: &str) -> Result<RawPayload, LoadError> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(LoadError::Status(response.status().as_u16()));
    }

    let body = response.bytes().await?;
    decode_payload(&body)
}

/// A data source that loads the record payload over HTTP, once.
///
/// Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct HttpSource {
    receiver: oneshot::Receiver<Result<RawPayload, LoadError>>,
    description: String,
    last_error: Option<String>,
    finished: bool,
}

impl HttpSource {
    /// Spawn the load on a background task.
    pub fn spawn(client: Client, url: impl Into<String>) -> Self {
        let url = url.into();
        let (tx, rx) = oneshot::channel();
        let task_url = url.clone();

        tokio::spawn(async move {
            let result = fetch_payload(&client, &task_url).await;
            match &result {
                Ok(payload) => info!(url = %task_url, candidates = payload.len(), "loaded payload"),
                Err(e) => error!(url = %task_url, "Error loading data: {}", e),
            }
            if tx.send(result).is_err() {
                debug!(url = %task_url, "consumer dropped before load finished, discarding result");
            }
        });

        Self {
            receiver: rx,
            description: format!("http: {}", url),
            last_error: None,
            finished: false,
        }
    }

    /// Whether the load has completed and been delivered by `poll`.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl DataSource for HttpSource {
    fn poll(&mut self) -> Option<RawPayload> {
        if self.finished {
            return None;
        }

        let result = match self.receiver.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return None,
            Err(oneshot::error::TryRecvError::Closed) => {
                Err(LoadError::Transport("load task ended without a result".to_string()))
            }
        };
        self.finished = true;

        match result {
            Ok(payload) => {
                self.last_error = None;
                Some(payload)
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Some(Vec::new())
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and return the base URL.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        });
        format!("http://{}", addr)
    }

    async fn poll_until_done(source: &mut HttpSource) -> RawPayload {
        for _ in 0..200 {
            if let Some(payload) = source.poll() {
                return payload;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("load did not finish");
    }

    #[test]
    fn test_resource_url() {
        assert_eq!(
            resource_url("http://host:8080/", RESOURCE_PATH),
            "http://host:8080/simulation_data.json"
        );
        assert_eq!(resource_url("http://host", "data.json"), "http://host/data.json");
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let base = serve_once("200 OK", r#"[{"id": "a"}, {"id": "b"}]"#).await;
        let payload = fetch_payload(&Client::new(), &resource_url(&base, RESOURCE_PATH))
            .await
            .unwrap();
        assert_eq!(payload.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let base = serve_once("404 Not Found", "missing").await;
        let err = fetch_payload(&Client::new(), &base).await.unwrap_err();
        assert!(matches!(err, LoadError::Status(404)));
        assert_eq!(err.to_string(), "HTTP error! Status: 404");
    }

    #[tokio::test]
    async fn test_source_degrades_to_empty_on_bad_body() {
        let base = serve_once("200 OK", r#"{"not": "an array"}"#).await;
        let mut source = HttpSource::spawn(Client::new(), base);
        let payload = poll_until_done(&mut source).await;
        assert!(payload.is_empty());
        assert_eq!(source.error(), Some("Data is not an array"));
        assert!(source.is_finished());
        assert!(source.poll().is_none());
    }

    #[tokio::test]
    async fn test_source_delivers_payload_once() {
        let base = serve_once("200 OK", r#"[{"id": "a"}]"#).await;
        let mut source = HttpSource::spawn(Client::new(), resource_url(&base, RESOURCE_PATH));
        assert!(source.description().starts_with("http: http://127.0.0.1:"));
        let payload = poll_until_done(&mut source).await;
        assert_eq!(payload.len(), 1);
        assert!(source.error().is_none());
        assert!(source.poll().is_none());
    }

    #[tokio::test]
    async fn test_dropped_source_discards_result() {
        let base = serve_once("200 OK", "[]").await;
        let source = HttpSource::spawn(Client::new(), base);
        drop(source);
        // The background task must finish quietly with nobody listening
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}
