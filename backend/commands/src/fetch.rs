//! Attachment download over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use prestigebot_core::{ImageFetcher, TrackerError};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

pub struct HttpImageFetcher {
    client: Client,
    max_bytes: u64,
}

impl HttpImageFetcher {
    pub fn new(timeout: Duration, max_bytes: u64) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, max_bytes })
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, TrackerError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TrackerError::Download(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%status, "Attachment download returned non-200");
            return Err(TrackerError::Download(format!("HTTP {status}")));
        }

        if let Some(len) = response.content_length() {
            if len > self.max_bytes {
                return Err(TrackerError::Download(format!(
                    "attachment is {len} bytes, limit is {}",
                    self.max_bytes
                )));
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| TrackerError::Download(e.to_string()))?
        {
            if (body.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(TrackerError::Download(format!(
                    "attachment exceeds {} bytes",
                    self.max_bytes
                )));
            }
            body.extend_from_slice(&chunk);
        }

        debug!(bytes = body.len(), "Downloaded attachment");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode as AxumStatus, routing::get};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn fetcher(max_bytes: u64) -> HttpImageFetcher {
        HttpImageFetcher::new(Duration::from_secs(5), max_bytes).unwrap()
    }

    #[tokio::test]
    async fn downloads_body() {
        let base = serve(Router::new().route("/img.png", get(|| async { vec![1u8, 2, 3] }))).await;
        let bytes = fetcher(1024).fetch(&format!("{base}/img.png")).await.unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn non_ok_status_is_download_error() {
        let base = serve(Router::new().route("/gone", get(|| async { AxumStatus::NOT_FOUND }))).await;
        let err = fetcher(1024).fetch(&format!("{base}/gone")).await.unwrap_err();
        assert!(matches!(err, TrackerError::Download(_)));
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let base = serve(Router::new().route("/big", get(|| async { vec![0u8; 4096] }))).await;
        let err = fetcher(100).fetch(&format!("{base}/big")).await.unwrap_err();
        assert!(matches!(err, TrackerError::Download(_)));
    }
}
