use async_trait::async_trait;

use crate::error::TrackerError;
use crate::record::History;

/// Optical character recognition over raw image bytes.
///
/// Implementations must surface backend and network failures as
/// `TrackerError::Ocr` instead of panicking. An image with no legible text
/// is `Ok(String::new())`, not an error.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Backend name for logging (e.g., "tesseract", "ocr.space").
    fn name(&self) -> &str;

    async fn extract_text(&self, image: &[u8]) -> Result<String, TrackerError>;
}

/// Downloads an attachment's bytes from the chat platform's CDN.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, TrackerError>;
}

/// Flat storage for the whole history. `save` rewrites everything.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Returns an empty history when nothing has been stored yet.
    async fn load(&self) -> Result<History, TrackerError>;

    async fn save(&self, history: &History) -> Result<(), TrackerError>;
}
