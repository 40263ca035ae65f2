//! Optical Character Recognition (OCR)
//!
//! Bridges the local Tesseract binary or the OCR.space HTTP API to the
//! [`TextExtractor`] capability. Every failure, including network errors,
//! is reported as `TrackerError::Ocr`; nothing here retries.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use prestigebot_core::{TextExtractor, TrackerError};
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::preprocess::to_grayscale_png;

// ---------------------------------------------------------------------------
// Local Tesseract
// ---------------------------------------------------------------------------

pub struct TesseractExtractor {
    binary: String,
    language: String,
}

impl TesseractExtractor {
    pub fn new(binary: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
        }
    }

    fn fail(&self, message: impl Into<String>) -> TrackerError {
        TrackerError::ocr(self.name(), message)
    }
}

impl Default for TesseractExtractor {
    fn default() -> Self {
        Self::new("tesseract", "eng")
    }
}

#[async_trait]
impl TextExtractor for TesseractExtractor {
    fn name(&self) -> &str {
        "tesseract"
    }

    async fn extract_text(&self, image: &[u8]) -> Result<String, TrackerError> {
        let gray = grayscale(self.name(), image).await?;

        info!(bytes = gray.len(), binary = %self.binary, "Running OCR via tesseract");

        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout", "-l", &self.language])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.fail(format!("failed to start {}: {e}", self.binary)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.fail("stdin was not captured"))?;
        let writer = tokio::spawn(async move {
            let result = stdin.write_all(&gray).await;
            drop(stdin);
            result
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| self.fail(format!("failed to wait for tesseract: {e}")))?;

        if let Ok(Err(e)) = writer.await {
            warn!(error = %e, "Tesseract closed stdin early");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.fail(format!("{}: {}", output.status, stderr.trim())));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(chars = text.len(), "Tesseract finished");
        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// OCR.space HTTP API
// ---------------------------------------------------------------------------

pub const OCR_SPACE_ENDPOINT: &str = "https://api.ocr.space/parse/image";

#[derive(Debug, Clone)]
pub struct OcrSpaceOptions {
    pub endpoint: String,
    pub api_key: String,
    pub language: String,
    /// OCR.space engine number (1, 2 or 3).
    pub engine: u8,
    pub timeout: Duration,
}

impl OcrSpaceOptions {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: OCR_SPACE_ENDPOINT.to_string(),
            api_key: api_key.into(),
            language: "eng".to_string(),
            engine: 2,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Decode whatever format was uploaded and hand the backend a grayscale PNG.
async fn grayscale(backend: &str, image: &[u8]) -> Result<Vec<u8>, TrackerError> {
    let owned = image.to_vec();
    tokio::task::spawn_blocking(move || to_grayscale_png(&owned))
        .await
        .map_err(|e| TrackerError::ocr(backend, format!("preprocessing task failed: {e}")))?
        .map_err(|e| TrackerError::ocr(backend, format!("{e:#}")))
}

pub struct OcrSpaceExtractor {
    client: reqwest::Client,
    options: OcrSpaceOptions,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OcrSpaceResponse {
    #[serde(default)]
    parsed_results: Vec<OcrSpaceParsed>,
    #[serde(default)]
    is_errored_on_processing: bool,
    #[serde(default)]
    error_message: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OcrSpaceParsed {
    #[serde(default)]
    parsed_text: String,
}

impl OcrSpaceExtractor {
    pub fn new(options: OcrSpaceOptions) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(options.timeout).build()?;
        Ok(Self { client, options })
    }

    fn fail(&self, message: impl Into<String>) -> TrackerError {
        TrackerError::ocr(self.name(), message)
    }
}

/// `ErrorMessage` is either a string or an array of strings.
fn describe_error(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join("; "),
        _ => "unknown OCR.space error".to_string(),
    }
}

#[async_trait]
impl TextExtractor for OcrSpaceExtractor {
    fn name(&self) -> &str {
        "ocr.space"
    }

    async fn extract_text(&self, image: &[u8]) -> Result<String, TrackerError> {
        let gray = grayscale(self.name(), image).await?;
        info!(bytes = gray.len(), endpoint = %self.options.endpoint, "Running OCR via OCR.space");

        let part = reqwest::multipart::Part::bytes(gray)
            .file_name("screenshot.png")
            .mime_str("image/png")
            .map_err(|e| self.fail(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .text("language", self.options.language.clone())
            .text("OCREngine", self.options.engine.to_string())
            .text("scale", "true")
            .part("file", part);

        let resp = self
            .client
            .post(&self.options.endpoint)
            .header("apikey", &self.options.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.fail(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(self.fail(format!("HTTP {status}: {}", body.trim())));
        }

        let parsed: OcrSpaceResponse = resp
            .json()
            .await
            .map_err(|e| self.fail(format!("invalid response body: {e}")))?;

        if parsed.is_errored_on_processing {
            return Err(self.fail(describe_error(&parsed.error_message)));
        }

        let text = parsed
            .parsed_results
            .into_iter()
            .map(|r| r.parsed_text)
            .collect::<Vec<_>>()
            .join("\n");
        debug!(chars = text.len(), "OCR.space finished");
        Ok(text)
    }
}
