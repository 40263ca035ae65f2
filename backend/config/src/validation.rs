//! Config validation: field checks with user-friendly messages.

use crate::schema::{BotConfig, OcrProviderKind};
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// All errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &BotConfig, require_credentials: bool) -> ValidationReport {
    let mut report = ValidationReport::default();
    if require_credentials {
        validate_credentials(config, &mut report);
    }
    validate_ocr(config, &mut report);
    validate_tracker(config, &mut report);
    validate_chart(config, &mut report);
    validate_network(config, &mut report);
    report
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn validate_credentials(config: &BotConfig, report: &mut ValidationReport) {
    if is_blank(config.discord.token.as_deref()) {
        report.error("discord.token", "A Discord bot token is required");
    }
    if config.ocr.provider == OcrProviderKind::Remote && is_blank(config.ocr.remote.api_key.as_deref()) {
        report.error("ocr.remote.apiKey", "The remote OCR backend needs an API key");
    }
}

fn validate_ocr(config: &BotConfig, report: &mut ValidationReport) {
    match config.ocr.provider {
        OcrProviderKind::Local => {
            if config.ocr.tesseract.binary.trim().is_empty() {
                report.error("ocr.tesseract.binary", "Tesseract binary path cannot be empty");
            }
        }
        OcrProviderKind::Remote => {
            let endpoint = &config.ocr.remote.endpoint;
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                report.error("ocr.remote.endpoint", "Endpoint must be an http(s) URL");
            } else if endpoint.starts_with("http://") {
                report.warn("ocr.remote.endpoint", "API key will be sent over plain HTTP");
            }
            if !(1..=3).contains(&config.ocr.remote.engine) {
                report.error("ocr.remote.engine", "OCR engine must be 1, 2 or 3");
            }
        }
    }
}

fn validate_tracker(config: &BotConfig, report: &mut ValidationReport) {
    let tracker = &config.tracker;
    if tracker.store_path.trim().is_empty() {
        report.error("tracker.storePath", "Store path cannot be empty");
    }
    if tracker.marker.trim().is_empty() {
        report.error("tracker.marker", "Marker cannot be empty; every screenshot would be accepted");
    }
    if tracker.label.trim().is_empty() {
        report.error("tracker.label", "Label cannot be empty");
    }
    if tracker.allowed_extensions.is_empty() {
        report.error("tracker.allowedExtensions", "At least one image extension must be allowed");
    }
    for ext in &tracker.allowed_extensions {
        if ext.trim_start_matches('.').trim().is_empty() {
            report.error("tracker.allowedExtensions", "Extensions cannot be empty");
        }
    }
}

fn validate_chart(config: &BotConfig, report: &mut ValidationReport) {
    let chart = &config.chart;
    if chart.width == 0 || chart.height == 0 {
        report.error("chart", "Chart width and height must be non-zero");
    }
    if chart.width > 4000 || chart.height > 4000 {
        report.warn("chart", "Very large charts may exceed attachment limits");
    }
    if !chart.file_name.to_lowercase().ends_with(".png") {
        report.warn("chart.fileName", "Chart is PNG encoded; use a .png file name");
    }
}

fn validate_network(config: &BotConfig, report: &mut ValidationReport) {
    if config.keep_alive.enabled && config.keep_alive.port == 0 {
        report.error("keepAlive.port", "Port cannot be 0 when the keep-alive server is enabled");
    }
    if config.download.timeout_secs == 0 {
        report.error("download.timeoutSecs", "Download timeout must be positive");
    }
    if config.download.max_bytes == 0 {
        report.error("download.maxBytes", "Download size limit must be positive");
    }
}
