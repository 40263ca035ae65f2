//! Prestige bot configuration schema.
//!
//! Every section is optional in the YAML file; missing keys take the values
//! from [`crate::defaults`]. Keys are camelCase.

use serde::{Deserialize, Serialize};

use crate::defaults::*;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BotConfig {
    pub discord: DiscordConfig,
    pub ocr: OcrConfig,
    pub tracker: TrackerConfig,
    pub chart: ChartConfig,
    pub keep_alive: KeepAliveConfig,
    pub download: DownloadConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Discord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiscordConfig {
    /// Bot session token; usually `${DISCORD_TOKEN}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

// ---------------------------------------------------------------------------
// OCR
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrProviderKind {
    #[default]
    Local,
    Remote,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OcrConfig {
    pub provider: OcrProviderKind,
    pub tesseract: TesseractConfig,
    pub remote: RemoteOcrConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TesseractConfig {
    pub binary: String,
    pub language: String,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_TESSERACT_BINARY.to_string(),
            language: DEFAULT_OCR_LANGUAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoteOcrConfig {
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub language: String,
    pub engine: u8,
    pub timeout_secs: u64,
}

impl Default for RemoteOcrConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_OCR_SPACE_ENDPOINT.to_string(),
            api_key: None,
            language: DEFAULT_OCR_LANGUAGE.to_string(),
            engine: DEFAULT_OCR_SPACE_ENGINE,
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerConfig {
    /// JSON history file.
    pub store_path: String,
    /// Watermark that must appear in the OCR text.
    pub marker: String,
    /// Label printed before the prestige number.
    pub label: String,
    /// How the expected source is named in replies.
    pub source_name: String,
    pub allowed_extensions: Vec<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            store_path: DEFAULT_STORE_PATH.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            label: DEFAULT_LABEL.to_string(),
            source_name: DEFAULT_SOURCE_NAME.to_string(),
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    pub file_name: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_CHART_TITLE.to_string(),
            x_label: DEFAULT_CHART_X_LABEL.to_string(),
            y_label: DEFAULT_CHART_Y_LABEL.to_string(),
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
            file_name: DEFAULT_CHART_FILE_NAME.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Keep-alive responder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeepAliveConfig {
    pub enabled: bool,
    pub bind: String,
    pub port: u16,
    pub body: String,
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind: DEFAULT_KEEP_ALIVE_BIND.to_string(),
            port: DEFAULT_KEEP_ALIVE_PORT,
            body: DEFAULT_KEEP_ALIVE_BODY.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Attachment download
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DownloadConfig {
    pub timeout_secs: u64,
    pub max_bytes: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            max_bytes: DEFAULT_DOWNLOAD_MAX_BYTES,
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for rolling NDJSON logs; console only when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config: BotConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.tracker.store_path, "prestige_data.json");
        assert_eq!(config.keep_alive.port, 8080);
        assert_eq!(config.chart.width, 800);
        assert_eq!(config.tracker.allowed_extensions, vec!["png", "jpg", "jpeg", "webp"]);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let yaml = r#"
ocr:
  provider: remote
  remote:
    apiKey: "${OCR_API_KEY}"
keepAlive:
  port: 3000
"#;
        let config: BotConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.ocr.provider, OcrProviderKind::Remote);
        assert_eq!(config.ocr.remote.api_key.as_deref(), Some("${OCR_API_KEY}"));
        assert_eq!(config.ocr.remote.engine, 2);
        assert_eq!(config.keep_alive.port, 3000);
        assert_eq!(config.keep_alive.body, "I'm alive!");
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let yaml = "ocr:\n  provider: cloudvision\n";
        assert!(serde_yaml::from_str::<BotConfig>(yaml).is_err());
    }
}
