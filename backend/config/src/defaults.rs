//! Config defaults: constant values and credential references.

use crate::schema::{BotConfig, OcrProviderKind};

pub const DEFAULT_STORE_PATH: &str = "prestige_data.json";
pub const DEFAULT_MARKER: &str = "cherrowyt";
pub const DEFAULT_LABEL: &str = "Prestige";
pub const DEFAULT_SOURCE_NAME: &str = "cherrowYT";
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

pub const DEFAULT_TESSERACT_BINARY: &str = "tesseract";
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";
pub const DEFAULT_OCR_SPACE_ENDPOINT: &str = "https://api.ocr.space/parse/image";
pub const DEFAULT_OCR_SPACE_ENGINE: u8 = 2;

pub const DEFAULT_CHART_TITLE: &str = "CherrowYT Prestige Over Time";
pub const DEFAULT_CHART_X_LABEL: &str = "Time (UTC)";
pub const DEFAULT_CHART_Y_LABEL: &str = "Prestige";
pub const DEFAULT_CHART_WIDTH: u32 = 800;
pub const DEFAULT_CHART_HEIGHT: u32 = 400;
pub const DEFAULT_CHART_FILE_NAME: &str = "prestige_graph.png";

pub const DEFAULT_KEEP_ALIVE_BIND: &str = "0.0.0.0";
pub const DEFAULT_KEEP_ALIVE_PORT: u16 = 8080;
pub const DEFAULT_KEEP_ALIVE_BODY: &str = "I'm alive!";

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
/// Discord's own attachment ceiling for non-boosted servers.
pub const DEFAULT_DOWNLOAD_MAX_BYTES: u64 = 25 * 1024 * 1024;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Env var holding the Discord bot token.
pub const DISCORD_TOKEN_VAR: &str = "DISCORD_TOKEN";
/// Env var holding the OCR.space API key.
pub const OCR_API_KEY_VAR: &str = "OCR_API_KEY";

/// Point unset credentials at their environment variables.
///
/// Only the credentials the selected backends need are filled in, so a local
/// OCR setup never asks for an API key.
pub fn apply_credential_defaults(mut config: BotConfig) -> BotConfig {
    if config.discord.token.is_none() {
        config.discord.token = Some(env_ref(DISCORD_TOKEN_VAR));
    }
    if config.ocr.provider == OcrProviderKind::Remote && config.ocr.remote.api_key.is_none() {
        config.ocr.remote.api_key = Some(env_ref(OCR_API_KEY_VAR));
    }
    config
}

fn env_ref(var: &str) -> String {
    format!("${{{var}}}")
}
