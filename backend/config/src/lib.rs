//! `prestigebot-config` : runtime configuration for the prestige bot.
//!
//! Provides:
//! - Typed config schema (Discord, OCR backend, tracker, chart, keep-alive)
//! - YAML loading with an absent file meaning "all defaults"
//! - `${ENV_VAR}` substitution for credentials
//! - Default credential references and validation
//! - Config redaction for safe logging

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use schema::{
    BotConfig, ChartConfig, DiscordConfig, DownloadConfig, KeepAliveConfig, LoggingConfig,
    OcrConfig, OcrProviderKind, RemoteOcrConfig, TesseractConfig, TrackerConfig,
};
pub use io::{load_config, resolve_config_path};
pub use env::{resolve_env_vars_with, MissingEnvVarError};
pub use redact::redact;
pub use defaults::apply_credential_defaults;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// A validated config plus the warnings found while validating it.
///
/// Config is loaded before any tracing subscriber exists, so warnings are
/// handed back for the caller to show rather than logged here.
#[derive(Debug)]
pub struct PreparedConfig {
    pub config: BotConfig,
    pub warnings: Vec<ConfigValidationError>,
}

/// Load the config file, fill defaults, substitute env vars, and validate.
///
/// With `require_credentials` the Discord token (and the OCR API key for the
/// remote backend) must resolve to non-empty values; a missing variable is
/// returned as [`MissingEnvVarError`] so the caller can report it and stop.
pub async fn load_and_prepare(path: &Path, require_credentials: bool) -> Result<PreparedConfig> {
    let raw = load_config(path).await?;
    let env: HashMap<String, String> = std::env::vars().collect();
    prepare(raw, &env, require_credentials)
}

/// Pure half of [`load_and_prepare`], usable with an explicit environment.
pub fn prepare(
    config: BotConfig,
    env: &HashMap<String, String>,
    require_credentials: bool,
) -> Result<PreparedConfig> {
    let config = if require_credentials {
        apply_credential_defaults(config)
    } else {
        config
    };

    let value = serde_json::to_value(&config).context("Failed to serialize config for processing")?;
    let value = resolve_env_vars_with(&value, env)?;
    let config: BotConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let report = validate(&config, require_credentials);
    if !report.is_valid() {
        let messages: Vec<String> = report.errors.iter().map(|e| e.to_string()).collect();
        bail!(messages.join("; "));
    }

    Ok(PreparedConfig {
        config,
        warnings: report.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn token_comes_from_environment() {
        let config = prepare(BotConfig::default(), &env(&[("DISCORD_TOKEN", "abc.def")]), true)
            .unwrap()
            .config;
        assert_eq!(config.discord.token.as_deref(), Some("abc.def"));
        assert_eq!(config.ocr.provider, OcrProviderKind::Local);
    }

    #[test]
    fn missing_token_is_fatal_and_names_variable() {
        let err = prepare(BotConfig::default(), &HashMap::new(), true).unwrap_err();
        let missing = err.downcast_ref::<MissingEnvVarError>().expect("missing env error");
        assert_eq!(missing.var_name, "DISCORD_TOKEN");
    }

    #[test]
    fn remote_ocr_requires_api_key() {
        let mut config = BotConfig::default();
        config.ocr.provider = OcrProviderKind::Remote;
        let err = prepare(config, &env(&[("DISCORD_TOKEN", "t")]), true).unwrap_err();
        let missing = err.downcast_ref::<MissingEnvVarError>().expect("missing env error");
        assert_eq!(missing.var_name, "OCR_API_KEY");
    }

    #[test]
    fn offline_use_needs_no_credentials() {
        let prepared = prepare(BotConfig::default(), &HashMap::new(), false).unwrap();
        assert!(prepared.config.discord.token.is_none());
        assert!(prepared.warnings.is_empty());
    }

    #[test]
    fn invalid_values_abort() {
        let mut config = BotConfig::default();
        config.tracker.marker = "  ".into();
        assert!(prepare(config, &HashMap::new(), false).is_err());
    }

    #[test]
    fn every_error_is_reported() {
        let mut config = BotConfig::default();
        config.tracker.marker = "  ".into();
        config.chart.width = 0;
        let message = prepare(config, &HashMap::new(), false).unwrap_err().to_string();
        assert!(message.contains("tracker.marker"), "{message}");
        assert!(message.contains("at 'chart'"), "{message}");
    }

    #[test]
    fn warnings_are_returned_to_caller() {
        let mut config = BotConfig::default();
        config.ocr.provider = OcrProviderKind::Remote;
        config.ocr.remote.endpoint = "http://ocr.internal/parse/image".into();
        config.ocr.remote.api_key = Some("${OCR_API_KEY}".into());
        let prepared = prepare(config, &env(&[("OCR_API_KEY", "k")]), false).unwrap();
        assert_eq!(prepared.warnings.len(), 1);
        assert_eq!(prepared.warnings[0].path, "ocr.remote.endpoint");
        assert_eq!(prepared.config.ocr.remote.api_key.as_deref(), Some("k"));
    }
}
