//! Shared state for command handlers, built once from the loaded config.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use media::ChartStyle;
use prestigebot_config::{BotConfig, OcrProviderKind};
use prestigebot_core::{HistoryStore, ImageFetcher, TextExtractor};
use prestigebot_tracker::{JsonFileStore, Ledger, PrestigeParser, ReportRenderer};
use prestigebot_understanding::{OcrSpaceExtractor, OcrSpaceOptions, TesseractExtractor};
use tracing::info;

use crate::fetch::HttpImageFetcher;

pub struct AppContext {
    pub ledger: Ledger,
    pub extractor: Arc<dyn TextExtractor>,
    pub fetcher: Arc<dyn ImageFetcher>,
    pub parser: PrestigeParser,
    pub renderer: ReportRenderer,
    pub allowed_extensions: Vec<String>,
    pub chart_file_name: String,
    /// Source name used in the invalid-screenshot reply.
    pub source_name: String,
}

impl AppContext {
    pub fn from_config(config: &BotConfig) -> Result<Self> {
        let store: Arc<dyn HistoryStore> = Arc::new(JsonFileStore::new(&config.tracker.store_path));
        let fetcher = HttpImageFetcher::new(
            Duration::from_secs(config.download.timeout_secs),
            config.download.max_bytes,
        )
        .context("building attachment HTTP client")?;

        let ctx = Self {
            ledger: Ledger::new(store),
            extractor: build_extractor(config)?,
            fetcher: Arc::new(fetcher),
            parser: PrestigeParser::new(&config.tracker.marker, &config.tracker.label)?,
            renderer: ReportRenderer::new(chart_style(config)),
            allowed_extensions: config.tracker.allowed_extensions.clone(),
            chart_file_name: config.chart.file_name.clone(),
            source_name: config.tracker.source_name.clone(),
        };
        info!(
            ocr = ctx.extractor.name(),
            store = %config.tracker.store_path,
            "Prestige tracker ready"
        );
        Ok(ctx)
    }
}

pub fn chart_style(config: &BotConfig) -> ChartStyle {
    ChartStyle {
        title: config.chart.title.clone(),
        x_label: config.chart.x_label.clone(),
        y_label: config.chart.y_label.clone(),
        width: config.chart.width,
        height: config.chart.height,
    }
}

fn build_extractor(config: &BotConfig) -> Result<Arc<dyn TextExtractor>> {
    match config.ocr.provider {
        OcrProviderKind::Local => {
            let t = &config.ocr.tesseract;
            Ok(Arc::new(TesseractExtractor::new(&t.binary, &t.language)))
        }
        OcrProviderKind::Remote => {
            let r = &config.ocr.remote;
            let api_key = r
                .api_key
                .clone()
                .context("ocr.remote.apiKey is required for the remote OCR provider")?;
            let mut options = OcrSpaceOptions::new(api_key);
            options.endpoint = r.endpoint.clone();
            options.language = r.language.clone();
            options.engine = r.engine;
            options.timeout = Duration::from_secs(r.timeout_secs);
            Ok(Arc::new(OcrSpaceExtractor::new(options)?))
        }
    }
}
