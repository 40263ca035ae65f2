/// Command handlers for the two slash commands.
///
/// User mistakes and flaky dependencies (wrong file type, failed download,
/// unreadable screenshot) end in a specific reply. Only unexpected errors,
/// such as a history file that cannot be written, propagate to the
/// dispatcher and become the generic failure reply.
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use logging::{CommandEvent, EventLogger};
use media::has_allowed_extension;
use prestigebot_tracker::{parse_prestige_value, ParseOutcome, SubmitOutcome};
use tracing::{info, warn};

use crate::context::AppContext;
use crate::dispatch::{CommandContext, CommandHandler, CommandResponse};
use crate::replies;
use crate::types::CommandInvocation;

fn reject(inv: &CommandInvocation, ctx: &CommandContext, reason: &str, text: impl Into<String>) -> CommandResponse {
    EventLogger::log_event(&inv.key, &ctx.sender_id, CommandEvent::Rejected { reason: reason.into() });
    CommandResponse::ok(text)
}

// ---------------------------------------------------------------------------
// /cpt
// ---------------------------------------------------------------------------

pub struct SubmitScreenshotHandler {
    app: Arc<AppContext>,
}

impl SubmitScreenshotHandler {
    pub fn new(app: Arc<AppContext>) -> Self {
        Self { app }
    }
}

#[async_trait]
impl CommandHandler for SubmitScreenshotHandler {
    async fn handle(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Result<CommandResponse> {
        let app = &self.app;

        let Some(attachment) = inv.attachment.as_ref() else {
            return Ok(reject(inv, ctx, "missing_attachment", replies::FORMAT_ERROR));
        };
        if !has_allowed_extension(&attachment.filename, &app.allowed_extensions) {
            info!("[Commands] Rejected attachment {}", attachment.filename);
            return Ok(reject(inv, ctx, "unsupported_format", replies::FORMAT_ERROR));
        }

        let image = match app.fetcher.fetch(&attachment.url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("[Commands] Attachment download failed: {}", e);
                return Ok(reject(inv, ctx, "download_failed", replies::DOWNLOAD_FAILED));
            }
        };

        let text = match app.extractor.extract_text(&image).await {
            Ok(text) => text,
            Err(e) => {
                warn!("[Commands] OCR failed: {}", e);
                return Ok(reject(inv, ctx, "ocr_failed", replies::OCR_FAILED));
            }
        };

        let raw = match app.parser.parse(&text) {
            ParseOutcome::InvalidSource => {
                return Ok(reject(inv, ctx, "invalid_source", replies::invalid_source(&app.source_name)));
            }
            ParseOutcome::ValueNotFound => {
                return Ok(reject(inv, ctx, "value_not_found", replies::VALUE_NOT_FOUND));
            }
            ParseOutcome::Value(raw) => raw,
        };
        let Some(value) = parse_prestige_value(&raw) else {
            return Ok(reject(inv, ctx, "value_not_found", replies::VALUE_NOT_FOUND));
        };

        let outcome = app.ledger.submit(value).await.context("appending prestige record")?;
        Ok(match outcome {
            SubmitOutcome::Accepted(record) => {
                EventLogger::log_event(&inv.key, &ctx.sender_id, CommandEvent::Accepted { value: record.prestige });
                CommandResponse::ok(replies::saved(&raw))
            }
            SubmitOutcome::Regression { .. } => reject(inv, ctx, "regression", replies::REGRESSION),
            SubmitOutcome::Duplicate { .. } => reject(inv, ctx, "duplicate", replies::DUPLICATE),
        })
    }
}

// ---------------------------------------------------------------------------
// /displayprestige
// ---------------------------------------------------------------------------

pub struct ShowReportHandler {
    app: Arc<AppContext>,
}

impl ShowReportHandler {
    pub fn new(app: Arc<AppContext>) -> Self {
        Self { app }
    }
}

#[async_trait]
impl CommandHandler for ShowReportHandler {
    async fn handle(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Result<CommandResponse> {
        let history = self.app.ledger.history().await.context("loading prestige history")?;
        if history.is_empty() {
            EventLogger::log_event(&inv.key, &ctx.sender_id, CommandEvent::Reported { current: None });
            return Ok(CommandResponse::ok(replies::NO_DATA));
        }

        // Chart rendering is CPU-bound.
        let renderer = self.app.renderer.clone();
        let report = tokio::task::spawn_blocking(move || renderer.render(&history))
            .await
            .context("chart rendering task panicked")?
            .context("rendering prestige chart")?;

        EventLogger::log_event(
            &inv.key,
            &ctx.sender_id,
            CommandEvent::Reported { current: Some(report.current) },
        );
        Ok(CommandResponse::ok(replies::report(report.current))
            .with_attachment(self.app.chart_file_name.clone(), report.chart_png))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
