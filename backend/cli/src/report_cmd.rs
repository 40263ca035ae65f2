//! CLI Report Command
//!
//! Renders the same chart `/displayprestige` posts, straight to a file.

use std::path::Path;

use anyhow::{Context, Result};
use prestigebot_commands::context::chart_style;
use prestigebot_commands::replies;
use prestigebot_config::BotConfig;
use prestigebot_core::HistoryStore;
use prestigebot_tracker::{format_thousands, JsonFileStore, ReportRenderer};

use crate::terminal_output::{note_info, note_success};

pub async fn run(config: &BotConfig, out: &Path) -> Result<()> {
    let store = JsonFileStore::new(&config.tracker.store_path);
    let mut history = store.load().await?;
    history.sort_chronologically();

    if history.is_empty() {
        note_info(replies::NO_DATA);
        return Ok(());
    }

    let renderer = ReportRenderer::new(chart_style(config));
    let report = tokio::task::spawn_blocking(move || renderer.render(&history)).await??;

    tokio::fs::write(out, &report.chart_png)
        .await
        .with_context(|| format!("writing chart to {}", out.display()))?;

    note_success(&format!(
        "Current prestige {} across {} record(s); chart written to {}",
        format_thousands(report.current),
        report.points.len(),
        out.display()
    ));
    Ok(())
}
