//! CLI Status Command
//!
//! Reports the stored history and whether the keep-alive responder answers.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use prestigebot_config::BotConfig;
use prestigebot_core::{History, HistoryStore};
use prestigebot_tracker::{format_thousands, JsonFileStore};

use crate::terminal_output::{history_table, note_info, note_success, note_warn};

/// Most recent records shown in the table.
const RECENT_ROWS: usize = 5;

pub async fn run(config_path: &Path, config: &BotConfig) -> Result<()> {
    println!("\n📊 Prestige Bot Status\n");
    note_info(&format!("Config: {}", config_path.display()));
    note_info(&format!("OCR backend: {:?}", config.ocr.provider));

    let store = JsonFileStore::new(&config.tracker.store_path);
    let mut history = store.load().await?;
    history.sort_chronologically();
    print_history(&config.tracker.store_path, &history);

    if config.keep_alive.enabled {
        check_keep_alive(config.keep_alive.port).await;
    } else {
        note_info("Keep-alive responder disabled");
    }
    println!();
    Ok(())
}

fn print_history(store_path: &str, history: &History) {
    let Some(latest) = history.latest() else {
        note_warn(&format!("No records in {store_path}"));
        return;
    };
    note_success(&format!(
        "{} record(s) in {store_path}; current prestige {}",
        history.len(),
        format_thousands(latest.prestige)
    ));
    println!("\n{}", history_table(&recent_rows(history)));
}

fn recent_rows(history: &History) -> Vec<(String, String)> {
    let records = history.records();
    records[records.len().saturating_sub(RECENT_ROWS)..]
        .iter()
        .map(|r| {
            (
                r.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                format_thousands(r.prestige),
            )
        })
        .collect()
}

async fn check_keep_alive(port: u16) {
    let url = format!("http://127.0.0.1:{port}/api/health");
    let client = match reqwest::Client::builder().timeout(Duration::from_secs(3)).build() {
        Ok(client) => client,
        Err(e) => {
            note_warn(&format!("Could not build HTTP client: {e}"));
            return;
        }
    };
    match client.get(&url).send().await {
        Ok(resp) => match resp.json::<serde_json::Value>().await {
            Ok(body) => note_success(&format!(
                "Keep-alive responder up for {}s",
                body["uptimeSeconds"].as_u64().unwrap_or_default()
            )),
            Err(e) => note_warn(&format!("Unexpected health response: {e}")),
        },
        Err(_) => note_warn(&format!("Bot is not running on port {port}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use prestigebot_core::Record;

    #[test]
    fn table_shows_last_five_records() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let history: History = (0..8u64)
            .map(|i| Record::new(start + ChronoDuration::days(i as i64), 1000 * (i + 1)))
            .collect::<Vec<_>>()
            .into();
        let rows = recent_rows(&history);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].1, "4,000");
        assert_eq!(rows[4], ("2024-01-08 00:00:00".to_string(), "8,000".to_string()));
    }
}
