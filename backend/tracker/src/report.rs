//! Current value and progress chart for the whole history.

use media::{ChartPoint, ChartStyle, render_line_chart};
use prestigebot_core::{History, TrackerError};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RenderedReport {
    /// Prestige of the chronologically-last record.
    pub current: u64,
    /// All records in timestamp order.
    pub points: Vec<ChartPoint>,
    pub chart_png: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct ReportRenderer {
    style: ChartStyle,
}

impl ReportRenderer {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    /// Fails with `EmptyHistory` when there is nothing to report; callers are
    /// expected to check first and answer with a "no data" message.
    pub fn render(&self, history: &History) -> Result<RenderedReport, TrackerError> {
        let points = chart_points(history);
        let current = points.last().map(|p| p.value).ok_or(TrackerError::EmptyHistory)?;

        let chart_png = render_line_chart(&points, &self.style)?;
        debug!(points = points.len(), bytes = chart_png.len(), "Rendered prestige chart");

        Ok(RenderedReport {
            current,
            points,
            chart_png,
        })
    }
}

/// (timestamp, prestige) pairs in timestamp order.
pub fn chart_points(history: &History) -> Vec<ChartPoint> {
    let mut sorted = history.clone();
    sorted.sort_chronologically();
    sorted
        .records()
        .iter()
        .map(|r| ChartPoint {
            timestamp: r.timestamp,
            value: r.prestige,
        })
        .collect()
}

pub fn format_thousands(value: u64) -> String {
    media::chart::group_thousands(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use prestigebot_core::Record;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, 8, 30, 0).unwrap()
    }

    #[test]
    fn current_is_last_by_timestamp() {
        let history = History::from(vec![
            Record::new(at(3), 300),
            Record::new(at(1), 100),
            Record::new(at(2), 200),
        ]);
        let report = ReportRenderer::default().render(&history).unwrap();

        assert_eq!(report.current, 300);
        let values: Vec<u64> = report.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![100, 200, 300]);
        assert!(!report.chart_png.is_empty());
    }

    #[test]
    fn empty_history_is_precondition_failure() {
        let err = ReportRenderer::default().render(&History::new()).unwrap_err();
        assert!(matches!(err, TrackerError::EmptyHistory));
    }

    #[test]
    fn formats_current_value() {
        assert_eq!(format_thousands(12345), "12,345");
    }
}
