//! Time-series chart rendering.
//!
//! The chart is drawn with plotters' SVG backend and rasterized to PNG with
//! resvg, so nothing touches the filesystem and no native font libraries are
//! needed at build time. System fonts are loaded once per process.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use plotters::prelude::*;
use resvg::{tiny_skia, usvg};
use tracing::debug;

static FONT_DB: Lazy<Arc<usvg::fontdb::Database>> = Lazy::new(|| {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    debug!(faces = db.len(), "Loaded system fonts for chart rendering");
    Arc::new(db)
});

/// Padding applied around a single point on the time axis (seconds).
const SINGLE_POINT_TIME_PAD: i64 = 3600;

/// One (time, value) observation on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,
    pub value: u64,
}

/// Fixed presentation of the chart.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: "CherrowYT Prestige Over Time".to_string(),
            x_label: "Time (UTC)".to_string(),
            y_label: "Prestige".to_string(),
            width: 800,
            height: 400,
        }
    }
}

/// Render a line-and-marker chart of `points` (assumed sorted by time) as PNG bytes.
pub fn render_line_chart(points: &[ChartPoint], style: &ChartStyle) -> Result<Vec<u8>> {
    if points.is_empty() {
        bail!("cannot chart an empty series");
    }
    if style.width == 0 || style.height == 0 {
        bail!("chart size must be non-zero, got {}x{}", style.width, style.height);
    }
    let svg = render_svg(points, style)?;
    rasterize(&svg)
}

fn render_svg(points: &[ChartPoint], style: &ChartStyle) -> Result<String> {
    let series: Vec<(i64, u64)> = points
        .iter()
        .map(|p| (p.timestamp.timestamp(), p.value))
        .collect();
    let (x_range, y_range) = axis_ranges(&series);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (style.width, style.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&style.title, ("sans-serif", 22))
            .margin(12)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .x_desc(style.x_label.as_str())
            .y_desc(style.y_label.as_str())
            .x_labels(6)
            .x_label_formatter(&|secs: &i64| format_time_label(*secs))
            .y_label_formatter(&|v: &u64| group_thousands(*v))
            .draw()?;

        chart.draw_series(LineSeries::new(series.iter().copied(), BLUE.stroke_width(2)))?;
        chart.draw_series(
            series
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, BLUE.filled())),
        )?;

        root.present()?;
    }
    Ok(svg)
}

fn rasterize(svg: &str) -> Result<Vec<u8>> {
    let options = usvg::Options {
        fontdb: Arc::clone(&FONT_DB),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg, &options).context("Failed to parse rendered chart SVG")?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .context("Failed to allocate chart pixmap")?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    pixmap.encode_png().context("Failed to encode chart PNG")
}

/// Axis ranges with padding so a single point or a flat series still has
/// a visible extent.
fn axis_ranges(series: &[(i64, u64)]) -> (std::ops::Range<i64>, std::ops::Range<u64>) {
    let (mut x_min, mut x_max) = (i64::MAX, i64::MIN);
    let (mut y_min, mut y_max) = (u64::MAX, u64::MIN);
    for &(x, y) in series {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    let x_pad = if x_max > x_min {
        ((x_max - x_min) / 20).max(1)
    } else {
        SINGLE_POINT_TIME_PAD
    };
    let y_pad = ((y_max - y_min) / 10).max(1);

    (
        x_min.saturating_sub(x_pad)..x_max.saturating_add(x_pad),
        y_min.saturating_sub(y_pad)..y_max.saturating_add(y_pad),
    )
}

fn format_time_label(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Render an integer with comma thousands separators (`12345` → `12,345`).
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn point(day: u32, value: u64) -> ChartPoint {
        ChartPoint {
            timestamp: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
            value,
        }
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12345), "12,345");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn single_point_gets_padded_ranges() {
        let (x, y) = axis_ranges(&[(1_000_000, 500)]);
        assert_eq!(x, (1_000_000 - 3600)..(1_000_000 + 3600));
        assert_eq!(y, 499..501);
    }

    #[test]
    fn ranges_cover_all_points() {
        let (x, y) = axis_ranges(&[(100, 10), (300, 110)]);
        assert!(x.start < 100 && x.end > 300);
        assert!(y.start < 10 && y.end > 110);
    }

    #[test]
    fn renders_png_bytes() {
        let points = vec![point(1, 100), point(2, 250), point(4, 1200)];
        let png = render_line_chart(&points, &ChartStyle::default()).unwrap();
        assert!(png.len() > PNG_SIGNATURE.len());
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn renders_single_point() {
        let png = render_line_chart(&[point(3, 42)], &ChartStyle::default()).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn empty_series_is_rejected() {
        assert!(render_line_chart(&[], &ChartStyle::default()).is_err());
    }
}
