//! Media helpers for the prestige bot: attachment type checks and chart rendering.

pub mod chart;
pub mod mime_detect;

pub use chart::{render_line_chart, ChartPoint, ChartStyle};
pub use mime_detect::has_allowed_extension;
