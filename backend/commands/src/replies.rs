//! User-visible reply texts. Every command ends with exactly one of these.

use prestigebot_tracker::format_thousands;

pub const FORMAT_ERROR: &str = "❗ Please upload a PNG, JPG, JPEG, or WEBP image.";
pub const DOWNLOAD_FAILED: &str = "❌ Failed to download the image.";
pub const OCR_FAILED: &str = "❌ Could not read text from the screenshot. Please try again later.";
pub const VALUE_NOT_FOUND: &str = "❌ Could not find a prestige value in the screenshot.";
pub const REGRESSION: &str = "❌ Update screenshot: new prestige is lower than the last logged value.";
pub const DUPLICATE: &str = "ℹ️ This amount of prestige is already logged.";
pub const NO_DATA: &str = "No prestige data found. Use /cpt to add data first.";
pub const GENERIC_FAILURE: &str = "⚠️ Something went wrong while processing your request.";

pub fn invalid_source(source_name: &str) -> String {
    format!("❌ Screenshot does not appear to be from {source_name}. Please upload a valid screenshot.")
}

/// `raw` is echoed exactly as read from the screenshot, separators included.
pub fn saved(raw: &str) -> String {
    format!("🏅 Prestige: `{raw}` saved!")
}

pub fn report(current: u64) -> String {
    format!(
        "# Current Prestige: `{}`\n## To update, use `/cpt` in chat.",
        format_thousands(current)
    )
}
