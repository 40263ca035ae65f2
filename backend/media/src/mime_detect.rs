//! Attachment type checks.
//!
//! Only the filename is inspected; the bytes are never sniffed.

use std::path::Path;

/// Case-insensitive check of a filename's extension against an allow-list.
///
/// Entries may be written with or without the leading dot (`"png"`, `".png"`).
pub fn has_allowed_extension(filename: &str, allowed: &[String]) -> bool {
    let Some(ext) = Path::new(filename).extension().and_then(|e| e.to_str()) else {
        return false;
    };
    allowed
        .iter()
        .any(|a| a.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        ["png", "jpg", ".jpeg", "webp"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn accepts_allowed_extensions_case_insensitively() {
        assert!(has_allowed_extension("shot.PNG", &allowed()));
        assert!(has_allowed_extension("shot.jpeg", &allowed()));
        assert!(has_allowed_extension("my.screen.webp", &allowed()));
    }

    #[test]
    fn rejects_gif_and_extensionless() {
        assert!(!has_allowed_extension("shot.gif", &allowed()));
        assert!(!has_allowed_extension("png", &allowed()));
        assert!(!has_allowed_extension("shot.png.txt", &allowed()));
    }
}
