//! Screenshot understanding: turn image bytes into recognised text.
//!
//! Two interchangeable [`TextExtractor`](prestigebot_core::TextExtractor)
//! backends are provided and chosen at startup:
//! - [`TesseractExtractor`] runs the local `tesseract` binary on a grayscale copy
//! - [`OcrSpaceExtractor`] posts the image to the OCR.space HTTP API

pub mod ocr;
pub mod preprocess;

pub use ocr::{OcrSpaceExtractor, OcrSpaceOptions, TesseractExtractor};
pub use preprocess::to_grayscale_png;
