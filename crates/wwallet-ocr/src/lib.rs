//! Warranty Wallet Text Extraction Boundary
//!
//! Wraps an external text-recognition capability and normalizes its output
//! into a single text blob or a typed failure.
//!
//! # Contract
//!
//! `extract_text(image_bytes) -> text` fails with:
//!
//! - [`OcrError::InvalidImage`] when the bytes are not a decodable image
//! - [`OcrError::NoTextFound`] when the recognizer returns zero text
//!   observations
//!
//! One attempt per invocation, no retries; callers treat any failure as
//! terminal.
//!
//! # Examples
//!
//! ```
//! use wwallet_ocr::{MockRecognizer, TextExtractor};
//!
//! let recognizer = MockRecognizer::new(&["ACME HARDWARE", "Cordless Drill"]);
//! let extractor = TextExtractor::new(recognizer);
//!
//! // Minimal PNG signature; a real caller passes photographed receipt bytes.
//! let image = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
//! let text = extractor.extract_text(&image).unwrap();
//! assert_eq!(text, "ACME HARDWARE\nCordless Drill");
//! ```

#![warn(missing_docs)]

pub mod tesseract;

use thiserror::Error;
use wwallet_domain::traits::TextRecognizer;

pub use tesseract::TesseractRecognizer;

/// Errors from the text extraction boundary.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The bytes could not be decoded as an image.
    #[error("invalid image data provided")]
    InvalidImage,

    /// The image decoded but the recognizer found no text observations.
    #[error("no text found in the image")]
    NoTextFound,

    /// The recognizer itself failed.
    #[error("text recognition failed: {0}")]
    Recognizer(String),
}

/// Adapter over an external [`TextRecognizer`].
///
/// Joins recognized observations into one newline-separated blob and maps
/// the recognizer's edge conditions onto the typed [`OcrError`] contract.
pub struct TextExtractor<R: TextRecognizer> {
    recognizer: R,
}

impl<R: TextRecognizer> TextExtractor<R> {
    /// Wrap a recognizer.
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }

    /// Extract all recognized text from `image`, one observation per line.
    ///
    /// Single attempt; any failure is terminal for this invocation.
    pub fn extract_text(&self, image: &[u8]) -> Result<String, OcrError> {
        if !is_supported_image(image) {
            return Err(OcrError::InvalidImage);
        }

        let observations = self
            .recognizer
            .recognize(image)
            .map_err(|e| OcrError::Recognizer(e.to_string()))?;

        if observations.is_empty() {
            return Err(OcrError::NoTextFound);
        }

        Ok(observations.join("\n"))
    }
}

/// Magic-number sniff for the raster formats receipt photos arrive in.
fn is_supported_image(bytes: &[u8]) -> bool {
    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];
    const TIFF_LE: &[u8] = &[0x49, 0x49, 0x2A, 0x00];
    const TIFF_BE: &[u8] = &[0x4D, 0x4D, 0x00, 0x2A];

    if bytes.starts_with(PNG)
        || bytes.starts_with(JPEG)
        || bytes.starts_with(TIFF_LE)
        || bytes.starts_with(TIFF_BE)
        || bytes.starts_with(b"GIF87a")
        || bytes.starts_with(b"GIF89a")
    {
        return true;
    }

    // RIFF....WEBP
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return true;
    }

    // ISO BMFF (HEIC/HEIF): size box followed by "ftyp"
    bytes.len() >= 12 && &bytes[4..8] == b"ftyp"
}

/// Mock recognizer for deterministic testing.
///
/// Returns pre-configured observations without touching any OCR engine.
#[derive(Debug, Clone, Default)]
pub struct MockRecognizer {
    observations: Vec<String>,
    error: Option<String>,
}

impl MockRecognizer {
    /// Recognizer that yields the given observations for every image.
    pub fn new(observations: &[&str]) -> Self {
        Self {
            observations: observations.iter().map(|s| s.to_string()).collect(),
            error: None,
        }
    }

    /// Recognizer that yields zero observations.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Recognizer that fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            observations: Vec::new(),
            error: Some(message.into()),
        }
    }
}

impl TextRecognizer for MockRecognizer {
    type Error = String;

    fn recognize(&self, _image: &[u8]) -> Result<Vec<String>, Self::Error> {
        if let Some(message) = &self.error {
            return Err(message.clone());
        }
        Ok(self.observations.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_extracts_joined_text() {
        let extractor = TextExtractor::new(MockRecognizer::new(&[
            "ACME HARDWARE",
            "Cordless Drill",
            "$89.99",
        ]));

        let text = extractor.extract_text(PNG_HEADER).unwrap();
        assert_eq!(text, "ACME HARDWARE\nCordless Drill\n$89.99");
    }

    #[test]
    fn test_invalid_image_bytes() {
        let extractor = TextExtractor::new(MockRecognizer::new(&["text"]));

        let result = extractor.extract_text(b"definitely not an image");
        assert!(matches!(result, Err(OcrError::InvalidImage)));
    }

    #[test]
    fn test_empty_bytes_are_invalid() {
        let extractor = TextExtractor::new(MockRecognizer::new(&["text"]));
        assert!(matches!(
            extractor.extract_text(&[]),
            Err(OcrError::InvalidImage)
        ));
    }

    #[test]
    fn test_zero_observations_is_no_text_found() {
        let extractor = TextExtractor::new(MockRecognizer::empty());

        let result = extractor.extract_text(PNG_HEADER);
        assert!(matches!(result, Err(OcrError::NoTextFound)));
    }

    #[test]
    fn test_recognizer_failure_is_wrapped() {
        let extractor = TextExtractor::new(MockRecognizer::failing("engine crashed"));

        match extractor.extract_text(PNG_HEADER) {
            Err(OcrError::Recognizer(message)) => assert!(message.contains("engine crashed")),
            other => panic!("Expected Recognizer error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_supported_formats() {
        assert!(is_supported_image(PNG_HEADER));
        assert!(is_supported_image(&[0xFF, 0xD8, 0xFF, 0xE0]));
        assert!(is_supported_image(b"GIF89a trailing"));
        assert!(is_supported_image(b"RIFF\x00\x00\x00\x00WEBPVP8 "));
        assert!(is_supported_image(b"\x00\x00\x00\x18ftypheic rest"));
        assert!(!is_supported_image(b"%PDF-1.7"));
    }
}
