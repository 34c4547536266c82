//! Tesseract-backed recognizer
//!
//! Bridges the external `tesseract` binary: image bytes go in over stdin,
//! recognized text comes back on stdout, one observation per non-empty
//! line. Recognition quality and language support are entirely the
//! engine's concern.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use wwallet_domain::traits::TextRecognizer;

/// Recognizer that shells out to the `tesseract` binary.
pub struct TesseractRecognizer {
    binary: PathBuf,
    language: String,
}

impl TesseractRecognizer {
    /// Use `tesseract` from `PATH` with English recognition.
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            language: "eng".to_string(),
        }
    }

    /// Use a specific tesseract binary.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Override the recognition language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRecognizer for TesseractRecognizer {
    type Error = String;

    fn recognize(&self, image: &[u8]) -> Result<Vec<String>, Self::Error> {
        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout", "-l", &self.language])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("failed to launch {}: {}", self.binary.display(), e))?;

        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| "failed to open tesseract stdin".to_string())?;
            stdin
                .write_all(image)
                .map_err(|e| format!("failed to feed image to tesseract: {}", e))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| format!("tesseract did not complete: {}", e))?;

        if !output.status.success() {
            return Err(format!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_reports_launch_failure() {
        let recognizer = TesseractRecognizer::new().with_binary("/nonexistent/tesseract");

        let result = recognizer.recognize(&[0xFF, 0xD8, 0xFF]);
        let message = result.unwrap_err();
        assert!(message.contains("failed to launch"));
    }
}
