//! Image text extraction through OCR.
//!
//! Decodes a raster image, converts it to grayscale and hands it to an
//! [`OcrEngine`]. The engine's per-token confidences are folded into a single
//! score where 0 means "no usable signal".

use std::sync::Arc;

use async_trait::async_trait;
use image::DynamicImage;
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::ocr::OcrEngine;
use crate::types::{ExtractedDocument, ImageText};
use crate::Extractor;

/// File extensions accepted as single raster images.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff", "bmp"];

/// OCR-based extractor for a single raster image.
#[derive(Clone)]
pub struct ImageTextExtractor {
    engine: Arc<dyn OcrEngine>,
}

impl ImageTextExtractor {
    /// Create an extractor around the given OCR engine.
    pub fn new(engine: Arc<dyn OcrEngine>) -> Self {
        Self { engine }
    }

    /// Recognize text in encoded image bytes (blocking).
    pub fn extract_text(&self, content: &[u8]) -> ExtractResult<ImageText> {
        let image = image::load_from_memory(content)
            .map_err(|e| ExtractError::Ocr(format!("Failed to decode image: {}", e)))?;

        self.recognize(&image)
    }

    /// Recognize text in an already decoded image (blocking).
    pub fn recognize(&self, image: &DynamicImage) -> ExtractResult<ImageText> {
        let gray = DynamicImage::ImageLuma8(image.to_luma8());
        let output = self.engine.recognize(&gray).map_err(|e| match e {
            ExtractError::Ocr(_) => e,
            other => ExtractError::Ocr(other.to_string()),
        })?;

        let confidence = mean_confidence(&output.confidences);
        debug!(
            engine = self.engine.name(),
            tokens = output.confidences.len(),
            confidence,
            "OCR complete"
        );

        Ok(ImageText {
            text: output.text.trim().to_string(),
            confidence,
        })
    }
}

/// Mean of the token confidences that are positive integers.
///
/// Fractional scores are truncated before the test, so `0.7` counts as 0 and is
/// dropped along with the engine's `-1` markers. Returns 0 when nothing passes.
pub fn mean_confidence(confidences: &[f32]) -> f64 {
    let accepted: Vec<i64> = confidences
        .iter()
        .map(|c| c.trunc() as i64)
        .filter(|c| *c > 0)
        .collect();

    if accepted.is_empty() {
        return 0.0;
    }
    accepted.iter().sum::<i64>() as f64 / accepted.len() as f64
}

/// Lower-cased extension of `filename`, if any.
pub(crate) fn extension_of(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

#[async_trait]
impl Extractor for ImageTextExtractor {
    async fn extract(&self, content: &[u8], filename: &str) -> ExtractResult<ExtractedDocument> {
        let format = extension_of(filename).unwrap_or_default();
        let content = content.to_vec();
        let extractor = self.clone();

        // Decoding and OCR are CPU/process bound
        let text = tokio::task::spawn_blocking(move || extractor.extract_text(&content)).await??;

        Ok(ExtractedDocument::from_image(format, text))
    }

    fn supported_extensions(&self) -> &[&str] {
        IMAGE_EXTENSIONS
    }

    fn name(&self) -> &str {
        "image-ocr"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OcrOutput;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct ScriptedEngine {
        output: OcrOutput,
        calls: AtomicUsize,
        saw_grayscale: Mutex<Option<bool>>,
    }

    impl ScriptedEngine {
        fn new(text: &str, confidences: Vec<f32>) -> Self {
            Self {
                output: OcrOutput {
                    text: text.to_string(),
                    confidences,
                },
                calls: AtomicUsize::new(0),
                saw_grayscale: Mutex::new(None),
            }
        }
    }

    impl OcrEngine for ScriptedEngine {
        fn recognize(&self, image: &DynamicImage) -> ExtractResult<OcrOutput> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.saw_grayscale.lock().unwrap() =
                Some(matches!(image, DynamicImage::ImageLuma8(_)));
            Ok(self.output.clone())
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    struct FailingEngine;

    impl OcrEngine for FailingEngine {
        fn recognize(&self, _image: &DynamicImage) -> ExtractResult<OcrOutput> {
            Err(ExtractError::Ocr("engine exited with status 1".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn color_png() -> Vec<u8> {
        let img = RgbImage::from_pixel(16, 8, Rgb([200, 30, 90]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_mean_confidence_drops_sentinels() {
        assert_eq!(mean_confidence(&[-1.0, 90.0, -1.0, 70.0]), 80.0);
    }

    #[test]
    fn test_mean_confidence_truncates_fractions() {
        // 0.9 truncates to 0 and is dropped; 95.8 counts as 95
        assert_eq!(mean_confidence(&[0.9, 95.8, 85.2]), 90.0);
    }

    #[test]
    fn test_mean_confidence_zero_when_nothing_passes() {
        assert_eq!(mean_confidence(&[]), 0.0);
        assert_eq!(mean_confidence(&[-1.0, 0.0, 0.4]), 0.0);
    }

    #[test]
    fn test_extract_text_trims_and_counts() {
        let engine = Arc::new(ScriptedEngine::new(
            "  Invoice 42\nTotal due  \n\n",
            vec![-1.0, 96.0, 88.0],
        ));
        let extractor = ImageTextExtractor::new(engine.clone());

        let result = extractor.extract_text(&color_png()).unwrap();

        assert_eq!(result.text, "Invoice 42\nTotal due");
        assert_eq!(result.word_count(), 4);
        assert_eq!(result.character_count(), 20);
        assert_eq!(result.confidence, 92.0);
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_engine_receives_grayscale() {
        let engine = Arc::new(ScriptedEngine::new("x", vec![50.0]));
        let extractor = ImageTextExtractor::new(engine.clone());

        extractor.extract_text(&color_png()).unwrap();

        assert_eq!(*engine.saw_grayscale.lock().unwrap(), Some(true));
    }

    #[test]
    fn test_undecodable_bytes_fail_with_ocr_error() {
        let engine = Arc::new(ScriptedEngine::new("never", vec![]));
        let extractor = ImageTextExtractor::new(engine.clone());

        let err = extractor.extract_text(b"definitely not an image").unwrap_err();

        assert!(matches!(err, ExtractError::Ocr(_)));
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_engine_failure_propagates() {
        let extractor = ImageTextExtractor::new(Arc::new(FailingEngine));
        let err = extractor.extract_text(&color_png()).unwrap_err();
        assert!(matches!(err, ExtractError::Ocr(_)));
    }

    #[tokio::test]
    async fn test_extract_wraps_one_page_document() {
        let engine = Arc::new(ScriptedEngine::new("Receipt", vec![77.0]));
        let extractor = ImageTextExtractor::new(engine);

        let doc = extractor.extract(&color_png(), "scan.PNG").await.unwrap();

        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.full_text(), "Receipt");
        assert_eq!(doc.average_confidence(), Some(77.0));
        assert_eq!(
            doc.format(),
            &crate::types::SourceFormat::Image {
                format: "png".to_string()
            }
        );
    }

    #[test]
    fn test_extractor_supports() {
        let extractor = ImageTextExtractor::new(Arc::new(FailingEngine));
        assert!(extractor.supports("png"));
        assert!(extractor.supports("JPEG"));
        assert!(extractor.supports("tiff"));
        assert!(extractor.supports("bmp"));
        assert!(!extractor.supports("gif"));
        assert!(!extractor.supports("pdf"));
    }
}
