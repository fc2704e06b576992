//! OCR engine abstraction and the Tesseract implementation.

use image::DynamicImage;

use crate::error::ExtractResult;
use crate::types::OcrOutput;

/// Recognition engine run on a single raster image.
///
/// Implementations are blocking; callers run them on the blocking pool.
pub trait OcrEngine: Send + Sync {
    /// Transcribe `image` and report per-token confidences.
    fn recognize(&self, image: &DynamicImage) -> ExtractResult<OcrOutput>;

    /// Human-readable name for this engine.
    fn name(&self) -> &str;
}

#[cfg(feature = "tesseract")]
pub use self::tesseract::TesseractEngine;

#[cfg(feature = "tesseract")]
mod tesseract {
    use image::DynamicImage;
    use rusty_tesseract::{Args, Image};
    use tracing::debug;

    use super::OcrEngine;
    use crate::error::{ExtractError, ExtractResult};
    use crate::types::OcrOutput;

    /// OCR engine backed by the Tesseract CLI.
    ///
    /// Construction fails when no `tesseract` binary can be found, since every
    /// image and every scanned page depends on it.
    pub struct TesseractEngine {
        args: Args,
        version: String,
    }

    impl TesseractEngine {
        /// Create an engine with Tesseract's default arguments.
        pub fn new() -> ExtractResult<Self> {
            Self::with_args(Args::default())
        }

        /// Create an engine with custom arguments.
        pub fn with_args(args: Args) -> ExtractResult<Self> {
            let version = rusty_tesseract::get_tesseract_version().map_err(|e| {
                ExtractError::Configuration(format!("Tesseract is not available: {}", e))
            })?;
            let version = version.lines().next().unwrap_or_default().trim().to_string();
            debug!(version = %version, "Tesseract engine ready");

            Ok(Self { args, version })
        }

        /// Version line reported by the Tesseract binary.
        pub fn version(&self) -> &str {
            &self.version
        }
    }

    impl OcrEngine for TesseractEngine {
        fn recognize(&self, image: &DynamicImage) -> ExtractResult<OcrOutput> {
            let input = Image::from_dynamic_image(image)
                .map_err(|e| ExtractError::Ocr(format!("Failed to load image: {}", e)))?;

            let data = rusty_tesseract::image_to_data(&input, &self.args)
                .map_err(|e| ExtractError::Ocr(e.to_string()))?;
            let text = rusty_tesseract::image_to_string(&input, &self.args)
                .map_err(|e| ExtractError::Ocr(e.to_string()))?;

            Ok(OcrOutput {
                text,
                confidences: data.data.iter().map(|d| d.conf).collect(),
            })
        }

        fn name(&self) -> &str {
            "tesseract"
        }
    }
}
