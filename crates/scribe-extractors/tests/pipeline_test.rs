//! Integration tests for the extraction pipeline.
//!
//! Drives PDFs and images through the public API with an in-memory document
//! backend and a scripted OCR engine.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use image::{DynamicImage, ImageFormat, RgbImage};
use scribe_extractors::{
    DocumentBackend, DocumentExtractionConfig, ExtractError, ExtractResult, ExtractorFactory,
    OcrEngine, OcrOutput, PageSource, SourceFormat, PAGE_SEPARATOR,
};

/// A document is a list of text layers; one 10x10 raster per page.
struct MemoryBackend {
    pages: Vec<String>,
}

struct MemoryPages<'a> {
    pages: &'a [String],
}

impl PageSource for MemoryPages<'_> {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn direct_text(&self, index: usize) -> ExtractResult<String> {
        Ok(self.pages[index].clone())
    }

    fn render(&self, _index: usize, scale: f32) -> ExtractResult<DynamicImage> {
        let side = (10.0 * scale) as u32;
        Ok(DynamicImage::ImageRgb8(RgbImage::new(side, side)))
    }
}

impl DocumentBackend for MemoryBackend {
    fn open<'a>(&'a self, content: &'a [u8]) -> ExtractResult<Box<dyn PageSource + 'a>> {
        if !content.starts_with(b"%PDF") {
            return Err(ExtractError::document("not a PDF"));
        }
        Ok(Box::new(MemoryPages { pages: &self.pages }))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Answers by image width so each test can tell raster sizes apart.
struct SizedEngine {
    by_width: HashMap<u32, OcrOutput>,
    calls: Mutex<Vec<u32>>,
}

impl OcrEngine for SizedEngine {
    fn recognize(&self, image: &DynamicImage) -> ExtractResult<OcrOutput> {
        self.calls.lock().unwrap().push(image.width());
        self.by_width
            .get(&image.width())
            .cloned()
            .ok_or_else(|| ExtractError::Ocr(format!("no script for width {}", image.width())))
    }

    fn name(&self) -> &str {
        "sized"
    }
}

fn engine(entries: &[(u32, &str, &[f32])]) -> Arc<SizedEngine> {
    let by_width = entries
        .iter()
        .map(|(w, text, conf)| {
            (
                *w,
                OcrOutput {
                    text: text.to_string(),
                    confidences: conf.to_vec(),
                },
            )
        })
        .collect();
    Arc::new(SizedEngine {
        by_width,
        calls: Mutex::new(Vec::new()),
    })
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

#[tokio::test]
async fn test_mixed_pdf_keeps_page_order_and_methods() {
    let text_layer = "Lecture 3: thermodynamics and the second law of heat engines, part one.";
    let backend = Arc::new(MemoryBackend {
        pages: vec![text_layer.to_string(), "  ".to_string()],
    });
    let ocr = engine(&[(20, "  Handwritten margin notes \n", &[90.0, 70.0, -1.0])]);
    let pipeline = ExtractorFactory::pipeline(
        backend,
        ocr.clone(),
        DocumentExtractionConfig::default(),
    );

    let document = pipeline.extract(b"%PDF-1.7", "Notes.PDF").await.unwrap();

    assert_eq!(document.format(), &SourceFormat::Pdf);
    assert_eq!(document.page_count(), 2);
    assert!(!document.pages()[0].is_scanned());
    assert_eq!(document.pages()[1].ocr_confidence(), Some(80.0));
    assert_eq!(
        document.full_text(),
        format!("{}{}{}", text_layer, PAGE_SEPARATOR, "Handwritten margin notes")
    );
    assert_eq!(document.average_confidence(), Some(80.0));
    assert_eq!(*ocr.calls.lock().unwrap(), vec![20]);
}

#[tokio::test]
async fn test_image_upload_is_single_scanned_page() {
    let backend = Arc::new(MemoryBackend { pages: Vec::new() });
    let ocr = engine(&[(32, "Receipt total 12.50", &[88.6, 91.2])]);
    let pipeline = ExtractorFactory::pipeline(
        backend,
        ocr.clone(),
        DocumentExtractionConfig::default(),
    );

    let document = pipeline.extract(&png(32, 16), "receipt.jpeg").await.unwrap();

    assert_eq!(
        document.format(),
        &SourceFormat::Image {
            format: "jpeg".to_string()
        }
    );
    assert_eq!(document.page_count(), 1);
    assert_eq!(document.full_text(), "Receipt total 12.50");
    assert_eq!(document.word_count(), 3);
    // Confidences are truncated to integers before averaging.
    assert_eq!(document.average_confidence(), Some(89.5));
}

#[tokio::test]
async fn test_custom_threshold_and_scale() {
    let backend = Arc::new(MemoryBackend {
        pages: vec!["short but enough".to_string()],
    });
    let ocr = engine(&[(30, "unused", &[50.0])]);
    let config = DocumentExtractionConfig {
        min_direct_text_chars: 5,
        raster_scale: 3.0,
        scratch_dir: None,
    };
    let pipeline = ExtractorFactory::pipeline(backend, ocr.clone(), config);

    let document = pipeline.extract(b"%PDF", "a.pdf").await.unwrap();
    assert!(!document.pages()[0].is_scanned());
    assert!(ocr.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_failures_surface_as_typed_errors() {
    let backend = Arc::new(MemoryBackend {
        pages: vec!["".to_string()],
    });
    let ocr = engine(&[]);
    let pipeline = ExtractorFactory::pipeline(
        backend,
        ocr,
        DocumentExtractionConfig::default(),
    );

    let unsupported = pipeline.extract(b"GIF89a", "loop.gif").await.unwrap_err();
    assert!(matches!(unsupported, ExtractError::UnsupportedFormat(_)));

    let unreadable = pipeline.extract(b"garbage", "broken.pdf").await.unwrap_err();
    assert!(matches!(
        unreadable,
        ExtractError::DocumentProcessing { .. }
    ));
    assert_eq!(unreadable.page(), None);

    let page_failure = pipeline.extract(b"%PDF", "scan.pdf").await.unwrap_err();
    assert_eq!(page_failure.page(), Some(0));

    let bad_image = pipeline.extract(b"not an image", "photo.png").await.unwrap_err();
    assert!(matches!(bad_image, ExtractError::Ocr(_)));
}
