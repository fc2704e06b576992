//! Document backends: open document bytes, read text layers, rasterize pages.

use image::DynamicImage;

use crate::error::ExtractResult;

/// An opened multi-page document.
///
/// Pages are addressed by zero-based index in source order.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Text from the page's embedded text layer (empty when it has none).
    fn direct_text(&self, index: usize) -> ExtractResult<String>;

    /// Render the page to a raster image, scaling both axes by `scale`.
    fn render(&self, index: usize, scale: f32) -> ExtractResult<DynamicImage>;
}

/// Opens raw document bytes into a [`PageSource`].
///
/// Implementations are blocking; callers run them on the blocking pool.
pub trait DocumentBackend: Send + Sync {
    /// Parse `content` as a document.
    fn open<'a>(&'a self, content: &'a [u8]) -> ExtractResult<Box<dyn PageSource + 'a>>;

    /// Human-readable name for this backend.
    fn name(&self) -> &str;
}

#[cfg(feature = "pdfium")]
pub use self::pdfium::PdfiumBackend;

#[cfg(feature = "pdfium")]
mod pdfium {
    use std::path::Path;

    use image::DynamicImage;
    use pdfium_render::prelude::*;
    use tracing::debug;

    use super::{DocumentBackend, PageSource};
    use crate::error::{ExtractError, ExtractResult};

    /// PDF backend bound to the PDFium library.
    pub struct PdfiumBackend {
        pdfium: Pdfium,
    }

    impl PdfiumBackend {
        /// Bind to the system-wide PDFium library.
        pub fn new() -> ExtractResult<Self> {
            let bindings = Pdfium::bind_to_system_library().map_err(|e| {
                ExtractError::Configuration(format!("PDFium library not found: {}", e))
            })?;
            debug!("Bound to system PDFium library");
            Ok(Self {
                pdfium: Pdfium::new(bindings),
            })
        }

        /// Bind to the PDFium library in `dir`, falling back to the system library.
        pub fn from_dir(dir: impl AsRef<Path>) -> ExtractResult<Self> {
            let library = Pdfium::pdfium_platform_library_name_at_path(dir.as_ref());
            let bindings = Pdfium::bind_to_library(&library)
                .or_else(|_| Pdfium::bind_to_system_library())
                .map_err(|e| {
                    ExtractError::Configuration(format!("PDFium library not found: {}", e))
                })?;
            debug!(library = ?library, "Bound to PDFium library");
            Ok(Self {
                pdfium: Pdfium::new(bindings),
            })
        }
    }

    struct PdfiumPages<'a> {
        document: PdfDocument<'a>,
    }

    impl<'a> PdfiumPages<'a> {
        fn page(&self, index: usize) -> ExtractResult<PdfPage<'a>> {
            let index = u16::try_from(index)
                .map_err(|_| ExtractError::document(format!("page index {} out of range", index)))?;
            self.document
                .pages()
                .get(index)
                .map_err(|e| ExtractError::document(format!("failed to load page: {}", e)))
        }
    }

    impl PageSource for PdfiumPages<'_> {
        fn page_count(&self) -> usize {
            self.document.pages().len() as usize
        }

        fn direct_text(&self, index: usize) -> ExtractResult<String> {
            let page = self.page(index)?;
            let text = page
                .text()
                .map_err(|e| ExtractError::document(format!("failed to read text layer: {}", e)))?;
            Ok(text.all())
        }

        fn render(&self, index: usize, scale: f32) -> ExtractResult<DynamicImage> {
            let page = self.page(index)?;
            let config = PdfRenderConfig::new().scale_page_by_factor(scale);
            let bitmap = page
                .render_with_config(&config)
                .map_err(|e| ExtractError::document(format!("failed to rasterize page: {}", e)))?;
            Ok(bitmap.as_image())
        }
    }

    impl DocumentBackend for PdfiumBackend {
        fn open<'a>(&'a self, content: &'a [u8]) -> ExtractResult<Box<dyn PageSource + 'a>> {
            let document = self
                .pdfium
                .load_pdf_from_byte_slice(content, None)
                .map_err(|e| ExtractError::document(format!("failed to open PDF: {}", e)))?;
            Ok(Box::new(PdfiumPages { document }))
        }

        fn name(&self) -> &str {
            "pdfium"
        }
    }
}
