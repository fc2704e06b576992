//! Factory for creating the server state from configuration.

use scribe_core::config::ScribeConfig;
use scribe_core::coordinator::ExtractionCoordinator;
use scribe_core::embedding::EmbeddingGenerator;
use scribe_core::error::ScribeResult;
use scribe_embeddings::EmbedderFactory;
use scribe_extractors::{ExtractorFactory, OcrEngine};
use scribe_stores::DocumentStoreFactory;

use crate::state::AppState;

/// Create the application state from configuration.
///
/// Fails when Tesseract or PDFium cannot be found. The embedding model is
/// resolved lazily on first use, so a missing model never blocks startup.
pub async fn create_state(config: &ScribeConfig) -> ScribeResult<AppState> {
    let engine = ExtractorFactory::tesseract()?;
    let backend = ExtractorFactory::pdfium(config.extraction.pdfium_library_dir.as_deref())?;

    let ocr_engine = if engine.version().is_empty() {
        engine.name().to_string()
    } else {
        engine.version().to_string()
    };
    tracing::info!("OCR engine: {}", ocr_engine);

    let pipeline =
        ExtractorFactory::pipeline(backend, engine, config.extraction.document_config());
    let embeddings = EmbeddingGenerator::new(EmbedderFactory::model_handle(&config.embedding));
    let coordinator = attach_store(ExtractionCoordinator::new(pipeline, embeddings), config).await?;

    Ok(AppState::new(coordinator, ocr_engine))
}

/// Attach the configured document store, if any.
pub async fn attach_store(
    coordinator: ExtractionCoordinator,
    config: &ScribeConfig,
) -> ScribeResult<ExtractionCoordinator> {
    match DocumentStoreFactory::create(&config.store).await? {
        Some(store) => {
            tracing::info!("Persisting extractions to {}", store.name());
            Ok(coordinator.with_store(store))
        }
        None => {
            tracing::info!("No document store configured; results are not persisted");
            Ok(coordinator)
        }
    }
}
