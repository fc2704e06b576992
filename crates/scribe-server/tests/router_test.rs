//! Router tests driving the HTTP surface with in-memory collaborators.

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use image::{DynamicImage, ImageFormat, RgbImage};
use scribe_core::{
    DocumentStore, EmbeddingGenerator, ExtractionCoordinator, ScribeError, ScribeResult,
    ServerConfig, StoredExtraction, EMBEDDING_DIM,
};
use scribe_extractors::{
    DocumentBackend, DocumentExtractionConfig, ExtractError, ExtractResult, ExtractorFactory,
    OcrEngine, OcrOutput, PageSource,
};
use scribe_server::{create_server, AppState};
use scribe_stores::InMemoryDocumentStore;
use serde_json::Value;
use tower::ServiceExt;

const BOUNDARY: &str = "scribe-test-boundary";

struct NoPdf;

impl DocumentBackend for NoPdf {
    fn open<'a>(&'a self, _content: &'a [u8]) -> ExtractResult<Box<dyn PageSource + 'a>> {
        Err(ExtractError::document("not a PDF"))
    }

    fn name(&self) -> &str {
        "none"
    }
}

struct FixedEngine {
    calls: AtomicUsize,
}

impl OcrEngine for FixedEngine {
    fn recognize(&self, _image: &DynamicImage) -> ExtractResult<OcrOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(OcrOutput {
            text: "Momentum is conserved".to_string(),
            confidences: vec![88.0, 92.0, 90.0],
        })
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

struct DownStore;

#[async_trait]
impl DocumentStore for DownStore {
    async fn upsert(&self, _record: &StoredExtraction) -> ScribeResult<()> {
        Err(ScribeError::persistence("down"))
    }

    async fn ping(&self) -> ScribeResult<()> {
        Err(ScribeError::store_connection("down"))
    }

    fn name(&self) -> &str {
        "down"
    }
}

fn coordinator(engine: Arc<FixedEngine>) -> ExtractionCoordinator {
    let pipeline = ExtractorFactory::pipeline(
        Arc::new(NoPdf),
        engine,
        DocumentExtractionConfig::default(),
    );
    ExtractionCoordinator::new(pipeline, EmbeddingGenerator::fallback_only())
}

fn engine() -> Arc<FixedEngine> {
    Arc::new(FixedEngine {
        calls: AtomicUsize::new(0),
    })
}

fn app(coordinator: ExtractionCoordinator) -> Router {
    create_server(
        AppState::new(coordinator, "fixed 1.0"),
        &ServerConfig::default(),
    )
}

fn png_bytes() -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::new(4, 4))
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

enum Part<'a> {
    File(&'a str, &'a [u8]),
    Text(&'a str, &'a str),
}

fn multipart(parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File(filename, content) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(content);
            }
            Part::Text(name, value) => {
                let disposition =
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}");
                body.extend_from_slice(disposition.as_bytes());
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::post("/extract-ocr")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_root() {
    let (status, body) = send(
        app(coordinator(engine())),
        Request::get("/").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
}

#[tokio::test]
async fn test_health_without_model_or_store() {
    let (status, body) = send(
        app(coordinator(engine())),
        Request::get("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["ocrEngine"], "fixed 1.0");
    assert_eq!(body["embeddingModel"], "not available");
    assert_eq!(body["store"], "not connected");
}

#[tokio::test]
async fn test_health_reports_store() {
    let up = coordinator(engine()).with_store(Arc::new(InMemoryDocumentStore::new()));
    let (_, body) = send(app(up), Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(body["store"], "connected");

    let down = coordinator(engine()).with_store(Arc::new(DownStore));
    let (_, body) = send(app(down), Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(body["store"], "not connected");
}

#[tokio::test]
async fn test_extract_image_upload() {
    let engine = engine();
    let store = Arc::new(InMemoryDocumentStore::new());
    let app = app(coordinator(engine.clone()).with_store(store.clone()));
    let png = png_bytes();

    let (status, body) = send(
        app,
        multipart(&[
            Part::File("board.png", &png),
            Part::Text("file_id", "65f1c0ffee0123456789abcd"),
            Part::Text("labels", r#"{"course":"PHYS 101"}"#),
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["correlationId"], "65f1c0ffee0123456789abcd");
    assert_eq!(body["text"], "Momentum is conserved");
    assert_eq!(body["metadata"]["pageCount"], 1);
    assert_eq!(body["metadata"]["wordCount"], 3);
    assert_eq!(body["metadata"]["averageConfidence"], 90.0);
    assert_eq!(body["labels"]["course"], "PHYS 101");
    assert_eq!(body["embeddings"].as_array().unwrap().len(), EMBEDDING_DIM);
    assert_eq!(engine.calls.load(Ordering::SeqCst), 1);

    let stored = store.get("65f1c0ffee0123456789abcd").await.unwrap();
    assert_eq!(stored.text, "Momentum is conserved");
}

#[tokio::test]
async fn test_extract_survives_store_failure() {
    let app = app(coordinator(engine()).with_store(Arc::new(DownStore)));
    let png = png_bytes();

    let (status, body) = send(
        app,
        multipart(&[Part::File("board.png", &png), Part::Text("file_id", "abc")]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "Momentum is conserved");
}

#[tokio::test]
async fn test_extract_unsupported_format() {
    let engine = engine();
    let (status, body) = send(
        app(coordinator(engine.clone())),
        multipart(&[Part::File("notes.docx", b"PK\x03\x04")]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "UNSUPPORTED_FORMAT");
    assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_extract_missing_file() {
    let (status, body) = send(
        app(coordinator(engine())),
        multipart(&[Part::Text("file_id", "abc")]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_extract_broken_pdf() {
    let (status, body) = send(
        app(coordinator(engine())),
        multipart(&[Part::File("scan.pdf", b"garbage")]),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "DOCUMENT_PROCESSING_FAILURE");
}

#[tokio::test]
async fn test_generate_embeddings() {
    let request = Request::post("/generate-embeddings")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("text=kinetic+energy"))
        .unwrap();

    let (status, body) = send(app(coordinator(engine())), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["dimension"], EMBEDDING_DIM);

    let expected = scribe_core::hash_embedding("kinetic energy");
    let actual: Vec<f32> = body["embeddings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap() as f32)
        .collect();
    assert_eq!(actual, expected.as_slice());
}
