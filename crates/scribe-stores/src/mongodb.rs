//! MongoDB document store implementation.

use async_trait::async_trait;

use scribe_core::error::{ScribeError, ScribeResult};
use scribe_core::traits::{DocumentStore, DocumentStoreConfig};
use scribe_core::types::StoredExtraction;

use mongodb::{
    bson::{doc, oid::ObjectId, Bson, DateTime, Document},
    options::{ClientOptions, UpdateOptions},
    Client, Collection,
};

/// MongoDB store updating one document per uploaded file.
///
/// Documents are addressed by `_id`: an ObjectId when the correlation
/// identifier parses as one, the plain string otherwise.
pub struct MongoDocumentStore {
    client: Client,
    collection: Collection<Document>,
}

impl MongoDocumentStore {
    /// Create a new MongoDB document store.
    ///
    /// The driver connects lazily; use [`DocumentStore::ping`] to check reachability.
    pub async fn new(config: &DocumentStoreConfig) -> ScribeResult<Self> {
        let mut client_options = ClientOptions::parse(&config.url).await.map_err(|e| {
            ScribeError::Configuration(format!("Failed to parse MongoDB URL: {}", e))
        })?;
        client_options.app_name = Some("scribe".to_string());

        let client = Client::with_options(client_options).map_err(|e| {
            ScribeError::store_connection(format!("Failed to create MongoDB client: {}", e))
        })?;

        let collection = client
            .database(&config.database)
            .collection::<Document>(&config.collection);

        tracing::info!(
            "MongoDB document store using {}.{}",
            config.database,
            config.collection
        );

        Ok(Self { client, collection })
    }
}

/// Filter selecting the document for `correlation_id`.
fn id_filter(correlation_id: &str) -> Document {
    match ObjectId::parse_str(correlation_id) {
        Ok(oid) => doc! { "_id": oid },
        Err(_) => doc! { "_id": correlation_id },
    }
}

/// `$set` update writing the extraction fields, leaving the rest of the document alone.
fn update_document(record: &StoredExtraction) -> Document {
    let embeddings: Vec<Bson> = record
        .embeddings
        .as_slice()
        .iter()
        .map(|v| Bson::Double(f64::from(*v)))
        .collect();
    let extracted_at = DateTime::from_millis(record.extracted_at.timestamp_millis());

    doc! {
        "$set": {
            "ocrText": record.text.as_str(),
            "embeddings": embeddings,
            "metadata.pageCount": record.metadata.page_count as i64,
            "metadata.wordCount": record.metadata.word_count as i64,
            "metadata.characterCount": record.metadata.character_count as i64,
            "metadata.averageConfidence": record.metadata.average_confidence,
            "metadata.extractedAt": extracted_at,
        }
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    async fn upsert(&self, record: &StoredExtraction) -> ScribeResult<()> {
        let options = UpdateOptions::builder().upsert(true).build();

        let result = self
            .collection
            .update_one(
                id_filter(&record.correlation_id),
                update_document(record),
                options,
            )
            .await
            .map_err(|e| ScribeError::persistence(format!("Failed to update document: {}", e)))?;

        tracing::debug!(
            id = %record.correlation_id,
            matched = result.matched_count,
            upserted = result.upserted_id.is_some(),
            "MongoDB upsert"
        );
        Ok(())
    }

    async fn ping(&self) -> ScribeResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| ScribeError::store_connection(format!("MongoDB ping failed: {}", e)))?;
        Ok(())
    }

    fn name(&self) -> &str {
        "mongodb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use scribe_core::{hash_embedding, ResponseMetadata, EMBEDDING_DIM};

    fn record(id: &str, average_confidence: Option<f64>) -> StoredExtraction {
        StoredExtraction {
            correlation_id: id.to_string(),
            text: "Lecture notes".to_string(),
            embeddings: hash_embedding("Lecture notes"),
            metadata: ResponseMetadata {
                page_count: 2,
                word_count: 2,
                character_count: 13,
                average_confidence,
            },
            extracted_at: chrono::Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_id_filter_object_id() {
        let filter = id_filter("65f1c0ffee0123456789abcd");
        assert!(matches!(filter.get("_id"), Some(Bson::ObjectId(_))));
    }

    #[test]
    fn test_id_filter_plain_string() {
        let filter = id_filter("upload-42");
        assert_eq!(filter.get_str("_id").unwrap(), "upload-42");
    }

    #[test]
    fn test_update_document_fields() {
        let update = update_document(&record("x", Some(81.5)));
        let set = update.get_document("$set").unwrap();

        assert_eq!(set.get_str("ocrText").unwrap(), "Lecture notes");
        assert_eq!(set.get_array("embeddings").unwrap().len(), EMBEDDING_DIM);
        assert_eq!(set.get_i64("metadata.pageCount").unwrap(), 2);
        assert_eq!(set.get_i64("metadata.characterCount").unwrap(), 13);
        assert_eq!(set.get_f64("metadata.averageConfidence").unwrap(), 81.5);
        assert_eq!(
            set.get_datetime("metadata.extractedAt")
                .unwrap()
                .timestamp_millis(),
            1_709_294_400_000
        );
        assert!(!set.contains_key("labels"));
    }

    #[test]
    fn test_update_document_without_ocr_pages() {
        let update = update_document(&record("x", None));
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get("metadata.averageConfidence"), Some(&Bson::Null));
    }
}
