//! Qdrant vector store implementation.
//!
//! Chunks live in a single collection with cosine distance. Payloads are the
//! JSON form of `ChunkPayload`; the nested `metadata.url` field is indexed by
//! the source-existence filter used for ingestion idempotency.

use super::{StorageError, StorageResult, VectorStore};
use crate::models::{ChunkPayload, ChunkPoint, ScoredChunk};
use async_trait::async_trait;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{
    point_id::PointIdOptions, Condition, CreateCollectionBuilder, Distance, Filter, ListValue,
    PointStruct, ScrollPointsBuilder, SearchPointsBuilder, Struct, UpsertPointsBuilder, Value,
    VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use std::collections::HashMap;
use tracing::{debug, info};

/// Default collection name.
pub const DEFAULT_COLLECTION: &str = "arxiv_papers";

/// Qdrant-backed chunk store.
pub struct QdrantStore {
    client: Qdrant,
    collection: String,
    dimension: u64,
}

impl QdrantStore {
    /// Connect to a Qdrant instance.
    ///
    /// # Arguments
    /// * `url` - Qdrant gRPC endpoint (e.g. `http://localhost:6334`)
    /// * `collection` - Collection name
    /// * `dimension` - Vector dimension for collection creation
    ///
    /// # Errors
    /// Returns `StorageError::ConnectionError` if client construction fails
    pub fn new(url: &str, collection: &str, dimension: usize) -> StorageResult<Self> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| StorageError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            collection: collection.to_string(),
            dimension: dimension as u64,
        })
    }
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn ensure_collection(&self) -> StorageResult<()> {
        let exists = self
            .client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| StorageError::CollectionError(e.to_string()))?;

        if exists {
            debug!(collection = %self.collection, "Collection already exists");
            return Ok(());
        }

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(self.dimension, Distance::Cosine)),
            )
            .await
            .map_err(|e| StorageError::CollectionError(e.to_string()))?;

        info!(collection = %self.collection, dimension = self.dimension, "Created collection");
        Ok(())
    }

    async fn source_exists(&self, url: &str) -> StorageResult<bool> {
        let response = self
            .client
            .scroll(
                ScrollPointsBuilder::new(&self.collection)
                    .filter(Filter::must([Condition::matches(
                        "metadata.url",
                        url.to_string(),
                    )]))
                    .limit(1),
            )
            .await
            .map_err(|e| StorageError::SearchError(e.to_string()))?;

        Ok(!response.result.is_empty())
    }

    async fn upsert_chunks(&self, points: Vec<ChunkPoint>) -> StorageResult<()> {
        let count = points.len();
        let qdrant_points = points
            .into_iter()
            .map(|point| {
                let payload = payload_to_qdrant(&point.payload)?;
                Ok(PointStruct::new(point.id, point.vector, payload))
            })
            .collect::<StorageResult<Vec<_>>>()?;

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, qdrant_points).wait(true))
            .await
            .map_err(|e| StorageError::UpsertError(e.to_string()))?;

        debug!(collection = %self.collection, count, "Upserted chunk points");
        Ok(())
    }

    async fn search(&self, vector: Vec<f32>, limit: usize) -> StorageResult<Vec<ScoredChunk>> {
        let response = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, vector, limit as u64)
                    .with_payload(true),
            )
            .await
            .map_err(|e| StorageError::SearchError(e.to_string()))?;

        response
            .result
            .into_iter()
            .map(|point| {
                let id = match point.id.and_then(|id| id.point_id_options) {
                    Some(PointIdOptions::Uuid(uuid)) => uuid,
                    Some(PointIdOptions::Num(num)) => num.to_string(),
                    None => String::new(),
                };
                let payload = payload_from_qdrant(point.payload)?;
                Ok(ScoredChunk {
                    id,
                    score: point.score,
                    payload,
                })
            })
            .collect()
    }
}

/// Serialize a chunk payload into Qdrant's payload representation.
fn payload_to_qdrant(payload: &ChunkPayload) -> StorageResult<Payload> {
    let json = serde_json::to_value(payload).map_err(|e| StorageError::PayloadError(e.to_string()))?;
    let serde_json::Value::Object(map) = json else {
        return Err(StorageError::PayloadError(
            "Chunk payload did not serialize to an object".to_string(),
        ));
    };

    let mut out = Payload::new();
    for (key, value) in map {
        out.insert(key, json_to_value(value));
    }
    Ok(out)
}

/// Deserialize a chunk payload out of Qdrant's payload representation.
fn payload_from_qdrant(payload: HashMap<String, Value>) -> StorageResult<ChunkPayload> {
    let map: serde_json::Map<String, serde_json::Value> = payload
        .into_iter()
        .map(|(key, value)| (key, value_to_json(value)))
        .collect();

    serde_json::from_value(serde_json::Value::Object(map))
        .map_err(|e| StorageError::PayloadError(e.to_string()))
}

fn json_to_value(value: serde_json::Value) -> Value {
    let kind = match value {
        serde_json::Value::Null => Kind::NullValue(0),
        serde_json::Value::Bool(b) => Kind::BoolValue(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Kind::IntegerValue(i)
            } else {
                Kind::DoubleValue(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_json::Value::String(s) => Kind::StringValue(s),
        serde_json::Value::Array(items) => Kind::ListValue(ListValue {
            values: items.into_iter().map(json_to_value).collect(),
        }),
        serde_json::Value::Object(map) => Kind::StructValue(Struct {
            fields: map
                .into_iter()
                .map(|(key, value)| (key, json_to_value(value)))
                .collect(),
        }),
    };
    Value { kind: Some(kind) }
}

fn value_to_json(value: Value) -> serde_json::Value {
    match value.kind {
        None | Some(Kind::NullValue(_)) => serde_json::Value::Null,
        Some(Kind::BoolValue(b)) => serde_json::Value::Bool(b),
        Some(Kind::IntegerValue(i)) => serde_json::Value::Number(i.into()),
        Some(Kind::DoubleValue(d)) => serde_json::Number::from_f64(d)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Some(Kind::StringValue(s)) => serde_json::Value::String(s),
        Some(Kind::ListValue(list)) => {
            serde_json::Value::Array(list.values.into_iter().map(value_to_json).collect())
        }
        Some(Kind::StructValue(fields)) => serde_json::Value::Object(
            fields
                .fields
                .into_iter()
                .map(|(key, value)| (key, value_to_json(value)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthorField, PaperMetadata};

    fn sample_payload() -> ChunkPayload {
        ChunkPayload {
            metadata: PaperMetadata {
                title: "Gravitational Field of a Mass Point".to_string(),
                summary: "An exact solution.".to_string(),
                published: "1916-01-13T00:00:00Z".to_string(),
                updated: "1916-01-13T00:00:00Z".to_string(),
                url: "http://arxiv.org/abs/physics/9905030".to_string(),
                author: AuthorField::Multiple(vec![serde_json::json!({"name": "K. Schwarzschild"})]),
            },
            chunk_index: 2,
            total_chunks: 7,
            document: "The line element takes the form...".to_string(),
        }
    }

    fn to_value_map(payload: &ChunkPayload) -> HashMap<String, Value> {
        let serde_json::Value::Object(map) = serde_json::to_value(payload).unwrap() else {
            panic!("payload must serialize to an object");
        };
        map.into_iter()
            .map(|(key, value)| (key, json_to_value(value)))
            .collect()
    }

    #[test]
    fn test_payload_round_trip() {
        let payload = sample_payload();
        let back = payload_from_qdrant(to_value_map(&payload)).unwrap();
        assert_eq!(back.chunk_index, 2);
        assert_eq!(back.total_chunks, 7);
        assert_eq!(back.metadata.url, payload.metadata.url);
        assert_eq!(back.document, payload.document);
        assert_eq!(back.metadata.author, payload.metadata.author);
    }

    #[test]
    fn test_nested_metadata_keeps_struct_shape() {
        let map = to_value_map(&sample_payload());
        let metadata = map.get("metadata").unwrap();
        assert!(matches!(metadata.kind, Some(Kind::StructValue(_))));
    }
}
