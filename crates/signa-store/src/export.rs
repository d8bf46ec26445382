//! Import/export document format
//!
//! The interchange document is `{ schema: 1, exportedAt, samples: [...] }`.
//! Import also accepts a bare array of sample records. Imported ids are
//! always re-generated by the store; a malformed payload fails the whole
//! import before anything is written.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use signa_core::{
    FeatureVector, FrameTime, Label, Landmark, Sample, SampleId, SampleMeta, SignaError,
    SignaResult,
};

use crate::{SampleBackend, SampleStore};

/// Current interchange schema version
pub const EXPORT_SCHEMA: u32 = 1;

/// A raw landmark point as serialized; depth is optional
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

/// Capture metadata as serialized
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaRecord {
    /// Capture wall-clock time, unix milliseconds
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<PointRecord>>,
}

/// One sample as serialized. Export writes the store id; import ignores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub label: String,
    pub vector: Vec<f32>,
    #[serde(default)]
    pub meta: Option<MetaRecord>,
}

/// The export document shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub schema: u32,
    #[serde(rename = "exportedAt")]
    pub exported_at: i64,
    pub samples: Vec<SampleRecord>,
}

impl SampleRecord {
    pub fn from_sample(sample: &Sample) -> Self {
        SampleRecord {
            id: Some(sample.id.as_u64()),
            label: sample.label.as_str().to_string(),
            vector: sample.vector.as_slice().to_vec(),
            meta: sample.meta.as_ref().map(|m| MetaRecord {
                timestamp: m.captured_at.as_millis(),
                landmarks: m.landmarks.as_ref().map(|lms| {
                    lms.iter()
                        .map(|p| PointRecord {
                            x: p.x,
                            y: p.y,
                            z: p.z,
                        })
                        .collect()
                }),
            }),
        }
    }

    /// Rebuild a stored sample, id included. Used by file backends reading
    /// their own tables, where a missing id means corruption.
    pub(crate) fn into_sample(self) -> SignaResult<Sample> {
        let id = self
            .id
            .ok_or_else(|| SignaError::Storage("sample record missing id".to_string()))?;
        let (label, vector, meta) = self
            .into_parts()
            .map_err(SignaError::Storage)?;
        Ok(Sample {
            id: SampleId::new(id),
            label,
            vector,
            meta,
        })
    }

    /// Split an imported record into store-insertable parts, dropping the id
    fn into_parts(self) -> Result<(Label, FeatureVector, Option<SampleMeta>), String> {
        let label = Label::new(self.label).map_err(|_| "empty label".to_string())?;
        let vector = FeatureVector::new(self.vector);
        let meta = self.meta.map(|m| SampleMeta {
            captured_at: FrameTime::from_millis(m.timestamp),
            landmarks: m.landmarks.map(|lms| {
                lms.into_iter()
                    .map(|p| Landmark::new(p.x, p.y, p.z))
                    .collect()
            }),
        });
        Ok((label, vector, meta))
    }
}

impl ExportDocument {
    pub fn to_json_pretty(&self) -> SignaResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SignaError::Storage(e.to_string()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImportPayload {
    Document(ExportDocument),
    Bare(Vec<SampleRecord>),
}

/// Current wall-clock time in unix milliseconds
pub fn unix_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Dump the durable store verbatim (after a full scan), ids included
pub async fn export_document<B: SampleBackend>(
    store: &SampleStore<B>,
) -> SignaResult<ExportDocument> {
    let samples = store.get_all().await?;
    Ok(ExportDocument {
        schema: EXPORT_SCHEMA,
        exported_at: unix_millis(),
        samples: samples.iter().map(SampleRecord::from_sample).collect(),
    })
}

/// Parse and validate an import payload without touching any store.
///
/// Accepts the document shape (schema must match) or a bare array of sample
/// records. The entire payload is validated before anything is returned, so
/// a malformed record anywhere fails the whole import.
pub fn parse_import(json: &str) -> SignaResult<Vec<(Label, FeatureVector, Option<SampleMeta>)>> {
    let payload: ImportPayload =
        serde_json::from_str(json).map_err(|e| SignaError::MalformedImport(e.to_string()))?;

    let records = match payload {
        ImportPayload::Document(doc) => {
            if doc.schema != EXPORT_SCHEMA {
                return Err(SignaError::MalformedImport(format!(
                    "unsupported schema {}",
                    doc.schema
                )));
            }
            doc.samples
        }
        ImportPayload::Bare(records) => records,
    };

    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            record
                .into_parts()
                .map_err(|e| SignaError::MalformedImport(format!("sample {}: {}", i, e)))
        })
        .collect()
}

/// Replace the store's contents with an import payload.
///
/// All-or-nothing: parsing failures leave the prior store untouched. Ids
/// are re-assigned by the store. Returns the number of imported samples.
pub async fn import_samples<B: SampleBackend>(
    store: &SampleStore<B>,
    json: &str,
) -> SignaResult<usize> {
    let parsed = parse_import(json)?;
    let count = parsed.len();

    store.replace_all(parsed).await?;
    store.reload().await?;

    tracing::debug!("imported {} samples", count);
    Ok(count)
}
