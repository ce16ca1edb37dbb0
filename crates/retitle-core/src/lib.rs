//! retitle core - canonical catalog titles without collisions
//!
//! Takes product records (a stable `handle` plus a free-text `title`) and
//! produces a cleaned, canonicalized, unique title for each one.
//!
//! # Architecture
//!
//! ```text
//! RawRecord → Normalizer → Bucket (canonical title → records)
//!                              ↓
//!                         Deduplicator → FinalRecord
//! ```
//!
//! # Guarantees
//!
//! - **Deterministic**: same input always produces identical output
//! - **Total**: one output record per input record with a non-empty title
//! - **Order-stable**: buckets are emitted in first-seen order

pub mod csv_io;
pub mod dedup;
pub mod error;
pub mod normalizer;
pub mod pipeline;
pub mod vocabulary;

pub use dedup::{DedupPolicy, Deduplicator, Resolution, Tier};
pub use error::{Error, Result};
pub use normalizer::{normalize, TitleNormalizer};
pub use pipeline::{Bucket, Report, Retitler, Stats};
pub use vocabulary::Vocabulary;

/// Version of the retitle-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One input row: product handle and its raw display title
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Handle")]
    pub handle: String,
    #[serde(rename = "Title")]
    pub title: String,
}

impl RawRecord {
    pub fn new(handle: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            title: title.into(),
        }
    }
}

/// One output row: product handle and its final unique title
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FinalRecord {
    #[serde(rename = "Handle")]
    pub handle: String,
    #[serde(rename = "Title")]
    pub title: String,
}

impl FinalRecord {
    pub fn new(handle: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            title: title.into(),
        }
    }
}
