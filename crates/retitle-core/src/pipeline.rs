//! Two-pass retitling pipeline
//!
//! Pass 1 normalizes every record and groups them into a [`Bucket`] keyed
//! by canonical title. Pass 2 deduplicates each bucket in first-seen order.

use indexmap::IndexMap;
use serde::Serialize;

use crate::dedup::{duplicated_titles, Deduplicator, Tier};
use crate::normalizer::TitleNormalizer;
use crate::{FinalRecord, RawRecord};

/// Canonical title → records that normalized to it, in first-seen order
pub type Bucket = IndexMap<String, Vec<RawRecord>>;

/// Number of buckets settled at each tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub unique: usize,
    pub handle_suffix: usize,
    pub first_segment: usize,
    pub handle: usize,
}

impl TierCounts {
    fn record(&mut self, tier: Tier) {
        match tier {
            Tier::Unique => self.unique += 1,
            Tier::HandleSuffix => self.handle_suffix += 1,
            Tier::FirstSegment => self.first_segment += 1,
            Tier::Handle => self.handle += 1,
        }
    }
}

/// Run summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub input_rows: usize,
    pub skipped_empty: usize,
    pub products: usize,
    pub canonical_titles: usize,
    pub collided_titles: usize,
    pub tiers: TierCounts,
    /// Final titles emitted more than once
    pub unresolved: Vec<String>,
}

/// Pipeline output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub records: Vec<FinalRecord>,
    pub stats: Stats,
}

impl Report {
    pub fn is_unique(&self) -> bool {
        self.stats.unresolved.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Retitler {
    normalizer: TitleNormalizer,
    deduplicator: Deduplicator,
}

impl Retitler {
    pub fn new(normalizer: TitleNormalizer, deduplicator: Deduplicator) -> Self {
        Self {
            normalizer,
            deduplicator,
        }
    }

    pub fn normalizer(&self) -> &TitleNormalizer {
        &self.normalizer
    }

    /// Pass 1: normalize and bucket, skipping records with empty titles
    ///
    /// Returns the bucket and the number of skipped records.
    pub fn group<I>(&self, records: I) -> (Bucket, usize)
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut bucket = Bucket::new();
        let mut skipped = 0;
        for record in records {
            if record.title.is_empty() {
                skipped += 1;
                continue;
            }
            let canonical = self.normalizer.normalize(&record.title);
            bucket.entry(canonical).or_default().push(record);
        }
        (bucket, skipped)
    }

    /// Pass 2: deduplicate every bucket entry
    pub fn resolve(&self, bucket: &Bucket) -> Report {
        let mut report = Report::default();
        report.stats.canonical_titles = bucket.len();

        for (title, records) in bucket {
            let resolution = self.deduplicator.deduplicate(title, records);
            report.stats.tiers.record(resolution.tier);
            if resolution.tier != Tier::Unique {
                report.stats.collided_titles += 1;
            }
            report.records.extend(resolution.records);
        }

        report.stats.products = report.records.len();
        report.stats.unresolved = duplicated_titles(&report.records);
        if !report.stats.unresolved.is_empty() {
            tracing::warn!(
                count = report.stats.unresolved.len(),
                "output contains duplicate titles"
            );
        }
        report
    }

    /// Run both passes
    pub fn run<I>(&self, records: I) -> Report
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut input_rows = 0;
        let (bucket, skipped) = self.group(records.into_iter().inspect(|_| input_rows += 1));
        tracing::debug!(
            rows = input_rows,
            skipped,
            titles = bucket.len(),
            "normalized titles"
        );

        let mut report = self.resolve(&bucket);
        report.stats.input_rows = input_rows;
        report.stats.skipped_empty = skipped;
        report
    }
}
