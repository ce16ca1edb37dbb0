//! Deduplicator — derives unique titles for records sharing a canonical title
//!
//! Collisions are resolved by a cascade of tiers, each more aggressive
//! than the last:
//!
//! 0. **Unique**: a single record keeps the canonical title.
//! 1. **HandleSuffix**: append the handle's trailing number (`-12` → ` 12`),
//!    or its capitalized last segment when that word is not already in
//!    the title.
//! 2. **FirstSegment**: records still colliding after tier 1 also get the
//!    capitalized first handle segment, unless it is already in the title.
//!
//! Tier 2 does not re-check its output. Under [`DedupPolicy::Faithful`]
//! leftover duplicates are reported in [`Resolution::unresolved`];
//! [`DedupPolicy::Strict`] appends the raw handle to them instead.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::{FinalRecord, RawRecord};

static TRAILING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-([0-9]+)$").expect("valid trailing number pattern"));

/// Deepest tier a bucket needed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Unique,
    HandleSuffix,
    FirstSegment,
    Handle,
}

/// What to do with titles still duplicated after the last tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupPolicy {
    /// Emit as-is and flag them
    #[default]
    Faithful,
    /// Append the raw handle
    Strict,
}

/// A colliding record with its tier-1 suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub record: &'a RawRecord,
    pub suffix: String,
}

/// Outcome of deduplicating one bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub records: Vec<FinalRecord>,
    pub tier: Tier,
    /// Titles emitted more than once from this bucket
    pub unresolved: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Deduplicator {
    policy: DedupPolicy,
}

impl Deduplicator {
    pub fn new(policy: DedupPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DedupPolicy {
        self.policy
    }

    /// Assign a final title to every record sharing `title`
    ///
    /// Emits exactly one [`FinalRecord`] per input record. Tier-1 groups
    /// are emitted in first-seen order; records keep their order within
    /// each group.
    pub fn deduplicate(&self, title: &str, records: &[RawRecord]) -> Resolution {
        if records.len() <= 1 {
            return Resolution {
                records: records
                    .iter()
                    .map(|r| FinalRecord::new(r.handle.clone(), title))
                    .collect(),
                tier: Tier::Unique,
                unresolved: Vec::new(),
            };
        }

        tracing::info!(title, records = records.len(), "deduplicating title");

        let mut tier = Tier::HandleSuffix;
        let mut out = Vec::with_capacity(records.len());
        let mut unresolved = Vec::new();

        for (full_title, group) in tier1_partition(title, records) {
            if let [only] = group.as_slice() {
                out.push(FinalRecord::new(only.record.handle.clone(), full_title));
                continue;
            }

            tier = tier.max(Tier::FirstSegment);
            let resolved = tier2_resolve(title, &full_title, &group);
            let leftovers = duplicated_titles(&resolved);
            if leftovers.is_empty() {
                out.extend(resolved);
                continue;
            }

            match self.policy {
                DedupPolicy::Faithful => {
                    for dup in &leftovers {
                        tracing::warn!(title = %dup, "title still duplicated after all tiers");
                    }
                    unresolved.extend(leftovers);
                    out.extend(resolved);
                }
                DedupPolicy::Strict => {
                    tier = Tier::Handle;
                    out.extend(resolved.into_iter().map(|mut r| {
                        if leftovers.contains(&r.title) {
                            r.title = format!("{} {}", r.title, r.handle);
                        }
                        r
                    }));
                }
            }
        }

        Resolution {
            records: out,
            tier,
            unresolved,
        }
    }
}

// ── Tier 1 ─────────────────────────────────────────────────

/// Suffix derived from the end of `handle`, or empty
///
/// - `leggings-black-2` → ` 2`
/// - `yoga-pants-alex` → ` Alex` (unless "alex" is already in `title`)
pub fn tier1_suffix(title: &str, handle: &str) -> String {
    if let Some(caps) = TRAILING_NUMBER.captures(handle) {
        return format!(" {}", &caps[1]);
    }

    let parts: Vec<&str> = handle.split('-').collect();
    let last = parts.last().copied().unwrap_or_default();
    if !is_numeric(last) && !contains_folded(title, last) {
        format!(" {}", capitalize(last))
    } else if parts.len() > 1 && is_numeric(last) {
        format!(" {}", last)
    } else {
        String::new()
    }
}

/// Group records by `title + tier1_suffix`, in first-seen order
pub fn tier1_partition<'a>(
    title: &str,
    records: &'a [RawRecord],
) -> IndexMap<String, Vec<Candidate<'a>>> {
    let mut groups: IndexMap<String, Vec<Candidate<'a>>> = IndexMap::new();
    for record in records {
        let suffix = tier1_suffix(title, &record.handle);
        groups
            .entry(format!("{}{}", title, suffix))
            .or_default()
            .push(Candidate { record, suffix });
    }
    groups
}

// ── Tier 2 ─────────────────────────────────────────────────

/// Final suffix for a record whose tier-1 title `full_title` collided
pub fn tier2_suffix(full_title: &str, handle: &str, tier1: &str) -> String {
    let first = capitalize(handle.split('-').next().unwrap_or_default());
    if !first.is_empty() && !contains_folded(full_title, &first) {
        format!("{} {}", tier1, first)
    } else {
        tier1.to_string()
    }
}

/// Apply the first-segment tiebreak to one colliding tier-1 group
///
/// No uniqueness re-check is done here.
pub fn tier2_resolve(title: &str, full_title: &str, group: &[Candidate<'_>]) -> Vec<FinalRecord> {
    group
        .iter()
        .map(|c| {
            let suffix = tier2_suffix(full_title, &c.record.handle, &c.suffix);
            FinalRecord::new(c.record.handle.clone(), format!("{}{}", title, suffix))
        })
        .collect()
}

// ── Helpers ────────────────────────────────────────────────

/// Titles occurring more than once, in first-seen order
pub(crate) fn duplicated_titles(records: &[FinalRecord]) -> Vec<String> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for r in records {
        *counts.entry(r.title.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(t, _)| t.to_string())
        .collect()
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Uppercase the first character, lowercase the rest
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
