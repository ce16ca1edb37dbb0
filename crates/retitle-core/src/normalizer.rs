//! Title normalizer — rewrites a raw catalog title into canonical form
//!
//! Canonical form is `{ProductType} {Modifier}`: the first recognized
//! vocabulary token is moved to the end of the title. Titles that end in
//! a ` - Name` suffix are treated as compound descriptions instead: every
//! vocabulary token is stripped from the base and the name is kept last.
//!
//! # Examples
//!
//! | Raw                                 | Canonical              |
//! |-------------------------------------|------------------------|
//! | `Khaki Gym Shorts`                  | `Gym Shorts Khaki`     |
//! | `White-Green Leggings`              | `Leggings White-Green` |
//! | `Women's Yoga Pants Khaki - Alex`   | `Yoga Pants Alex`      |
//! | `Women's Tote Bag`                  | `Tote Bag`             |
//!
//! # Case rules
//!
//! The standard branch matches tokens case-insensitively and keeps the
//! casing found in the input. The name-suffix branch strips tokens only
//! in their canonical casing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::vocabulary::Vocabulary;

static BRAND_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Women's\s+").expect("valid prefix pattern"));

static NAME_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+-\s+([A-Za-z0-9]+)$").expect("valid suffix pattern"));

static DEFAULT_NORMALIZER: Lazy<TitleNormalizer> = Lazy::new(TitleNormalizer::default);

// ── Public API ─────────────────────────────────────────────

/// Normalize a raw title with the built-in vocabulary
pub fn normalize(raw: &str) -> String {
    DEFAULT_NORMALIZER.normalize(raw)
}

/// Maps raw titles to canonical titles over a fixed vocabulary
#[derive(Debug, Clone, Default)]
pub struct TitleNormalizer {
    vocabulary: Vocabulary,
}

impl TitleNormalizer {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Normalize one raw title
    ///
    /// Steps:
    /// 1. Trim surrounding whitespace
    /// 2. Strip the `Women's ` brand prefix
    /// 3. Name-suffix branch when the title ends in ` - <alnum>`,
    ///    standard branch otherwise
    pub fn normalize(&self, raw: &str) -> String {
        let stripped = BRAND_PREFIX.replace(raw.trim(), "");
        let clean: &str = &stripped;

        if let Some(caps) = NAME_SUFFIX.captures(clean) {
            let base_end = caps.get(0).map_or(clean.len(), |m| m.start());
            let name = caps.get(1).map_or("", |m| m.as_str());
            return self.normalize_named(&clean[..base_end], name);
        }

        self.normalize_standard(clean)
            .unwrap_or_else(|| clean.to_string())
    }

    /// Strip every canonical-case token from `base` and append `name`
    fn normalize_named(&self, base: &str, name: &str) -> String {
        let mut product_type = base.to_string();
        for token in self.vocabulary.iter() {
            product_type = token
                .exact()
                .replace_all(&product_type, "")
                .trim()
                .to_string();
        }
        format!("{} {}", collapse_whitespace(&product_type), name)
    }

    /// Move the first matching token (longest-first) to the end
    ///
    /// Every occurrence of that token is removed, in any casing; the
    /// first occurrence supplies the moved literal. Returns `None` when no
    /// token occurs in the title.
    fn normalize_standard(&self, title: &str) -> Option<String> {
        self.vocabulary.iter().find_map(|token| {
            let found = token.folded().find(title)?;
            let rest = token.folded().replace_all(title, "");
            Some(format!("{} {}", collapse_whitespace(&rest), found.as_str()))
        })
    }
}

// ── Helpers ────────────────────────────────────────────────

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<&str>>().join(" ")
}

// ── Tests ──────────────────────────────────────────────────
