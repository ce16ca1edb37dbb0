//! Modifier vocabulary — the closed set of tokens the normalizer relocates
//!
//! Tokens are kept sorted longest-first so that compound tokens such as
//! `White-Green` or `Leopard Print` are always tried before any shorter
//! token they contain. Equal-length tokens keep their declaration order.
//!
//! The built-in table covers apparel colors and patterns. A replacement
//! table can be loaded from JSON:
//!
//! ```json
//! { "tokens": ["Khaki", "White-Green", "Leopard Print"] }
//! ```

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Built-in color and pattern tokens, in declaration order
pub const DEFAULT_TOKENS: &[&str] = &[
    "Khaki",
    "White-Green",
    "Blue",
    "Pink",
    "Yellow",
    "White",
    "Purple",
    "Black",
    "Brown",
    "Panna",
    "Green",
    "Grey",
    "Burgundy",
    "Leopard Print",
    "White-Yellow",
    "White-Pink",
    "White-Black",
    "Lavender",
    "Orange",
    "Red",
    "Beige",
];

/// One vocabulary entry with its whole-word matchers
#[derive(Debug, Clone)]
pub struct ModifierToken {
    text: String,
    exact: Regex,
    folded: Regex,
}

impl ModifierToken {
    fn new(text: &str) -> Result<Self> {
        let pattern = format!(r"\b{}\b", regex::escape(text));
        let exact = Regex::new(&pattern)
            .map_err(|e| Error::Vocabulary(format!("token '{}': {}", text, e)))?;
        let folded = Regex::new(&format!("(?i){}", pattern))
            .map_err(|e| Error::Vocabulary(format!("token '{}': {}", text, e)))?;
        Ok(Self {
            text: text.to_string(),
            exact,
            folded,
        })
    }

    /// Token text in its canonical casing
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whole-word matcher in canonical casing only
    pub fn exact(&self) -> &Regex {
        &self.exact
    }

    /// Whole-word matcher ignoring case
    pub fn folded(&self) -> &Regex {
        &self.folded
    }
}

/// On-disk vocabulary document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyFile {
    pub tokens: Vec<String>,
}

/// Ordered, immutable set of modifier tokens
#[derive(Debug, Clone)]
pub struct Vocabulary {
    tokens: Vec<ModifierToken>,
}

impl Vocabulary {
    /// Build a vocabulary from raw token strings
    ///
    /// # Errors
    /// Returns `Vocabulary` for blank tokens or case-insensitive duplicates.
    pub fn new<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut compiled = Vec::new();
        for raw in tokens {
            let text = raw.as_ref().trim();
            if text.is_empty() {
                return Err(Error::Vocabulary("empty token".to_string()));
            }
            if !seen.insert(text.to_lowercase()) {
                return Err(Error::Vocabulary(format!("duplicate token '{}'", text)));
            }
            compiled.push(ModifierToken::new(text)?);
        }
        if compiled.is_empty() {
            return Err(Error::Vocabulary("no tokens defined".to_string()));
        }

        // Stable: equal lengths keep declaration order
        compiled.sort_by(|a, b| b.text.chars().count().cmp(&a.text.chars().count()));

        Ok(Self { tokens: compiled })
    }

    /// Parse a `{"tokens": [...]}` document
    pub fn from_json(json: &str) -> Result<Self> {
        let file: VocabularyFile = serde_json::from_str(json).map_err(|e| Error::Config {
            path: "<inline>".into(),
            message: e.to_string(),
        })?;
        Self::new(file.tokens)
    }

    /// Load a vocabulary document from disk
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let file: VocabularyFile = serde_json::from_str(&text).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), tokens = file.tokens.len(), "loaded vocabulary");
        Self::new(file.tokens)
    }

    /// Tokens in match order (longest first)
    pub fn iter(&self) -> impl Iterator<Item = &ModifierToken> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_TOKENS.iter().copied()).expect("built-in vocabulary compiles")
    }
}
