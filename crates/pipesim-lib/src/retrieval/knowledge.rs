use std::cell::OnceCell;

use serde::Serialize;

use crate::embedding::embedder::Embedder;
use crate::vector::{Vector, mean};

/// A retrievable document in the knowledge base.
#[derive(Debug, Serialize)]
pub struct KnowledgeEntry {
    pub id: u32,
    pub text: String,
    pub tags: Vec<String>,
    #[serde(skip)]
    vector: OnceCell<Vector>,
}

impl KnowledgeEntry {
    pub fn new<S: Into<String>>(
        id: u32,
        text: impl Into<String>,
        tags: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            tags: tags.into_iter().map(Into::into).collect(),
            vector: OnceCell::new(),
        }
    }

    /// Mean embedding of the entry's tags, computed on first use and cached
    /// for the lifetime of the entry. An entry without tags gets the zero
    /// vector.
    pub fn vector(&self, embedder: &mut Embedder) -> &Vector {
        self.vector.get_or_init(|| {
            let tag_vectors: Vec<Vector> = self.tags.iter().map(|t| embedder.embed(t)).collect();
            mean(&tag_vectors)
        })
    }

    /// Whether [`Self::vector`] has already been computed.
    pub fn is_vector_cached(&self) -> bool {
        self.vector.get().is_some()
    }
}

/// The read-only set of entries searched by the ranker.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    #[must_use]
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        Self { entries }
    }

    /// Four entries of a pretend device manual.
    #[must_use]
    pub fn reference() -> Self {
        Self::new(vec![
            KnowledgeEntry::new(
                1,
                "To turn on, press button for 3s.",
                ["turn", "on", "button", "power"],
            ),
            KnowledgeEntry::new(
                2,
                "Battery lasts 24 hours on eco mode.",
                ["battery", "life", "hours", "eco"],
            ),
            KnowledgeEntry::new(3, "Lunch is served at 12:00 PM.", ["lunch", "food", "time"]),
            KnowledgeEntry::new(
                4,
                "Warning: Do not submerge in water.",
                ["water", "warning", "danger"],
            ),
        ])
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn get(&self, id: u32) -> Option<&KnowledgeEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
