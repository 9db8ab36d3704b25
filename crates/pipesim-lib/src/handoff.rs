//! Hand-off of selections between the retrieval and pipeline demos.
//!
//! The search and spatial steps record what they picked; the answer and
//! explanation steps read it back later, possibly from another process.

use std::collections::HashMap;

use serde::Serialize;
use tracing::info;

use crate::config::{PIPELINE_CATEGORY_KEY, PIPELINE_MATCH_KEY, RAG_BEST_KEY};
use crate::retrieval::knowledge::KnowledgeEntry;
use crate::spatial::ConceptPoint;

/// Minimal persistent string map.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Process-local store, also used to read from a store that does not exist
/// yet.
impl KeyValueStore for HashMap<String, String> {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(HashMap::get(self, key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// How useful a retrieved context is to the question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Relevance {
    High,
    Low,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContextSnippet {
    pub text: String,
    pub relevance: Relevance,
}

/// Question, retrieved contexts and the answer assembled from them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PipelineExplanation {
    pub question: String,
    pub contexts: Vec<ContextSnippet>,
    pub answer: String,
}

/// Remember the text of the entry a search picked.
pub fn save_retrieval(
    store: &mut impl KeyValueStore,
    entry: &KnowledgeEntry,
) -> anyhow::Result<()> {
    store.set(RAG_BEST_KEY, &entry.text)?;
    info!(entry = entry.id, "saved retrieval hand-off");
    Ok(())
}

/// Remember the concept the spatial query snapped to.
pub fn save_pipeline_selection(
    store: &mut impl KeyValueStore,
    point: &ConceptPoint,
) -> anyhow::Result<()> {
    store.set(PIPELINE_MATCH_KEY, &point.name)?;
    store.set(PIPELINE_CATEGORY_KEY, &point.category)?;
    info!(name = %point.name, category = %point.category, "saved pipeline hand-off");
    Ok(())
}

/// `"Based on the manual, {text}"` for the saved retrieval, if any.
pub fn grounded_answer(store: &impl KeyValueStore) -> anyhow::Result<Option<String>> {
    Ok(store
        .get(RAG_BEST_KEY)?
        .map(|text| format!("Based on the manual, {text}")))
}

/// Build the explanation for the saved pipeline selection. Missing values
/// read as `Nothing` / `Unknown`.
pub fn pipeline_explanation(store: &impl KeyValueStore) -> anyhow::Result<PipelineExplanation> {
    let matched = store
        .get(PIPELINE_MATCH_KEY)?
        .unwrap_or_else(|| "Nothing".to_string());
    let category = store
        .get(PIPELINE_CATEGORY_KEY)?
        .unwrap_or_else(|| "Unknown".to_string());

    let contexts = vec![
        ContextSnippet {
            text: format!("{matched} belongs to category {category}."),
            relevance: Relevance::High,
        },
        ContextSnippet {
            text: "The weather in Mars is dusty today.".to_string(),
            relevance: Relevance::Low,
        },
        ContextSnippet {
            text: "System error: 404 not found.".to_string(),
            relevance: Relevance::Low,
        },
    ];

    Ok(PipelineExplanation {
        question: format!("What is a {matched}?"),
        answer: format!("Based on the context provided, a {matched} is categorized as {category}."),
        contexts,
    })
}
