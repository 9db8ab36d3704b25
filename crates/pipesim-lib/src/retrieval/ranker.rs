use serde::Serialize;
use tracing::debug;

use crate::embedding::embedder::Embedder;
use crate::vector::cosine_similarity;

use super::knowledge::{KnowledgeBase, KnowledgeEntry};

/// Best entry of a vector search and its cosine score.
#[derive(Debug, Serialize)]
pub struct SearchResult<'a> {
    /// The word the query was reduced to before embedding.
    pub subject: String,
    pub best: Option<&'a KnowledgeEntry>,
    /// Cosine similarity of `best`, or `-1.0` when nothing was ranked.
    pub score: f32,
}

impl SearchResult<'_> {
    /// Whether the result should be presented as a match.
    ///
    /// A `best` entry is returned even for weak scores; the threshold is a
    /// presentation policy, not part of the ranking.
    #[must_use]
    pub fn is_match(&self, threshold: f32) -> bool {
        self.best.is_some() && self.score > threshold
    }
}

/// Best entry of a keyword search and its tag-hit count.
#[derive(Debug, Serialize)]
pub struct KeywordMatch<'a> {
    pub best: Option<&'a KnowledgeEntry>,
    pub score: usize,
}

/// Reduce a query to one representative word: the longest
/// whitespace-delimited word, ties going to the later word.
#[must_use]
pub fn query_subject(query: &str) -> &str {
    let words: Vec<&str> = query.split_whitespace().collect();
    let Some(&last) = words.last() else {
        return "";
    };
    words.iter().fold(last, |best, &word| {
        if best.chars().count() > word.chars().count() {
            best
        } else {
            word
        }
    })
}

/// Rank every entry by cosine similarity against the query subject's
/// embedding and return the strict maximum (first entry wins ties).
pub fn search<'a>(query: &str, kb: &'a KnowledgeBase, embedder: &mut Embedder) -> SearchResult<'a> {
    let subject = query_subject(query);
    let query_vector = embedder.embed(subject);

    let mut best = None;
    let mut score = -1.0_f32;
    for entry in kb.entries() {
        let similarity = cosine_similarity(&query_vector, entry.vector(embedder));
        debug!(entry = entry.id, similarity, "scored knowledge entry");
        if similarity > score {
            score = similarity;
            best = Some(entry);
        }
    }

    SearchResult {
        subject: subject.to_string(),
        best,
        score,
    }
}

/// Count, per entry, how many tags occur in the lowercased query and return
/// the first entry with the highest non-zero count.
#[must_use]
pub fn keyword_search<'a>(query: &str, kb: &'a KnowledgeBase) -> KeywordMatch<'a> {
    let query = query.to_lowercase();

    let mut best = None;
    let mut score = 0;
    for entry in kb.entries() {
        let hits = entry
            .tags
            .iter()
            .filter(|tag| query.contains(tag.as_str()))
            .count();
        if hits > score {
            score = hits;
            best = Some(entry);
        }
    }

    KeywordMatch { best, score }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MATCH_THRESHOLD;

    #[test]
    fn subject_is_longest_word() {
        assert_eq!(query_subject("How long is battery life?"), "battery");
    }

    #[test]
    fn subject_ties_go_to_last_word() {
        assert_eq!(query_subject("cat dog"), "dog");
        assert_eq!(query_subject("apple pear fig plum"), "apple");
        assert_eq!(query_subject("   "), "");
    }

    #[test]
    fn battery_question_finds_battery_entry() {
        let kb = KnowledgeBase::reference();
        let mut embedder = Embedder::seeded(11);
        let result = search("How long is battery life?", &kb, &mut embedder);
        assert_eq!(result.best.unwrap().id, 2);
        assert!(result.score > 0.6, "score {}", result.score);
        assert!(result.is_match(MATCH_THRESHOLD));
    }

    #[test]
    fn search_caches_entry_vectors() {
        let kb = KnowledgeBase::reference();
        let mut embedder = Embedder::deterministic();
        assert!(kb.entries().iter().all(|e| !e.is_vector_cached()));
        search("lunch", &kb, &mut embedder);
        assert!(kb.entries().iter().all(KnowledgeEntry::is_vector_cached));
    }

    #[test]
    fn exact_vocabulary_tag_wins() {
        let kb = KnowledgeBase::reference();
        let mut embedder = Embedder::deterministic();
        let result = search("lunch", &kb, &mut embedder);
        assert_eq!(result.best.unwrap().id, 3);
    }

    #[test]
    fn empty_base_returns_sentinel() {
        let kb = KnowledgeBase::default();
        let mut embedder = Embedder::deterministic();
        let result = search("anything", &kb, &mut embedder);
        assert!(result.best.is_none());
        assert_eq!(result.score, -1.0);
        assert!(!result.is_match(MATCH_THRESHOLD));
    }

    #[test]
    fn weak_score_is_not_a_match() {
        let kb = KnowledgeBase::reference();
        let result = SearchResult {
            subject: "x".to_string(),
            best: kb.entries().first(),
            score: 0.4,
        };
        assert!(!result.is_match(MATCH_THRESHOLD));
    }

    #[test]
    fn keyword_search_counts_tags() {
        let kb = KnowledgeBase::reference();
        let m = keyword_search("Is it Warning me about WATER danger?", &kb);
        assert_eq!(m.best.unwrap().id, 4);
        assert_eq!(m.score, 3);
    }

    #[test]
    fn keyword_search_first_entry_wins_ties() {
        let kb = KnowledgeBase::reference();
        // "eco" hits entry 2, "lunch" hits entry 3
        let m = keyword_search("lunch eco", &kb);
        assert_eq!(m.best.unwrap().id, 2);
        assert_eq!(m.score, 1);
    }

    #[test]
    fn keyword_search_without_hits_has_no_best() {
        let kb = KnowledgeBase::reference();
        let m = keyword_search("xyz", &kb);
        assert!(m.best.is_none());
        assert_eq!(m.score, 0);
    }
}
