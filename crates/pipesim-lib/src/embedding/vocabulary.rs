use crate::vector::Vector;

/// Vector returned for words that normalize to nothing.
pub const DEFAULT_VECTOR: Vector = [0.5; 6];

/// Ordered word -> vector table driving the simulated embeddings.
///
/// Order matters: the fuzzy fallback returns the first key (in table order)
/// that contains, or is contained by, the query word.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    entries: Vec<(String, Vector)>,
}

impl Vocabulary {
    /// Build a vocabulary from `(word, vector)` pairs, keeping their order.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Vector)>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(w, v)| (w.into(), v)).collect(),
        }
    }

    /// The built-in teaching vocabulary: tech, organic, space and general
    /// clusters over the axes `[Tech, Organic, Space, Abstract, Action, Positive]`.
    #[must_use]
    pub fn reference() -> Self {
        Self::new([
            // tech
            ("computer", [0.9, 0.1, 0.2, 0.8, 0.5, 0.5]),
            ("server", [0.95, 0.1, 0.1, 0.7, 0.6, 0.5]),
            ("code", [0.8, 0.1, 0.3, 0.9, 0.7, 0.5]),
            ("linux", [0.9, 0.1, 0.1, 0.8, 0.5, 0.6]),
            ("ai", [0.9, 0.1, 0.4, 0.9, 0.8, 0.6]),
            // organic
            ("apple", [0.1, 0.9, 0.1, 0.1, 0.2, 0.7]),
            ("banana", [0.1, 0.95, 0.1, 0.1, 0.1, 0.8]),
            ("fruit", [0.1, 0.9, 0.1, 0.3, 0.1, 0.6]),
            ("lunch", [0.2, 0.8, 0.1, 0.4, 0.5, 0.9]),
            // space
            ("star", [0.3, 0.1, 0.9, 0.6, 0.2, 0.8]),
            ("planet", [0.2, 0.4, 0.9, 0.5, 0.1, 0.7]),
            ("rocket", [0.8, 0.1, 0.9, 0.2, 0.9, 0.6]),
            ("mars", [0.4, 0.2, 0.95, 0.3, 0.1, 0.5]),
            // general
            ("king", [0.2, 0.6, 0.1, 0.5, 0.8, 0.7]),
            ("man", [0.2, 0.7, 0.1, 0.4, 0.6, 0.5]),
            ("woman", [0.2, 0.7, 0.1, 0.4, 0.6, 0.5]),
            ("queen", [0.2, 0.6, 0.1, 0.5, 0.8, 0.8]),
            ("default", DEFAULT_VECTOR),
        ])
    }

    /// Exact lookup of an already-normalized word.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<&Vector> {
        self.entries
            .iter()
            .find(|(key, _)| key == word)
            .map(|(_, v)| v)
    }

    /// First key that contains `word` or is contained in it.
    #[must_use]
    pub fn find_related(&self, word: &str) -> Option<(&str, &Vector)> {
        self.entries
            .iter()
            .find(|(key, _)| word.contains(key.as_str()) || key.contains(word))
            .map(|(key, v)| (key.as_str(), v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Vector)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::reference()
    }
}
