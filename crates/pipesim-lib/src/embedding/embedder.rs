use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::debug;

use crate::config::{DEFAULT_SEED, EMBEDDING_DIMENSION, FUZZY_JITTER};
use crate::vector::Vector;

use super::vocabulary::{DEFAULT_VECTOR, Vocabulary};

/// Source of the noise added to fuzzy-matched embeddings.
pub trait JitterSource {
    /// Draw one offset in `[-amplitude, amplitude]`.
    fn jitter(&mut self, amplitude: f32) -> f32;
}

/// Reproducible jitter backed by a seeded `ChaCha8Rng`.
pub struct SeededJitter {
    rng: ChaCha8Rng,
}

impl SeededJitter {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl JitterSource for SeededJitter {
    fn jitter(&mut self, amplitude: f32) -> f32 {
        self.rng.gen_range(-amplitude..=amplitude)
    }
}

/// Jitter source that never perturbs, making the fuzzy path deterministic.
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn jitter(&mut self, _amplitude: f32) -> f32 {
        0.0
    }
}

/// Which rule produced an embedding.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmbeddingSource {
    /// The word normalized to nothing.
    Default,
    /// Exact vocabulary hit.
    Exact,
    /// Substring relation with a vocabulary key, plus jitter.
    Fuzzy { key: String },
    /// Character-code hash.
    Hash { value: u64 },
}

/// An embedding together with how it was derived.
#[derive(Clone, Debug, Serialize)]
pub struct Embedding {
    pub normalized: String,
    pub source: EmbeddingSource,
    pub vector: Vector,
}

/// Deterministic word -> vector simulator.
pub struct Embedder {
    vocabulary: Vocabulary,
    jitter: Box<dyn JitterSource>,
}

impl Embedder {
    pub fn new(vocabulary: Vocabulary, jitter: Box<dyn JitterSource>) -> Self {
        Self { vocabulary, jitter }
    }

    /// Reference vocabulary with seeded jitter.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(Vocabulary::reference(), Box::new(SeededJitter::new(seed)))
    }

    /// Reference vocabulary with jitter disabled.
    #[must_use]
    pub fn deterministic() -> Self {
        Self::new(Vocabulary::reference(), Box::new(NoJitter))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Map a word to its simulated vector.
    pub fn embed(&mut self, word: &str) -> Vector {
        self.embed_traced(word).vector
    }

    /// Like [`Self::embed`], but also reports which rule matched.
    pub fn embed_traced(&mut self, word: &str) -> Embedding {
        let normalized = normalize(word);

        if normalized.is_empty() {
            return Embedding {
                normalized,
                source: EmbeddingSource::Default,
                vector: DEFAULT_VECTOR,
            };
        }

        if let Some(vector) = self.vocabulary.get(&normalized) {
            return Embedding {
                vector: *vector,
                normalized,
                source: EmbeddingSource::Exact,
            };
        }

        if let Some((key, base)) = self.vocabulary.find_related(&normalized) {
            let key = key.to_string();
            let base = *base;
            debug!(word = %normalized, %key, "fuzzy embedding match");
            let vector = base.map(|v| v + self.jitter.jitter(FUZZY_JITTER));
            return Embedding {
                normalized,
                source: EmbeddingSource::Fuzzy { key },
                vector,
            };
        }

        let value = char_code_sum(&normalized);
        debug!(word = %normalized, value, "hash embedding fallback");
        Embedding {
            normalized,
            source: EmbeddingSource::Hash { value },
            vector: hash_vector(value),
        }
    }

    /// Return the embedding dimension (6 semantic axes).
    #[must_use]
    pub const fn dimension() -> usize {
        EMBEDDING_DIMENSION
    }
}

impl Default for Embedder {
    fn default() -> Self {
        Self::seeded(DEFAULT_SEED)
    }
}

/// Lowercase and keep only `a-z`.
fn normalize(word: &str) -> String {
    word.chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_lowercase)
        .collect()
}

fn char_code_sum(word: &str) -> u64 {
    word.chars().map(u64::from).sum()
}

#[allow(clippy::cast_precision_loss)]
fn hash_vector(value: u64) -> Vector {
    let mut vector = [0.0; EMBEDDING_DIMENSION];
    for (k, slot) in (1_u64..).zip(vector.iter_mut()) {
        *slot = ((value * k) % 100) as f32 / 100.0;
    }
    vector
}
