/// Dimensionality of every simulated embedding vector.
///
/// The six axes are `[Tech, Organic, Space, Abstract, Action, Positive]`.
pub const EMBEDDING_DIMENSION: usize = 6;

/// Minimum cosine similarity for a retrieval result to be shown as a match.
///
/// A best entry is always returned by the ranker; below this score the
/// front end reports "no match" instead.
pub const MATCH_THRESHOLD: f32 = 0.6;

/// Default chunk size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 25;

/// Fixed-stride tails shorter than this (after trimming) are dropped.
pub const MIN_TAIL_CHUNK_CHARS: usize = 5;

/// Smart chunking only accepts a delimiter at or past this fraction of the
/// chunk size into the window.
pub const SMART_MIN_FILL_RATIO: f64 = 0.5;

/// Amplitude of the per-dimension jitter added on the fuzzy embedding path.
pub const FUZZY_JITTER: f32 = 0.05;

/// Seed used for jitter and sampling when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 42;

/// Scaled 2-D distance below which a dragged query "snaps" to a concept.
pub const NEAREST_CLOSE_DISTANCE: i64 = 100;

/// Temperature below which next-token prediction is greedy.
pub const GREEDY_TEMPERATURE: f64 = 0.5;

/// Store key holding the text of the last matched knowledge entry.
pub const RAG_BEST_KEY: &str = "rag-best";

/// Store key holding the name of the last snapped concept point.
pub const PIPELINE_MATCH_KEY: &str = "pipeline-match";

/// Store key holding the category of the last snapped concept point.
pub const PIPELINE_CATEGORY_KEY: &str = "pipeline-cat";
