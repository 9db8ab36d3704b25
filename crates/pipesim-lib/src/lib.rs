pub mod config;
pub mod context;
pub mod db;
pub mod embedding;
pub mod generation;
pub mod handoff;
pub mod ocr;
pub mod output;
pub mod persona;
pub mod pipeline;
pub mod quantize;
pub mod retrieval;
pub mod runtime;
pub mod spatial;
pub mod tokenizer;
pub mod tools;
pub mod vector;

pub use embedding::embedder::Embedder;
pub use pipeline::chunker::chunk;
pub use quantize::quantize;
pub use retrieval::ranker::search;
pub use tokenizer::tokenize;
pub use vector::cosine_similarity;
