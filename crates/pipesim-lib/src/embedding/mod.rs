pub mod embedder;
pub mod vocabulary;
