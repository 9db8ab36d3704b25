pub mod knowledge;
pub mod ranker;
