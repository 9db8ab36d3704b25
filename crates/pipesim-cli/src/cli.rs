use clap::{Parser, Subcommand};

use pipesim_lib::config::{DEFAULT_CHUNK_SIZE, DEFAULT_SEED};
use pipesim_lib::ocr::DocumentKind;
use pipesim_lib::persona::Persona;
use pipesim_lib::quantize::QuantizationLevel;

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    about = "Simulated text pipeline: chunking, tokenization, embeddings, retrieval"
)]
pub struct Cli {
    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Seed for embedding jitter and sampling.
    #[arg(long, global = true, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split text into fixed-stride or delimiter-aware chunks.
    Chunk {
        text: String,
        /// Maximum characters per chunk.
        #[arg(short, long, default_value_t = DEFAULT_CHUNK_SIZE)]
        size: usize,
        /// Characters shared between consecutive chunks.
        #[arg(short, long, default_value_t = 0)]
        overlap: usize,
        /// Prefer breaking on paragraph, line, sentence or word boundaries.
        #[arg(long)]
        smart: bool,
    },

    /// Tokenize text the way a model family would.
    Tokenize {
        text: String,
        /// Model key: gpt4o, claude35, gemini15 or ollama.
        #[arg(short, long, default_value = "gpt4o")]
        model: String,
    },

    /// Show the simulated embedding of each word.
    Embed {
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Cosine similarity between the embeddings of two words.
    Similarity { first: String, second: String },

    /// Find the knowledge entry that best answers a question.
    Search {
        query: String,
        /// Rank by tag overlap instead of vector similarity.
        #[arg(long)]
        keyword: bool,
    },

    /// Answer from the last successful search.
    Answer,

    /// Snap a canvas position (percent coordinates) to the nearest concept.
    Nearest {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// Explain the last concept selected with `nearest`.
    Explain,

    /// Show weights at reduced display precision.
    Quantize {
        /// fp32, fp16, int8 or int4. All levels when omitted.
        #[arg(short, long)]
        level: Option<QuantizationLevel>,
        /// Comma-separated weights; defaults to the built-in sample layer.
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        weights: Vec<f64>,
    },

    /// Predict the next word of a prompt.
    Predict {
        prompt: String,
        /// Below 0.5 the most likely candidate is always chosen.
        #[arg(short, long, default_value_t = 0.7)]
        temperature: f64,
    },

    /// Decide which tool a request should be routed to.
    Route { input: String },

    /// Scan a sample document with a vision model or legacy OCR.
    Ocr {
        /// invoice, idcard or note.
        document: DocumentKind,
        /// Plain uppercased text instead of structured output.
        #[arg(long)]
        legacy: bool,
    },

    /// Send a chat message under a persona's system prompt.
    Chat {
        message: String,
        /// assistant, pirate, robot or therapy.
        #[arg(short, long, default_value = "assistant")]
        persona: Persona,
        /// Custom system prompt; overrides --persona.
        #[arg(long)]
        system: Option<String>,
    },
}
