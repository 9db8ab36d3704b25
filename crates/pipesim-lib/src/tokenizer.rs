use serde::Serialize;

/// Reserved marker prepended by open-vocabulary tokenizers.
pub const START_OF_SEQUENCE: &str = "<s>";

/// How a simulated model splits text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    /// BPE-like: whitespace glues onto the next word, words break into
    /// known subword fragments.
    Standard,
    /// Llama-like: whitespace runs are their own tokens, no subword split,
    /// a start-of-sequence marker in front.
    OpenVocabulary,
}

/// Static description of a selectable model.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ModelProfile {
    pub key: &'static str,
    pub name: &'static str,
    pub family: ModelFamily,
    /// USD per one million input tokens.
    pub input_price_per_m: f64,
    /// USD per one million output tokens.
    pub output_price_per_m: f64,
    pub context_window: &'static str,
    pub output_limit: u32,
}

impl ModelProfile {
    /// Input cost of `token_count` tokens in USD.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn estimate_input_cost(&self, token_count: usize) -> f64 {
        token_count as f64 / 1_000_000.0 * self.input_price_per_m
    }
}

/// Built-in model catalogue.
pub const MODEL_PROFILES: [ModelProfile; 4] = [
    ModelProfile {
        key: "gpt4o",
        name: "GPT-4o",
        family: ModelFamily::Standard,
        input_price_per_m: 5.00,
        output_price_per_m: 15.00,
        context_window: "128k",
        output_limit: 4096,
    },
    ModelProfile {
        key: "claude35",
        name: "Claude 3.5",
        family: ModelFamily::Standard,
        input_price_per_m: 3.00,
        output_price_per_m: 15.00,
        context_window: "200k",
        output_limit: 8192,
    },
    ModelProfile {
        key: "gemini15",
        name: "Gemini 1.5",
        family: ModelFamily::Standard,
        input_price_per_m: 3.50,
        output_price_per_m: 10.50,
        context_window: "1M+",
        output_limit: 8192,
    },
    ModelProfile {
        key: "ollama",
        name: "Llama 3",
        family: ModelFamily::OpenVocabulary,
        input_price_per_m: 0.0,
        output_price_per_m: 0.0,
        context_window: "8k",
        output_limit: 8192,
    },
];

/// Look up a model profile by its key (`gpt4o`, `claude35`, `gemini15`, `ollama`).
#[must_use]
pub fn model_profile(key: &str) -> Option<&'static ModelProfile> {
    MODEL_PROFILES.iter().find(|p| p.key == key)
}

/// Mock BPE tokenizer over a fixed list of subword fragments.
#[derive(Clone, Debug)]
pub struct Tokenizer {
    subwords: Vec<String>,
}

impl Tokenizer {
    /// Build a tokenizer over the given fragments. Earlier fragments win.
    pub fn new<I, S>(subwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subwords: subwords
                .into_iter()
                .map(|s| s.into().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Common English affixes.
    #[must_use]
    pub fn reference() -> Self {
        Self::new([
            "ing", "ed", "tion", "ness", "ment", "pre", "un", "re", "inter", "anti", "geo", "bio",
            "tech",
        ])
    }

    /// Split `text` into tokens according to `family`.
    #[must_use]
    pub fn tokenize(&self, text: &str, family: ModelFamily) -> Vec<String> {
        match family {
            ModelFamily::OpenVocabulary => tokenize_open_vocabulary(text),
            ModelFamily::Standard => self.tokenize_standard(text),
        }
    }

    fn tokenize_standard(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut buffer = String::new();

        for (part, is_space) in whitespace_runs(text) {
            if is_space {
                buffer.push_str(part);
                continue;
            }
            let word = std::mem::take(&mut buffer) + part;
            self.decompose(&word, &mut tokens);
        }

        if !buffer.is_empty() {
            tokens.push(buffer);
        }
        tokens
    }

    /// Greedy prefix -> suffix -> whole decomposition of one
    /// whitespace-prefixed word.
    fn decompose(&self, word: &str, tokens: &mut Vec<String>) {
        let mut fragment = word;

        while !fragment.is_empty() {
            let body = fragment.trim_start();
            let leading = &fragment[..fragment.len() - body.len()];

            if let Some(prefix) = self.subwords.iter().find(|s| has_prefix(body, s)) {
                let (head, rest) = body.split_at(prefix.len());
                tokens.push(format!("{leading}{head}"));
                fragment = rest;
                continue;
            }

            // Suffix matches end the word; only prefixes recurse.
            if let Some(suffix) = self.subwords.iter().find(|s| has_suffix(body, s)) {
                let (stem, tail) = body.split_at(body.len() - suffix.len());
                tokens.push(format!("{leading}{stem}"));
                tokens.push(tail.to_string());
                return;
            }

            tokens.push(fragment.to_string());
            return;
        }
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::reference()
    }
}

/// Tokenize with the reference subword list.
#[must_use]
pub fn tokenize(text: &str, family: ModelFamily) -> Vec<String> {
    Tokenizer::reference().tokenize(text, family)
}

fn tokenize_open_vocabulary(text: &str) -> Vec<String> {
    std::iter::once(START_OF_SEQUENCE.to_string())
        .chain(whitespace_runs(text).map(|(part, _)| part.to_string()))
        .collect()
}

/// Maximal runs of whitespace / non-whitespace, tagged with `true` for
/// whitespace. Never yields empty slices.
fn whitespace_runs(text: &str) -> impl Iterator<Item = (&str, bool)> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let is_space = first.is_whitespace();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace() != is_space)
            .map_or(rest.len(), |(i, _)| i);
        let (run, tail) = rest.split_at(end);
        rest = tail;
        Some((run, is_space))
    })
}

/// Case-insensitive prefix test that also requires `word` to be strictly
/// longer than the fragment.
fn has_prefix(word: &str, fragment: &str) -> bool {
    word.len() > fragment.len()
        && word
            .get(..fragment.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(fragment))
}

fn has_suffix(word: &str, fragment: &str) -> bool {
    word.len() > fragment.len()
        && word
            .get(word.len() - fragment.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(fragment))
}
