use rand::Rng;
use serde::Serialize;

use crate::config::GREEDY_TEMPERATURE;

/// Candidates offered when the last word has no bigram entry, or an entry
/// with no followers.
const FALLBACK_CANDIDATES: [&str; 4] = ["is", "the", "a", "unknown"];

/// One possible next word with its sampled weight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub word: String,
    /// Raw weight in `10..=89`.
    pub weight: u32,
    /// Share of the total weight, floored to a whole percent.
    pub percent: u32,
}

/// Ranked candidates and the one that was picked.
#[derive(Clone, Debug, Serialize)]
pub struct Prediction {
    /// Lowercased last word of the prompt.
    pub context: String,
    /// Candidates sorted by descending weight.
    pub candidates: Vec<Candidate>,
    pub selected: usize,
}

impl Prediction {
    #[must_use]
    pub fn selected_word(&self) -> &str {
        &self.candidates[self.selected].word
    }
}

/// Toy next-token model: a word -> followers table.
#[derive(Clone, Debug)]
pub struct BigramModel {
    table: Vec<(String, Vec<String>)>,
}

impl BigramModel {
    #[must_use]
    pub fn new(table: Vec<(String, Vec<String>)>) -> Self {
        Self { table }
    }

    #[must_use]
    pub fn reference() -> Self {
        let rows: [(&str, &[&str]); 6] = [
            ("the", &["quick", "artificial", "future", "data"]),
            ("artificial", &["intelligence", "neural", "reality"]),
            ("hello", &["world", "user", "there"]),
            ("data", &["base", "science", "privacy"]),
            ("quick", &["brown", "response", "fix"]),
            ("brown", &["fox", "box", "note"]),
        ];
        Self::new(
            rows.iter()
                .map(|(word, next)| {
                    (
                        (*word).to_string(),
                        next.iter().map(|n| (*n).to_string()).collect(),
                    )
                })
                .collect(),
        )
    }

    /// Followers of `word`, or the generic fallback list when the word is
    /// missing or its row is empty.
    #[must_use]
    pub fn followers(&self, word: &str) -> Vec<&str> {
        self.table
            .iter()
            .find(|(w, next)| w == word && !next.is_empty())
            .map_or_else(
                || FALLBACK_CANDIDATES.to_vec(),
                |(_, next)| next.iter().map(String::as_str).collect(),
            )
    }

    /// Sample weights for the followers of the prompt's last word and pick
    /// one. Below [`GREEDY_TEMPERATURE`] the heaviest candidate is chosen;
    /// otherwise the pick is uniform over all candidates.
    pub fn predict<R: Rng>(&self, input: &str, temperature: f64, rng: &mut R) -> Prediction {
        let lowered = input.trim().to_lowercase();
        let context = lowered.split(' ').next_back().unwrap_or_default().to_string();

        let mut weighted: Vec<(String, u32)> = self
            .followers(&context)
            .into_iter()
            .map(|w| (w.to_string(), rng.gen_range(10..=89)))
            .collect();
        // stable: equal weights keep table order
        weighted.sort_by(|a, b| b.1.cmp(&a.1));

        let total: u32 = weighted.iter().map(|(_, p)| p).sum();
        let candidates: Vec<Candidate> = weighted
            .into_iter()
            .map(|(word, weight)| Candidate {
                word,
                weight,
                percent: weight * 100 / total,
            })
            .collect();

        let selected = if temperature < GREEDY_TEMPERATURE {
            0
        } else {
            rng.gen_range(0..candidates.len())
        };

        Prediction {
            context,
            candidates,
            selected,
        }
    }
}

impl Default for BigramModel {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn known_word_uses_bigram_followers() {
        let model = BigramModel::reference();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let p = model.predict("Hello", 0.2, &mut rng);
        assert_eq!(p.context, "hello");
        let mut words: Vec<&str> = p.candidates.iter().map(|c| c.word.as_str()).collect();
        words.sort_unstable();
        assert_eq!(words, ["there", "user", "world"]);
    }

    #[test]
    fn unknown_word_uses_fallback() {
        let model = BigramModel::reference();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let p = model.predict("I like zebras", 0.9, &mut rng);
        assert_eq!(p.context, "zebras");
        assert_eq!(p.candidates.len(), 4);
        assert!(p.candidates.iter().any(|c| c.word == "unknown"));
    }

    #[test]
    fn candidates_sorted_and_weights_in_range() {
        let model = BigramModel::reference();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            let p = model.predict("the", 1.0, &mut rng);
            assert!(p.candidates.windows(2).all(|w| w[0].weight >= w[1].weight));
            assert!(p.candidates.iter().all(|c| (10..=89).contains(&c.weight)));
            let pct: u32 = p.candidates.iter().map(|c| c.percent).sum();
            assert!(pct <= 100 && pct >= 100 - 4, "percent sum {pct}");
            assert!(p.selected < p.candidates.len());
        }
    }

    #[test]
    fn low_temperature_is_greedy() {
        let model = BigramModel::reference();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..20 {
            let p = model.predict("data", 0.1, &mut rng);
            assert_eq!(p.selected, 0);
            assert_eq!(p.selected_word(), p.candidates[0].word);
        }
    }

    #[test]
    fn same_seed_same_prediction() {
        let model = BigramModel::reference();
        let a = model.predict("quick", 0.9, &mut ChaCha8Rng::seed_from_u64(5));
        let b = model.predict("quick", 0.9, &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(a.candidates, b.candidates);
        assert_eq!(a.selected, b.selected);
    }

    #[test]
    fn empty_follower_row_falls_back() {
        let model = BigramModel::new(vec![("x".to_string(), Vec::new())]);
        assert_eq!(model.followers("x"), FALLBACK_CANDIDATES);
        for (seed, temperature) in [(7, 0.9), (8, 0.1)] {
            let p = model.predict("x", temperature, &mut ChaCha8Rng::seed_from_u64(seed));
            assert_eq!(p.candidates.len(), 4);
            assert!(FALLBACK_CANDIDATES.contains(&p.selected_word()));
        }
    }

    #[test]
    fn empty_prompt_falls_back() {
        let model = BigramModel::reference();
        let p = model.predict("   ", 0.0, &mut ChaCha8Rng::seed_from_u64(6));
        assert_eq!(p.context, "");
        assert_eq!(p.candidates.len(), 4);
    }
}
