use std::io::Write;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use pipesim_lib::generation::BigramModel;
use pipesim_lib::output::{ConsoleOutput, write_json};

use super::Format;

/// Run the `pipesim predict` command.
pub fn run_predict<OUT, ERR>(
    prompt: &str,
    temperature: f64,
    seed: u64,
    format: Format,
    output: &mut dyn ConsoleOutput<OUT, ERR>,
) -> anyhow::Result<()>
where
    OUT: Write,
    ERR: Write,
{
    let model = BigramModel::reference();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let prediction = model.predict(prompt, temperature, &mut rng);

    match format {
        Format::Json => write_json(output.stdout(), &prediction)?,
        Format::Text => {
            let out = output.stdout();
            for (i, candidate) in prediction.candidates.iter().enumerate() {
                let marker = if i == prediction.selected { '*' } else { ' ' };
                writeln!(out, "{marker} {:<14}{:>3}%", candidate.word, candidate.percent)?;
            }
            writeln!(out, "{} {}", prompt.trim(), prediction.selected_word())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::test_util::run_cli;

    #[test]
    fn try_run_predict_greedy_picks_first_candidate() {
        let (stdout, _) =
            run_cli(&["pipesim", "predict", "Hello", "--temperature", "0.1"]).unwrap();
        let lines: Vec<&str> = stdout.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("* "), "{stdout}");
        let chosen = lines[0][2..].split_whitespace().next().unwrap();
        assert_eq!(lines[3], format!("Hello {chosen}"));
        assert!(["world", "user", "there"].contains(&chosen));
    }

    #[test]
    fn try_run_predict_same_seed_same_output() {
        let args = ["pipesim", "--seed", "3", "predict", "the quick"];
        assert_eq!(run_cli(&args).unwrap().0, run_cli(&args).unwrap().0);
    }

    #[test]
    fn try_run_predict_json() {
        let (stdout, _) = run_cli(&["pipesim", "predict", "zebra", "--json"]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(parsed["context"], "zebra");
        assert_eq!(parsed["candidates"].as_array().unwrap().len(), 4);
    }
}
