use std::io::Write;

use serde::Serialize;

use pipesim_lib::output::{ConsoleOutput, write_json};
use pipesim_lib::tokenizer::{MODEL_PROFILES, ModelProfile, model_profile, tokenize};

use super::Format;

#[derive(Serialize)]
struct TokenizeReport<'a> {
    model: &'a ModelProfile,
    tokens: Vec<String>,
    estimated_input_cost: f64,
}

/// Run the `pipesim tokenize` command.
pub fn run_tokenize<OUT, ERR>(
    text: &str,
    model: &str,
    format: Format,
    output: &mut dyn ConsoleOutput<OUT, ERR>,
) -> anyhow::Result<()>
where
    OUT: Write,
    ERR: Write,
{
    let Some(profile) = model_profile(model) else {
        let known: Vec<&str> = MODEL_PROFILES.iter().map(|p| p.key).collect();
        anyhow::bail!("unknown model: {model} (expected one of {})", known.join(", "));
    };

    let tokens = tokenize(text, profile.family);
    let report = TokenizeReport {
        model: profile,
        estimated_input_cost: profile.estimate_input_cost(tokens.len()),
        tokens,
    };

    match format {
        Format::Json => write_json(output.stdout(), &report)?,
        Format::Text => {
            let out = output.stdout();
            writeln!(out, "{} ({} tokens)", report.model.name, report.tokens.len())?;
            writeln!(out, "{:?}", report.tokens)?;
            writeln!(out, "estimated input cost: ${:.6}", report.estimated_input_cost)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::test_util::run_cli;

    #[test]
    fn try_run_tokenize_standard_family() {
        let (stdout, _) = run_cli(&["pipesim", "tokenize", "walking"]).unwrap();
        assert_eq!(
            stdout,
            "GPT-4o (2 tokens)\n[\"walk\", \"ing\"]\nestimated input cost: $0.000010\n"
        );
    }

    #[test]
    fn try_run_tokenize_open_vocabulary_family() {
        let (stdout, _) = run_cli(&["pipesim", "tokenize", "Hi  there", "-m", "ollama"]).unwrap();
        assert_eq!(
            stdout,
            "Llama 3 (4 tokens)\n[\"<s>\", \"Hi\", \"  \", \"there\"]\nestimated input cost: $0.000000\n"
        );
    }

    #[test]
    fn try_run_tokenize_json_includes_profile() {
        let (stdout, _) =
            run_cli(&["pipesim", "tokenize", "", "--model", "claude35", "--json"]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(parsed["model"]["context_window"], "200k");
        assert_eq!(parsed["tokens"], serde_json::json!([]));
    }

    #[test]
    fn try_run_tokenize_unknown_model() {
        let err = run_cli(&["pipesim", "tokenize", "hi", "-m", "gpt2"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown model: gpt2 (expected one of gpt4o, claude35, gemini15, ollama)"
        );
    }
}
