use std::io::Write;

use serde::Serialize;

use pipesim_lib::embedding::embedder::{Embedder, Embedding, EmbeddingSource};
use pipesim_lib::output::{ConsoleOutput, write_json};
use pipesim_lib::vector::{Vector, cosine_similarity};

use super::Format;

#[derive(Serialize)]
struct EmbedRow<'a> {
    word: &'a str,
    #[serde(flatten)]
    embedding: Embedding,
}

#[derive(Serialize)]
struct SimilarityReport<'a> {
    first: EmbedRow<'a>,
    second: EmbedRow<'a>,
    similarity: f32,
}

/// Run the `pipesim embed` command.
pub fn run_embed<OUT, ERR>(
    words: &[String],
    seed: u64,
    format: Format,
    output: &mut dyn ConsoleOutput<OUT, ERR>,
) -> anyhow::Result<()>
where
    OUT: Write,
    ERR: Write,
{
    let mut embedder = Embedder::seeded(seed);
    let rows: Vec<EmbedRow<'_>> = words
        .iter()
        .map(|word| EmbedRow {
            word,
            embedding: embedder.embed_traced(word),
        })
        .collect();

    match format {
        Format::Json => write_json(output.stdout(), &rows)?,
        Format::Text => {
            for row in &rows {
                write_row(output.stdout(), row)?;
            }
        }
    }
    Ok(())
}

/// Run the `pipesim similarity` command.
pub fn run_similarity<OUT, ERR>(
    first: &str,
    second: &str,
    seed: u64,
    format: Format,
    output: &mut dyn ConsoleOutput<OUT, ERR>,
) -> anyhow::Result<()>
where
    OUT: Write,
    ERR: Write,
{
    let mut embedder = Embedder::seeded(seed);
    let first = EmbedRow {
        word: first,
        embedding: embedder.embed_traced(first),
    };
    let second = EmbedRow {
        word: second,
        embedding: embedder.embed_traced(second),
    };
    let similarity = cosine_similarity(&first.embedding.vector, &second.embedding.vector);
    let report = SimilarityReport {
        first,
        second,
        similarity,
    };

    match format {
        Format::Json => write_json(output.stdout(), &report)?,
        Format::Text => {
            let out = output.stdout();
            write_row(out, &report.first)?;
            write_row(out, &report.second)?;
            writeln!(out, "cosine similarity: {:.4}", report.similarity)?;
        }
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, row: &EmbedRow<'_>) -> anyhow::Result<()> {
    writeln!(
        out,
        "{}: {} ({})",
        row.word,
        format_vector(&row.embedding.vector),
        source_label(&row.embedding.source)
    )?;
    Ok(())
}

fn format_vector(v: &Vector) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.2}")).collect();
    format!("[{}]", parts.join(", "))
}

fn source_label(source: &EmbeddingSource) -> String {
    match source {
        EmbeddingSource::Default => "default".to_string(),
        EmbeddingSource::Exact => "exact".to_string(),
        EmbeddingSource::Fuzzy { key } => format!("fuzzy ~{key}"),
        EmbeddingSource::Hash { value } => format!("hash {value}"),
    }
}

#[cfg(test)]
mod tests {
    use crate::test_util::run_cli;

    #[test]
    fn try_run_embed_reports_each_rule() {
        let (stdout, _) = run_cli(&["pipesim", "embed", "King", "xyz123", "!!"]).unwrap();
        assert_eq!(
            stdout,
            "King: [0.20, 0.60, 0.10, 0.50, 0.80, 0.70] (exact)\n\
             xyz123: [0.63, 0.26, 0.89, 0.52, 0.15, 0.78] (hash 363)\n\
             !!: [0.50, 0.50, 0.50, 0.50, 0.50, 0.50] (default)\n"
        );
    }

    #[test]
    fn try_run_embed_fuzzy_is_seed_reproducible() {
        let args = ["pipesim", "--seed", "9", "embed", "computers"];
        let (first, _) = run_cli(&args).unwrap();
        let (second, _) = run_cli(&args).unwrap();
        assert_eq!(first, second);
        assert!(first.ends_with("(fuzzy ~computer)\n"));
    }

    #[test]
    fn try_run_embed_json() {
        let (stdout, _) = run_cli(&["pipesim", "embed", "mars", "--json"]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(parsed[0]["word"], "mars");
        assert_eq!(parsed[0]["source"]["kind"], "exact");
        assert_eq!(parsed[0]["vector"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn try_run_embed_requires_a_word() {
        assert!(run_cli(&["pipesim", "embed"]).is_err());
    }

    #[test]
    fn try_run_similarity_related_words() {
        let (stdout, _) = run_cli(&["pipesim", "similarity", "king", "queen"]).unwrap();
        assert!(stdout.ends_with("cosine similarity: 0.9981\n"), "{stdout}");
    }

    #[test]
    fn try_run_similarity_unrelated_words() {
        let (stdout, _) = run_cli(&["pipesim", "similarity", "apple", "server"]).unwrap();
        assert!(stdout.ends_with("cosine similarity: 0.4416\n"), "{stdout}");
    }
}
