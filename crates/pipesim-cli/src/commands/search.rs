use std::io::Write;

use serde::Serialize;

use pipesim_lib::config::MATCH_THRESHOLD;
use pipesim_lib::embedding::embedder::Embedder;
use pipesim_lib::handoff::{grounded_answer, save_retrieval};
use pipesim_lib::output::{ConsoleOutput, write_json};
use pipesim_lib::retrieval::knowledge::{KnowledgeBase, KnowledgeEntry};
use pipesim_lib::retrieval::ranker::{keyword_search, search};
use pipesim_lib::runtime::Runtime;

use super::Format;

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Method {
    Vector,
    Keyword,
}

#[derive(Serialize)]
struct SearchReport<'a> {
    method: Method,
    /// Word the query was reduced to; only for vector search.
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<String>,
    /// Cosine similarity for vector search, tag hits for keyword search.
    score: f64,
    matched: bool,
    best: Option<&'a KnowledgeEntry>,
}

/// Run the `pipesim search` command. A confident match is saved for
/// `pipesim answer`.
pub fn run_search<OUT, ERR>(
    query: &str,
    keyword: bool,
    seed: u64,
    runtime: &Runtime,
    format: Format,
    output: &mut dyn ConsoleOutput<OUT, ERR>,
) -> anyhow::Result<()>
where
    OUT: Write,
    ERR: Write,
{
    let kb = KnowledgeBase::reference();

    let report = if keyword {
        let found = keyword_search(query, &kb);
        #[allow(clippy::cast_precision_loss)]
        let score = found.score as f64;
        SearchReport {
            method: Method::Keyword,
            subject: None,
            score,
            matched: found.best.is_some(),
            best: found.best,
        }
    } else {
        let mut embedder = Embedder::seeded(seed);
        let found = search(query, &kb, &mut embedder);
        SearchReport {
            method: Method::Vector,
            matched: found.is_match(MATCH_THRESHOLD),
            subject: Some(found.subject),
            score: f64::from(found.score),
            best: found.best,
        }
    };

    if report.matched
        && let Some(entry) = report.best
    {
        let mut store = runtime.store()?;
        save_retrieval(&mut store, entry)?;
    }

    match format {
        Format::Json => write_json(output.stdout(), &report)?,
        Format::Text => write_report(output.stdout(), &report)?,
    }
    Ok(())
}

fn write_report<W: Write>(out: &mut W, report: &SearchReport<'_>) -> anyhow::Result<()> {
    if let Some(subject) = &report.subject {
        writeln!(out, "subject: {subject}")?;
    }
    let score = match report.method {
        Method::Vector => format!("similarity {:.4}", report.score),
        Method::Keyword => format!("{} tag hits", report.score),
    };
    match report.best {
        Some(entry) if report.matched => {
            writeln!(out, "match [{}] ({score}): {}", entry.id, entry.text)?;
        }
        _ => writeln!(out, "no match ({score})")?,
    }
    Ok(())
}

/// Run the `pipesim answer` command. Never creates the hand-off store.
pub fn run_answer<OUT, ERR>(
    runtime: &Runtime,
    format: Format,
    output: &mut dyn ConsoleOutput<OUT, ERR>,
) -> anyhow::Result<()>
where
    OUT: Write,
    ERR: Write,
{
    let answer = match runtime.existing_store()? {
        Some(store) => grounded_answer(&store)?,
        None => None,
    };
    let Some(answer) = answer else {
        anyhow::bail!("No retrieved context yet. Run `pipesim search` first.");
    };

    match format {
        Format::Json => write_json(output.stdout(), &serde_json::json!({ "answer": answer }))?,
        Format::Text => writeln!(output.stdout(), "{answer}")?,
    }
    Ok(())
}
