use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use pipesim_lib::handoff::{Relevance, pipeline_explanation, save_pipeline_selection};
use pipesim_lib::output::{ConsoleOutput, write_json};
use pipesim_lib::runtime::Runtime;
use pipesim_lib::spatial::{ConceptPoint, SpatialMap};
use pipesim_lib::vector::Point;

use super::Format;

#[derive(Serialize)]
struct NearestReport<'a> {
    query: Point,
    nearest: &'a ConceptPoint,
    distance: i64,
    close: bool,
}

/// Run the `pipesim nearest` command. A close hit is saved for
/// `pipesim explain`.
pub fn run_nearest<OUT, ERR>(
    x: f64,
    y: f64,
    runtime: &Runtime,
    format: Format,
    output: &mut dyn ConsoleOutput<OUT, ERR>,
) -> anyhow::Result<()>
where
    OUT: Write,
    ERR: Write,
{
    let map = SpatialMap::reference();
    let query = Point::new(x, y).clamped();
    let Some(hit) = map.nearest(query) else {
        anyhow::bail!("concept map is empty");
    };

    let report = NearestReport {
        query,
        nearest: hit.point,
        distance: hit.scaled_distance(),
        close: hit.is_close(),
    };

    if report.close {
        let mut store = runtime.store()?;
        save_pipeline_selection(&mut store, hit.point)?;
    }

    match format {
        Format::Json => write_json(output.stdout(), &report)?,
        Format::Text => {
            let marker = if report.close { "close" } else { "far" };
            writeln!(
                output.stdout(),
                "{} ({}) distance {} [{marker}]",
                report.nearest.name,
                report.nearest.category,
                report.distance
            )?;
        }
    }
    Ok(())
}

/// Run the `pipesim explain` command. Without a store yet, the explanation
/// uses the defaults for a missing selection.
pub fn run_explain<OUT, ERR>(
    runtime: &Runtime,
    format: Format,
    output: &mut dyn ConsoleOutput<OUT, ERR>,
) -> anyhow::Result<()>
where
    OUT: Write,
    ERR: Write,
{
    let explanation = match runtime.existing_store()? {
        Some(store) => pipeline_explanation(&store)?,
        None => pipeline_explanation(&HashMap::<String, String>::new())?,
    };

    match format {
        Format::Json => write_json(output.stdout(), &explanation)?,
        Format::Text => {
            let out = output.stdout();
            writeln!(out, "Q: {}", explanation.question)?;
            for context in &explanation.contexts {
                let relevance = match context.relevance {
                    Relevance::High => "High",
                    Relevance::Low => "Low",
                };
                writeln!(out, "  [{relevance} Relevance] {}", context.text)?;
            }
            writeln!(out, "A: {}", explanation.answer)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pipesim_lib::output::BufferedOutput;

    use crate::test_util::{runtime_in_memory, runtime_on_disk};

    fn run(runtime: &pipesim_lib::runtime::Runtime, args: &[&str]) -> String {
        let mut output = BufferedOutput::new();
        crate::try_run(args, runtime, &mut output).unwrap();
        output.stdout_to_string()
    }

    #[test]
    fn try_run_nearest_close_hit_feeds_explain() {
        let (_tmp, runtime) = runtime_in_memory("nearest_close_explain");

        assert_eq!(
            run(&runtime, &["pipesim", "nearest", "52", "78"]),
            "Rocket (Space) distance 14 [close]\n"
        );
        assert_eq!(
            run(&runtime, &["pipesim", "explain"]),
            "Q: What is a Rocket?\n\
             \x20 [High Relevance] Rocket belongs to category Space.\n\
             \x20 [Low Relevance] The weather in Mars is dusty today.\n\
             \x20 [Low Relevance] System error: 404 not found.\n\
             A: Based on the context provided, a Rocket is categorized as Space.\n"
        );
    }

    #[test]
    fn try_run_nearest_far_hit_is_not_saved() {
        let (_tmp, runtime) = runtime_in_memory("nearest_far");

        assert_eq!(
            run(&runtime, &["pipesim", "nearest", "0", "100"]),
            "Rocket (Space) distance 269 [far]\n"
        );
        let explain = run(&runtime, &["pipesim", "explain"]);
        assert!(explain.starts_with("Q: What is a Nothing?\n"), "{explain}");
    }

    #[test]
    fn try_run_explain_without_store_does_not_create_it() {
        let (_tmp, runtime) = runtime_on_disk();

        let explain = run(&runtime, &["pipesim", "explain"]);
        assert!(explain.starts_with("Q: What is a Nothing?\n"), "{explain}");
        assert!(!runtime.context.db_path().exists());
    }

    #[test]
    fn try_run_nearest_clamps_query() {
        let (_tmp, runtime) = runtime_in_memory("nearest_clamp");
        let mut output = BufferedOutput::new();
        crate::try_run(
            &["pipesim", "--json", "nearest", "-20", "150"],
            &runtime,
            &mut output,
        )
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output.stdout_to_string()).unwrap();
        assert_eq!(parsed["query"], serde_json::json!({ "x": 0.0, "y": 100.0 }));
    }
}
