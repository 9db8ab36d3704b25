pub mod cli;
pub mod commands;
pub mod logging;

#[cfg(test)]
pub mod test_util;

use std::io::Write;

use clap::Parser;
use tracing::debug;

use pipesim_lib::output::ConsoleOutput;
use pipesim_lib::runtime::Runtime;

use cli::{Cli, Command};
use commands::Format;

/// Parse `args` and run the selected command.
pub fn try_run<OUT, ERR>(
    args: &[&str],
    runtime: &Runtime,
    output: &mut dyn ConsoleOutput<OUT, ERR>,
) -> anyhow::Result<()>
where
    OUT: Write,
    ERR: Write,
{
    let cli = Cli::try_parse_from(args)?;
    debug!(command = ?cli.command, json = cli.json, seed = cli.seed, "running command");
    let format = Format::from_json_flag(cli.json);
    let seed = cli.seed;

    match cli.command {
        Command::Chunk {
            text,
            size,
            overlap,
            smart,
        } => commands::chunk::run_chunk(&text, size, overlap, smart, format, output),
        Command::Tokenize { text, model } => {
            commands::tokenize::run_tokenize(&text, &model, format, output)
        }
        Command::Embed { words } => commands::embed::run_embed(&words, seed, format, output),
        Command::Similarity { first, second } => {
            commands::embed::run_similarity(&first, &second, seed, format, output)
        }
        Command::Search { query, keyword } => {
            commands::search::run_search(&query, keyword, seed, runtime, format, output)
        }
        Command::Answer => commands::search::run_answer(runtime, format, output),
        Command::Nearest { x, y } => commands::nearest::run_nearest(x, y, runtime, format, output),
        Command::Explain => commands::nearest::run_explain(runtime, format, output),
        Command::Quantize { level, weights } => {
            commands::quantize::run_quantize(level, &weights, format, output)
        }
        Command::Predict {
            prompt,
            temperature,
        } => commands::predict::run_predict(&prompt, temperature, seed, format, output),
        Command::Route { input } => commands::route::run_route(&input, format, output),
        Command::Ocr { document, legacy } => {
            commands::ocr::run_ocr(document, legacy, format, output)
        }
        Command::Chat {
            message,
            persona,
            system,
        } => commands::chat::run_chat(&message, persona, system.as_deref(), format, output),
    }
}
