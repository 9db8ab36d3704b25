use std::io::Write;

use pipesim_lib::output::{ConsoleOutput, write_json};
use pipesim_lib::tools::route;

use super::Format;

/// Run the `pipesim route` command.
pub fn run_route<OUT, ERR>(
    input: &str,
    format: Format,
    output: &mut dyn ConsoleOutput<OUT, ERR>,
) -> anyhow::Result<()>
where
    OUT: Write,
    ERR: Write,
{
    let routed = route(input);

    match format {
        Format::Json => write_json(output.stdout(), &routed)?,
        Format::Text => {
            let out = output.stdout();
            writeln!(out, "thought: {}", routed.thought)?;
            writeln!(out, "tool: {}", routed.tool.unwrap_or("none"))?;
            writeln!(out, "result: {}", routed.result)?;
        }
    }
    Ok(())
}
