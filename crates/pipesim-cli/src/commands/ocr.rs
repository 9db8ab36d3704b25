use std::io::Write;

use serde::Serialize;

use pipesim_lib::ocr::{DocumentKind, scan_legacy, scan_vision};
use pipesim_lib::output::{ConsoleOutput, write_json};

use super::Format;

#[derive(Serialize)]
struct LegacyReport {
    #[serde(rename = "type")]
    kind: DocumentKind,
    text: String,
}

/// Run the `pipesim ocr` command. A vision scan is structured, so it prints
/// as JSON in both formats.
pub fn run_ocr<OUT, ERR>(
    document: DocumentKind,
    legacy: bool,
    format: Format,
    output: &mut dyn ConsoleOutput<OUT, ERR>,
) -> anyhow::Result<()>
where
    OUT: Write,
    ERR: Write,
{
    if !legacy {
        return write_json(output.stdout(), &scan_vision(document));
    }

    let text = scan_legacy(document);
    match format {
        Format::Json => write_json(
            output.stdout(),
            &LegacyReport {
                kind: document,
                text,
            },
        )?,
        Format::Text => writeln!(output.stdout(), "{text}")?,
    }
    Ok(())
}
