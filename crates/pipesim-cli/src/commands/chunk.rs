use std::io::Write;

use pipesim_lib::output::{ConsoleOutput, write_json};
use pipesim_lib::pipeline::chunker::{ChunkConfig, chunk};

use super::Format;

/// Run the `pipesim chunk` command.
pub fn run_chunk<OUT, ERR>(
    text: &str,
    size: usize,
    overlap: usize,
    smart: bool,
    format: Format,
    output: &mut dyn ConsoleOutput<OUT, ERR>,
) -> anyhow::Result<()>
where
    OUT: Write,
    ERR: Write,
{
    let config = ChunkConfig::new(size, overlap, smart)?;
    if config.overlap != overlap {
        writeln!(
            output.stderr(),
            "overlap {overlap} clamped to {} (size {size})",
            config.overlap
        )?;
    }

    let chunks = chunk(text, &config);
    match format {
        Format::Json => write_json(output.stdout(), &chunks)?,
        Format::Text => {
            for c in &chunks {
                writeln!(output.stdout(), "[{}] @{} {:?}", c.chunk_index, c.start, c.text)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::test_util::run_cli;

    #[test]
    fn try_run_chunk_fixed_with_overlap() {
        let (stdout, stderr) =
            run_cli(&["pipesim", "chunk", "abcdefghij", "--size", "4", "--overlap", "2"]).unwrap();
        assert_eq!(
            stdout,
            "[0] @0 \"abcd\"\n[1] @2 \"cdef\"\n[2] @4 \"efgh\"\n[3] @6 \"ghij\"\n"
        );
        assert_eq!(stderr, "");
    }

    #[test]
    fn try_run_chunk_json() {
        let (stdout, _) = run_cli(&["pipesim", "--json", "chunk", "abcdef", "-s", "10"]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!([{ "chunk_index": 0, "start": 0, "text": "abcdef" }])
        );
    }

    #[test]
    fn try_run_chunk_clamps_overlap() {
        let (stdout, stderr) =
            run_cli(&["pipesim", "chunk", "abcdef", "-s", "3", "-o", "5"]).unwrap();
        assert_eq!(stderr, "overlap 5 clamped to 2 (size 3)\n");
        assert!(stdout.starts_with("[0] @0 \"abc\"\n[1] @1 \"bcd\"\n"));
    }

    #[test]
    fn try_run_chunk_rejects_zero_size() {
        let err = run_cli(&["pipesim", "chunk", "abc", "-s", "0"]).unwrap_err();
        assert_eq!(err.to_string(), "chunk size must be greater than zero");
    }
}
