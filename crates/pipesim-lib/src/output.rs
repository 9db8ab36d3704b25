use std::io::{Stderr, Stdout, Write};

use anyhow::Context;
use serde::Serialize;

/// Where command results and diagnostics are written.
pub trait ConsoleOutput<OUT: Write, ERR: Write> {
    fn stdout(&mut self) -> &mut OUT;
    fn stderr(&mut self) -> &mut ERR;
}

pub struct StdOutput {
    stdout: Stdout,
    stderr: Stderr,
}

impl StdOutput {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stdout: std::io::stdout(),
            stderr: std::io::stderr(),
        }
    }
}

impl Default for StdOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleOutput<Stdout, Stderr> for StdOutput {
    fn stdout(&mut self) -> &mut Stdout {
        &mut self.stdout
    }

    fn stderr(&mut self) -> &mut Stderr {
        &mut self.stderr
    }
}

/// Captures output in memory for assertions.
#[derive(Default)]
pub struct BufferedOutput {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl BufferedOutput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stdout_to_string(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_to_string(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

impl ConsoleOutput<Vec<u8>, Vec<u8>> for BufferedOutput {
    fn stdout(&mut self) -> &mut Vec<u8> {
        &mut self.stdout
    }

    fn stderr(&mut self) -> &mut Vec<u8> {
        &mut self.stderr
    }
}

/// Write `value` as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to serialize result")?;
    writeln!(out)?;
    Ok(())
}
