use std::{
    io::{BufRead, Write},
    ops::RangeInclusive,
};

use anyhow::{bail, Context, Result};

/// Line-based question/answer over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Ask until the answer is a number inside `range`.
    pub fn number(&mut self, label: &str, range: RangeInclusive<u32>) -> Result<u32> {
        loop {
            let answer = self.line(label)?;
            match answer.parse::<u32>() {
                Ok(value) if range.contains(&value) => return Ok(value),
                _ => writeln!(
                    self.output,
                    "Invalid input. Enter a number between {} and {}.",
                    range.start(),
                    range.end()
                )?,
            }
        }
    }

    /// Ask until a non-empty answer is given.
    pub fn text(&mut self, label: &str) -> Result<String> {
        loop {
            let answer = self.line(label)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            writeln!(self.output, "A value is required.")?;
        }
    }

    fn line(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut buffer = String::new();
        let read = self
            .input
            .read_line(&mut buffer)
            .context("failed to read from stdin")?;
        if read == 0 {
            bail!("input closed");
        }
        Ok(buffer.trim().to_string())
    }
}
