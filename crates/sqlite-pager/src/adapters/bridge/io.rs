use std::io::{BufRead, BufReader, BufWriter, Write};

use sqlite_pager::{AppError, AppResult};

use super::protocol::BridgeResponse;

pub struct NdjsonIo<R, W: Write> {
    input: BufReader<R>,
    output: BufWriter<W>,
}

impl NdjsonIo<std::io::Stdin, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin(), std::io::stdout())
    }
}

impl<R: std::io::Read, W: Write> NdjsonIo<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: BufReader::new(input),
            output: BufWriter::new(output),
        }
    }

    /// `None` at end of input; blank lines come back empty.
    pub fn read_line(&mut self) -> AppResult<Option<String>> {
        let mut line = String::new();
        let n = self.input.read_line(&mut line)?;
        if n == 0 {
            return Ok(None);
        }
        let line = line.trim_end_matches(&['\r', '\n'][..]);
        if line.trim().is_empty() {
            return Ok(Some(String::new()));
        }
        Ok(Some(line.to_string()))
    }

    pub fn write_json_line<T: serde::Serialize>(&mut self, v: &T) -> AppResult<()> {
        serde_json::to_writer(&mut self.output, v)?;
        self.output.write_all(b"\n")?;
        self.output.flush()?;
        Ok(())
    }

    /// Answers a line that could not be parsed as a request.
    pub fn write_error(&mut self, e: &AppError) -> AppResult<()> {
        let resp = BridgeResponse::<()>::err(1, String::new(), e.code(), e.to_string());
        self.write_json_line(&resp)
    }
}
