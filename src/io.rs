use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::debugger::Debugger;

/// Yields complete logical lines, one at a time.
pub trait LineSource {
    fn next_line(&mut self) -> Option<String>;
}

/// Accepts output lines in order.
pub trait LineSink {
    fn write_line(&mut self, line: &str);
}

impl LineSink for Vec<String> {
    fn write_line(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

impl LineSource for VecDeque<String> {
    fn next_line(&mut self) -> Option<String> {
        self.pop_front()
    }
}

/// Line source over any buffered reader; line endings are stripped.
pub struct ReaderSource<R: BufRead> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

pub struct StdoutSink;

impl LineSink for StdoutSink {
    fn write_line(&mut self, line: &str) {
        println!("{}", line);
        let _ = std::io::stdout().flush();
    }
}

/// Console-protocol glue: feed lines from the source to the engine, first
/// assembling everything between `set code` and `end set code` into a single
/// newline-joined payload that bypasses command parsing.
pub fn pump(debugger: &mut Debugger, source: &mut dyn LineSource, sink: &mut dyn LineSink) {
    while let Some(line) = source.next_line() {
        debugger.handle_line(&line, sink);
        if line.trim() == "set code" {
            let mut body = Vec::new();
            let mut closed = false;
            while let Some(raw) = source.next_line() {
                if raw.trim() == "end set code" {
                    closed = true;
                    break;
                }
                body.push(raw);
            }
            debugger.handle_line(&body.join("\n"), sink);
            if closed {
                debugger.handle_line("end set code", sink);
            }
        }
    }
}
