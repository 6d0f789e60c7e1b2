//! Line scanner feeding the Makefile parser.
//!
//! Hands out one physical line at a time together with its 1-indexed line
//! number. Lines are returned untrimmed because leading tabs mark recipe lines.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{CheckmakeError, Result};

/// Scanner over the physical lines of a Makefile.
#[derive(Debug)]
pub struct MakefileScanner<R> {
    reader: R,
    file_name: String,
    text: String,
    line_number: usize,
    finished: bool,
}

impl MakefileScanner<BufReader<File>> {
    /// Open a file and position the scanner on its first line.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CheckmakeError::io(path, e))?;
        Self::new(path.display().to_string(), BufReader::new(file))
            .map_err(|e| CheckmakeError::io(path, e))
    }
}

impl<R: BufRead> MakefileScanner<R> {
    /// Wrap a reader and position the scanner on its first line.
    pub fn new(file_name: impl Into<String>, reader: R) -> io::Result<Self> {
        let mut scanner = Self {
            reader,
            file_name: file_name.into(),
            text: String::new(),
            line_number: 0,
            finished: false,
        };
        scanner.scan()?;
        Ok(scanner)
    }

    /// Advance to the next physical line.
    ///
    /// Once the input is exhausted `finished()` turns true and `text()` is empty.
    pub fn scan(&mut self) -> io::Result<()> {
        if self.finished {
            return Ok(());
        }

        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            self.finished = true;
            self.text.clear();
            return Ok(());
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        self.text = String::from_utf8_lossy(&buf).into_owned();
        self.line_number += 1;
        Ok(())
    }

    /// The current line, without its line terminator.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1-indexed number of the current line.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}
