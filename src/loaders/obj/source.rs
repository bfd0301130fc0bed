//! Line-oriented input used by the OBJ and MTL parsers.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

pub trait LineSource {
    /// Next line without its terminator, or `None` once the input is
    /// exhausted. A read error is returned once and ends the source.
    fn next_line(&mut self) -> Option<io::Result<String>>;
}

/// Opens named inputs as line sources.
pub trait SourceOpener {
    fn open(&self, path: &Path) -> io::Result<Box<dyn LineSource>>;
}

/// Splits a byte stream into lines. Bytes that are not valid UTF-8 are
/// replaced, so they only affect the line they sit on.
pub struct ReaderLines<R> {
    reader: R,
    buffer: Vec<u8>,
    finished: bool,
}

impl<R: BufRead> ReaderLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            finished: false,
        }
    }
}

impl<R: BufRead> LineSource for ReaderLines<R> {
    fn next_line(&mut self) -> Option<io::Result<String>> {
        if self.finished {
            return None;
        }

        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => {
                self.finished = true;
                None
            }
            Ok(_) => {
                let line = String::from_utf8_lossy(&self.buffer);
                Some(Ok(line.trim_end_matches(['\n', '\r']).to_string()))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Reads from the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileOpener;

impl SourceOpener for FileOpener {
    fn open(&self, path: &Path) -> io::Result<Box<dyn LineSource>> {
        let file = File::open(path)?;
        Ok(Box::new(ReaderLines::new(BufReader::new(file))))
    }
}

/// Serves file contents from memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryOpener {
    files: HashMap<PathBuf, String>,
}

impl MemoryOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }
}

impl SourceOpener for MemoryOpener {
    fn open(&self, path: &Path) -> io::Result<Box<dyn LineSource>> {
        let contents = self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no in-memory file '{}'", path.display()),
            )
        })?;
        Ok(Box::new(ReaderLines::new(Cursor::new(contents))))
    }
}

/// Directory that relative material and texture paths resolve against.
pub fn folder_of(path: &Path) -> PathBuf {
    path.parent().unwrap_or_else(|| Path::new("")).to_path_buf()
}
