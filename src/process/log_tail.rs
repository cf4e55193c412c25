use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Follows a log file that another process appends to.
///
/// Only lines written after [`LogTail::new`] are reported. Every I/O failure is
/// treated as "nothing new yet"; the channel is best effort.
#[derive(Debug)]
pub struct LogTail {
    path: PathBuf,
    offset: u64,
    /// Bytes after the last newline; may end inside a multi-byte character.
    partial: Vec<u8>,
}

impl LogTail {
    #[must_use]
    pub fn new(path: &Path) -> Self {
        let offset = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        Self {
            path: path.to_path_buf(),
            offset,
            partial: Vec::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns complete lines appended since the last call.
    pub fn poll(&mut self) -> Vec<String> {
        let Some(chunk) = self.read_new() else {
            return Vec::new();
        };
        self.partial.extend_from_slice(&chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.partial.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.partial.drain(..=pos).collect();
            push_line(&mut lines, &line);
        }
        lines
    }

    /// Like [`LogTail::poll`], but also returns a trailing line without newline.
    pub fn finish(&mut self) -> Vec<String> {
        let mut lines = self.poll();
        let rest = std::mem::take(&mut self.partial);
        push_line(&mut lines, &rest);
        lines
    }

    fn read_new(&mut self) -> Option<Vec<u8>> {
        let mut file = File::open(&self.path).ok()?;
        let len = file.metadata().ok()?.len();
        if len < self.offset {
            // Truncated by the writer; start over.
            self.offset = 0;
            self.partial.clear();
        }
        if len == self.offset {
            return None;
        }
        file.seek(SeekFrom::Start(self.offset)).ok()?;
        let mut buf = Vec::new();
        let read = file.read_to_end(&mut buf).ok()?;
        self.offset += read as u64;
        Some(buf)
    }
}

fn push_line(lines: &mut Vec<String>, raw: &[u8]) {
    let text = String::from_utf8_lossy(raw);
    let text = text.trim_end_matches(['\r', '\n']);
    if !text.trim().is_empty() {
        lines.push(text.to_string());
    }
}

#[cfg(test)]
#[path = "log_tail_tests.rs"]
mod tests;
