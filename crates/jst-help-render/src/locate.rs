//! Discovery of top-level Markdown sources.

use std::fs::ReadDir;
use std::io;
use std::path::{Path, PathBuf};

use glob::Pattern;

/// File name pattern for help sources.
const MARKDOWN_PATTERN: &str = "*.md";

/// Iterator over the `*.md` entries directly inside a directory.
///
/// Subdirectories are not descended into. Entries come out in the order the
/// filesystem enumerates them, which is unspecified.
pub struct MarkdownFiles {
    entries: ReadDir,
    pattern: Pattern,
}

impl MarkdownFiles {
    /// Start enumerating `dir`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if `dir` does not exist or cannot be read.
    pub fn new(dir: &Path) -> io::Result<Self> {
        let pattern = Pattern::new(MARKDOWN_PATTERN)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        Ok(Self {
            entries: std::fs::read_dir(dir)?,
            pattern,
        })
    }
}

impl Iterator for MarkdownFiles {
    type Item = io::Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e)),
            };
            let name = entry.file_name();
            if self.pattern.matches(&name.to_string_lossy()) {
                return Some(Ok(entry.path()));
            }
        }
    }
}
