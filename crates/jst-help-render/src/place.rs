//! Writing rendered pages into the help bundle.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Write `bytes` to `path`, truncating any existing file.
///
/// Missing parent directories are an error unless `create_dirs` is set.
pub fn write_page(path: &Path, bytes: &[u8], create_dirs: bool) -> io::Result<()> {
    if create_dirs && let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.flush()
}
