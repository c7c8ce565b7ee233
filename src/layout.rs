use std::path::{Component, Path, PathBuf};

use anyhow::{anyhow, Result};

pub const CHUNK_DIR: &str = "webpack-entry-chunk";

/// Directory levels between a source file and its generated chunks.
pub const CHUNK_DEPTH: usize = 2;

/// `<dir>/webpack-entry-chunk/<chunk>/<file name>` for a source at `<dir>/<file name>`.
pub fn chunk_entry_path(source: &Path, chunk_name: &str) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .ok_or_else(|| anyhow!("entry source has no file name: {}", source.display()))?;
    let name = Path::new(chunk_name);
    let nested = name.components().all(|c| matches!(c, Component::Normal(_)));
    if chunk_name.is_empty() || !nested {
        return Err(anyhow!(
            "chunk name must be a relative path below {CHUNK_DIR}: {chunk_name:?}"
        ));
    }
    let dir = source.parent().unwrap_or_else(|| Path::new(""));
    Ok(dir.join(CHUNK_DIR).join(chunk_name).join(file_name))
}
