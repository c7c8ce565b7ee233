use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::entry::{EntryMap, EntryValue};
use crate::fs::FileSystem;
use crate::layout::{chunk_entry_path, CHUNK_DEPTH};
use crate::options::{Minify, Mode};
use crate::rewrite::rewrite_relative_specifiers;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenChunk {
    pub chunk: String,
    pub source: PathBuf,
    pub path: PathBuf,
    pub rewrites: usize,
}

/// Rewrite `text` for its new location next to `source` and write it there.
pub fn write_chunk(
    fs: &dyn FileSystem,
    source: &Path,
    chunk_name: &str,
    text: &str,
) -> Result<WrittenChunk> {
    let path = chunk_entry_path(source, chunk_name)?;
    let source_dir = source.parent().unwrap_or_else(|| Path::new(""));
    let target_dir = path
        .parent()
        .ok_or_else(|| anyhow!("chunk path has no parent: {}", path.display()))?;

    let depth = target_dir
        .strip_prefix(source_dir)
        .map(|rel| rel.components().count())
        .unwrap_or(CHUNK_DEPTH);
    let (text, rewrites) = rewrite_relative_specifiers(text, depth);

    ensure_chunk_dirs(fs, source_dir, target_dir)?;
    fs.write(&path, &text)
        .with_context(|| format!("failed to write chunk file: {}", path.display()))?;
    tracing::debug!(chunk = chunk_name, path = %path.display(), rewrites, "wrote chunk");

    Ok(WrittenChunk {
        chunk: chunk_name.to_string(),
        source: source.to_path_buf(),
        path,
        rewrites,
    })
}

// One create_dir per missing level below the source directory. The source
// directory itself is never created.
fn ensure_chunk_dirs(fs: &dyn FileSystem, source_dir: &Path, target_dir: &Path) -> Result<()> {
    if fs.exists(target_dir) {
        return Ok(());
    }
    let rel = target_dir.strip_prefix(source_dir).unwrap_or(target_dir);
    let mut dir = source_dir.to_path_buf();
    for part in rel.components() {
        dir.push(part);
        if !fs.exists(&dir) {
            fs.create_dir(&dir)
                .with_context(|| format!("failed to create chunk directory: {}", dir.display()))?;
        }
    }
    Ok(())
}

/// Register a chunk entry. Returns the keys added; none when `mode` is off.
pub fn register_chunk(
    entry: &mut EntryMap,
    mode: Mode,
    min: Minify,
    name: &str,
    path: &Path,
) -> Vec<String> {
    if !mode.registers() {
        return Vec::new();
    }
    let mut keys = vec![name.to_string()];
    if min.enabled() {
        keys.push(format!("{}.min", name));
    }
    for key in &keys {
        entry.insert(key.clone(), EntryValue::import(path));
        tracing::debug!(entry = %key, path = %path.display(), "registered chunk entry");
    }
    keys
}
