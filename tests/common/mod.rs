#![allow(dead_code)]

use std::path::{Path, PathBuf};

use entry_chunk::*;
use tempfile::TempDir;

pub const BARREL: &str = "export { default as X } from './x';\nexport { default as Y } from './y';\n";

/// A scratch project tree: `files` are `(relative path, contents)`.
pub fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    for (rel, contents) in files {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create fixture dir");
        }
        std::fs::write(&path, contents).expect("write fixture");
    }
    dir
}

pub fn entry(value: serde_json::Value) -> Entry {
    Entry::from_value(value)
}

pub fn chunk_path(root: &Path, source_rel: &str, chunk: &str) -> PathBuf {
    chunk_entry_path(&root.join(source_rel), chunk).expect("chunk path")
}

pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

pub fn keys(entry: &Entry) -> Vec<String> {
    entry
        .as_map()
        .expect("entry map")
        .keys()
        .cloned()
        .collect()
}

pub fn import_of(entry: &Entry, key: &str) -> Vec<String> {
    entry.as_map().expect("entry map")[key]
        .import_list()
        .iter()
        .filter_map(|s| s.as_path().map(str::to_string))
        .collect()
}

pub fn run(options: ChunkOptions, root: &Path, entry: &mut Entry) -> ApplyReport {
    EntryChunkPlugin::new(options)
        .apply(root, entry)
        .expect("apply")
}
