//! The `apply` operation: enumerate entry sources, split each one into chunk
//! files and register those files back into the live entry map.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::diagnostics::{self, Warning};
use crate::entry::Entry;
use crate::fs::{FileSystem, OsFileSystem};
use crate::options::{ChunkOptions, Mode};
use crate::resolve::EntryResolver;
use crate::split::split_source;
use crate::writer::{register_chunk, write_chunk, WrittenChunk};

/// What one `apply` call did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    /// Absolute source paths that were split, in processing order.
    pub sources: Vec<PathBuf>,
    pub chunks: Vec<WrittenChunk>,
    /// Entry keys inserted into the entry map.
    pub registered: Vec<String>,
    pub warnings: Vec<Warning>,
}

impl ApplyReport {
    fn warn(&mut self, warning: Warning) {
        diagnostics::warn(&warning);
        self.warnings.push(warning);
    }

    /// True when a configuration guard stopped the run before any side effect.
    pub fn aborted(&self) -> bool {
        self.sources.is_empty()
            && self.warnings.iter().any(|w| {
                matches!(w, Warning::EmptyChunkConfig | Warning::MalformedEntry)
            })
    }
}

#[derive(Debug, Clone)]
pub struct EntryChunkPlugin {
    options: ChunkOptions,
}

impl EntryChunkPlugin {
    pub fn new(options: ChunkOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ChunkOptions {
        &self.options
    }

    /// Run against the real file system. `context` is the base directory
    /// relative entry paths resolve against.
    pub fn apply(&self, context: &Path, entry: &mut Entry) -> Result<ApplyReport> {
        self.apply_with(&OsFileSystem, context, entry)
    }

    pub fn apply_with(
        &self,
        fs: &dyn FileSystem,
        context: &Path,
        entry: &mut Entry,
    ) -> Result<ApplyReport> {
        let mut report = ApplyReport::default();
        let opts = &self.options;

        if let Err(w) = opts.validate() {
            report.warn(w);
            return Ok(report);
        }
        let live = match entry {
            Entry::Map(map) => map,
            Entry::Invalid(_) => {
                report.warn(Warning::MalformedEntry);
                return Ok(report);
            }
        };
        for w in opts.ignored_catch_alls() {
            report.warn(w);
        }

        let snapshot = live.clone();
        if opts.mode == Mode::Replace {
            live.clear();
        }

        let mut resolver = EntryResolver::new(context);
        let found = resolver.enumerate(&snapshot, &opts.exclude);

        for src in &found.sources {
            let source = fs
                .read_to_string(&src.path)
                .with_context(|| format!("failed to read entry source: {}", src.path.display()))?;
            tracing::debug!(entry = %src.entry, path = %src.path.display(), "splitting entry source");

            for chunk in split_source(&source, &opts.chunk_config)? {
                let written = write_chunk(fs, &src.path, &chunk.group.name, &chunk.text)?;
                let keys = register_chunk(live, opts.mode, opts.min, &chunk.group.name, &written.path);
                report.registered.extend(keys);
                report.chunks.push(written);
            }
            report.sources.push(src.path.clone());
        }

        if found.skipped_non_string && resolver.resolved_count() == 0 {
            report.warn(Warning::MalformedEntry);
        }
        Ok(report)
    }
}
