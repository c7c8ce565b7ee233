#![allow(clippy::collapsible_if)]
mod config;
mod diagnostics;
mod entry;
mod exclude;
mod fs;
mod group;
mod layout;
mod options;
mod plugin;
mod resolve;
mod rewrite;
mod scan;
mod split;
mod writer;

pub use config::{load_config, resolve_pathbuf, ChunkConfig, LoadedConfig};
pub use diagnostics::{warn, Warning, PLUGIN_NAME};
pub use entry::{Entry, EntryDescriptor, EntryMap, EntryValue, ImportSource};
pub use exclude::{EntrySource, Exclude};
pub use fs::{FileSystem, OsFileSystem};
pub use group::{parse_chunk_groups, ChunkGroup};
pub use layout::{chunk_entry_path, CHUNK_DEPTH, CHUNK_DIR};
pub use options::{ChunkOptions, Minify, Mode};
pub use plugin::{ApplyReport, EntryChunkPlugin};
pub use resolve::{EntryResolver, Enumerated, ResolvedSource};
pub use rewrite::rewrite_relative_specifiers;
pub use scan::{find_reexports, ReExport, ReExportMatcher};
pub use split::{collapse_blank_lines, processing_order, split_source, ChunkOutput, ClaimSet};
pub use writer::{register_chunk, write_chunk, WrittenChunk};
