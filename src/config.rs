use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config as cfg;
use serde::Deserialize;

use crate::group::ChunkGroup;
use crate::options::Minify;

/// The `[chunk]` table of an `entry-chunk.{toml,yaml,yml,json}` file.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct ChunkConfig {
    pub context: Option<String>,
    pub mode: Option<String>,
    pub min: Option<Minify>,
    pub groups: Option<Vec<ChunkGroup>>,
    pub exclude: Option<Vec<String>>,
    pub exclude_names: Option<Vec<String>>,
    pub entry: Option<serde_json::Value>,
    pub output: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
struct RootConfig {
    pub chunk: Option<ChunkConfig>,
}

pub struct LoadedConfig {
    pub cfg: ChunkConfig,
    pub dir: Option<PathBuf>,
}

pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(p) = explicit {
        return load_from_path(p);
    }
    let cwd = std::env::current_dir()?;
    let candidates = [
        "entry-chunk.toml",
        "entry-chunk.yaml",
        "entry-chunk.yml",
        "entry-chunk.json",
    ];
    for name in &candidates {
        let path = cwd.join(name);
        if path.is_file() {
            return load_from_path(&path);
        }
    }
    Ok(LoadedConfig {
        cfg: ChunkConfig::default(),
        dir: None,
    })
}

fn load_from_path(path: &Path) -> Result<LoadedConfig> {
    let builder = cfg::Config::builder().add_source(cfg::File::from(path));
    // Environment overlay: ENTRY_CHUNK_CHUNK__MODE=replace
    let builder = builder.add_source(
        cfg::Environment::with_prefix("ENTRY_CHUNK")
            .prefix_separator("_")
            .separator("__"),
    );
    let conf = builder.build()?;
    let root = conf
        .try_deserialize::<RootConfig>()
        .with_context(|| format!("failed to parse config at {}", path.display()))?;
    let mut cfg = root.chunk.unwrap_or_default();
    // `config` folds key case and loses table order; entry keys need both.
    if cfg.entry.is_some() {
        if let Some(raw) = read_entry_table(path)? {
            cfg.entry = Some(raw);
        }
    }
    let dir = path.parent().map(|p| p.to_path_buf());
    Ok(LoadedConfig { cfg, dir })
}

#[derive(Deserialize)]
struct RawRoot {
    chunk: Option<RawChunk>,
}

#[derive(Deserialize)]
struct RawChunk {
    entry: Option<serde_json::Value>,
}

fn read_entry_table(path: &Path) -> Result<Option<serde_json::Value>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let root: RawRoot = match ext.as_str() {
        "toml" => toml::from_str(&text)?,
        "yaml" | "yml" => serde_yaml::from_str(&text)?,
        "json" => serde_json::from_str(&text)?,
        other => return Err(anyhow::anyhow!("unsupported config format: {}", other)),
    };
    Ok(root.chunk.and_then(|c| c.entry))
}

pub fn resolve_pathbuf(base: Option<&Path>, value: &str) -> PathBuf {
    let p = Path::new(value);
    if p.is_absolute() {
        p.to_path_buf()
    } else if let Some(b) = base {
        b.join(p)
    } else {
        p.to_path_buf()
    }
}
