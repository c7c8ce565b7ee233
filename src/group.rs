use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A named partition of re-exported bindings. No `modules` means catch-all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkGroup {
    pub name: String,
    #[serde(default)]
    pub modules: Vec<String>,
}

impl ChunkGroup {
    pub fn new<I, S>(name: impl Into<String>, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            modules: modules.into_iter().map(Into::into).collect(),
        }
    }

    pub fn catch_all(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modules: Vec::new(),
        }
    }

    pub fn is_catch_all(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Parse `--chunk` flags of the form `name=vendor,module=A,module=B` or
/// `name=vendor,modules=A|B`. A rule without modules is a catch-all.
pub fn parse_chunk_groups(flags: &[String]) -> Result<Vec<ChunkGroup>> {
    let mut out = Vec::new();
    for raw in flags {
        let mut name: Option<String> = None;
        let mut modules: Vec<String> = Vec::new();

        for part in raw.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let (k, v) = match part.split_once('=') {
                Some(kv) => kv,
                None => return Err(anyhow::anyhow!("expected key=value in chunk rule: {}", part)),
            };
            match k.trim() {
                "name" => name = Some(v.trim().to_string()),
                "module" => modules.push(v.trim().to_string()),
                "modules" => modules.extend(
                    v.split('|')
                        .map(str::trim)
                        .filter(|m| !m.is_empty())
                        .map(str::to_string),
                ),
                other => return Err(anyhow::anyhow!("unknown chunk rule key: {}", other)),
            }
        }

        let name = name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| anyhow::anyhow!("chunk rule requires 'name=': {}", raw))?;
        out.push(ChunkGroup { name, modules });
    }
    Ok(out)
}
