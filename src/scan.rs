use std::borrow::Cow;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::{Match, Regex};

static ANY_REEXPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+\{\s*default\s+as\s+([^\s{}]+)\s*\}\s+from\s+'(.+)';*")
        .expect("re-export pattern is valid")
});

/// A recognised `export { default as <name> } from '<specifier>';` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReExport {
    pub name: String,
    pub specifier: String,
    pub text: String,
    pub line: usize,
    pub col: usize,
}

/// Matches the re-export statement for one binding name, taken literally.
#[derive(Debug, Clone)]
pub struct ReExportMatcher {
    name: String,
    re: Regex,
}

impl ReExportMatcher {
    pub fn new(name: &str) -> Result<Self> {
        let pattern = format!(
            r"export\s+\{{\s*default\s+as\s+{}\s*\}}\s+from\s+'\.?(.+)';*",
            regex::escape(name)
        );
        let re = Regex::new(&pattern)
            .with_context(|| format!("failed to build matcher for module: {}", name))?;
        Ok(Self {
            name: name.to_string(),
            re,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// First statement for this name, if any.
    pub fn find<'s>(&self, source: &'s str) -> Option<Match<'s>> {
        self.re.find(source)
    }

    /// Source with the first statement for this name cut out.
    pub fn remove_first<'s>(&self, source: &'s str) -> Cow<'s, str> {
        self.re.replacen(source, 1, "")
    }
}

/// Every recognised re-export in `source`, in text order.
pub fn find_reexports(source: &str) -> Vec<ReExport> {
    ANY_REEXPORT
        .captures_iter(source)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let (line, col) = line_col(source, whole.start());
            Some(ReExport {
                name: caps.get(1)?.as_str().to_string(),
                specifier: caps.get(2)?.as_str().to_string(),
                text: whole.as_str().to_string(),
                line,
                col,
            })
        })
        .collect()
}

fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}
