use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use glob::Pattern;

/// The `{ name, path }` pair handed to exclusion rules, before path resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntrySource<'a> {
    pub name: &'a str,
    pub path: &'a str,
}

type Predicate = Arc<dyn Fn(&EntrySource<'_>) -> bool + Send + Sync>;

/// Decides which entry sources are left alone. Empty means nothing is excluded.
#[derive(Clone, Default)]
pub struct Exclude {
    names: Vec<String>,
    patterns: Vec<Pattern>,
    predicate: Option<Predicate>,
}

impl Exclude {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Glob patterns tested against the path as written in the entry config.
    pub fn with_patterns(mut self, patterns: &[String]) -> Result<Self> {
        for p in patterns {
            let pat = Pattern::new(p).with_context(|| format!("bad exclude pattern: {}", p))?;
            self.patterns.push(pat);
        }
        Ok(self)
    }

    pub fn with_predicate<F>(mut self, f: F) -> Self
    where
        F: Fn(&EntrySource<'_>) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(f));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.patterns.is_empty() && self.predicate.is_none()
    }

    pub fn matches(&self, source: &EntrySource<'_>) -> bool {
        if self.names.iter().any(|n| n == source.name) {
            return true;
        }
        let p = source.path.replace('\\', "/");
        if self.patterns.iter().any(|pat| pat.matches(&p)) {
            return true;
        }
        match &self.predicate {
            Some(f) => f(source),
            None => false,
        }
    }
}

impl fmt::Debug for Exclude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exclude")
            .field("names", &self.names)
            .field(
                "patterns",
                &self.patterns.iter().map(Pattern::as_str).collect::<Vec<_>>(),
            )
            .field("predicate", &self.predicate.is_some())
            .finish()
    }
}
