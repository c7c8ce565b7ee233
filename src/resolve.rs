use std::collections::HashSet;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::entry::EntryMap;
use crate::exclude::{EntrySource, Exclude};

/// A source file selected for splitting, with the entry key it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    pub entry: String,
    pub path: PathBuf,
}

#[derive(Debug, Default)]
pub struct Enumerated {
    pub sources: Vec<ResolvedSource>,
    pub skipped_non_string: bool,
}

/// Resolves entry paths against the bundler context, once per absolute path.
pub struct EntryResolver {
    context: PathBuf,
    seen: HashSet<PathBuf>,
}

impl EntryResolver {
    pub fn new(context: impl Into<PathBuf>) -> Self {
        Self {
            context: context.into(),
            seen: HashSet::new(),
        }
    }

    pub fn absolutize(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.clean()
        } else {
            self.context.join(p).clean()
        }
    }

    /// True the first time an absolute path is seen.
    pub fn mark_resolved(&mut self, path: &Path) -> bool {
        self.seen.insert(path.to_path_buf())
    }

    pub fn resolved_count(&self) -> usize {
        self.seen.len()
    }

    /// Walk `entries` in order and collect every source that should be split.
    pub fn enumerate(&mut self, entries: &EntryMap, exclude: &Exclude) -> Enumerated {
        let mut out = Enumerated::default();
        for (name, value) in entries {
            for candidate in value.import_list() {
                let Some(path) = candidate.as_path() else {
                    out.skipped_non_string = true;
                    continue;
                };
                if exclude.matches(&EntrySource { name, path }) {
                    tracing::debug!(entry = %name, path, "excluded");
                    continue;
                }
                let abs = self.absolutize(path);
                if !self.mark_resolved(&abs) {
                    continue;
                }
                out.sources.push(ResolvedSource {
                    entry: name.clone(),
                    path: abs,
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;
    use serde_json::json;

    fn map(v: serde_json::Value) -> EntryMap {
        match Entry::from_value(v) {
            Entry::Map(m) => m,
            Entry::Invalid(v) => panic!("not an entry map: {v}"),
        }
    }

    #[test]
    fn relative_paths_resolve_against_context() {
        let r = EntryResolver::new("/app");
        assert_eq!(r.absolutize("./src/index.js"), PathBuf::from("/app/src/index.js"));
        assert_eq!(r.absolutize("src/../lib/a.js"), PathBuf::from("/app/lib/a.js"));
        assert_eq!(r.absolutize("/abs/b.js"), PathBuf::from("/abs/b.js"));
    }

    #[test]
    fn equivalent_spellings_are_deduplicated() {
        let entries = map(json!({
            "a": "./src/index.js",
            "b": { "import": ["src/index.js", "/app/src/./index.js", "./src/other.js"] },
        }));
        let mut r = EntryResolver::new("/app");
        let found = r.enumerate(&entries, &Exclude::none());
        let paths: Vec<_> = found.sources.iter().map(|s| s.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/app/src/index.js"),
                PathBuf::from("/app/src/other.js")
            ]
        );
        assert_eq!(found.sources[0].entry, "a");
        assert_eq!(r.resolved_count(), 2);
    }

    #[test]
    fn non_string_candidates_are_flagged_and_skipped() {
        let entries = map(json!({ "a": { "import": [1, null] }, "b": 7 }));
        let mut r = EntryResolver::new("/app");
        let found = r.enumerate(&entries, &Exclude::none());
        assert!(found.sources.is_empty());
        assert!(found.skipped_non_string);
    }

    #[test]
    fn excluded_paths_are_not_marked_resolved() {
        let entries = map(json!({ "a": "./a.js", "b": "./a.js" }));
        let exclude = Exclude::none().with_names(["a"]);
        let mut r = EntryResolver::new("/app");
        let found = r.enumerate(&entries, &exclude);
        assert_eq!(found.sources.len(), 1);
        assert_eq!(found.sources[0].entry, "b");
    }
}
