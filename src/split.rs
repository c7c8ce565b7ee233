use std::sync::LazyLock;

use anyhow::Result;
use indexmap::IndexMap;
use regex::Regex;

use crate::group::ChunkGroup;
use crate::scan::ReExportMatcher;

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank-line pattern is valid"));

/// Binding name -> name of the group that claimed it, for one source file.
#[derive(Debug, Default)]
pub struct ClaimSet {
    claims: IndexMap<String, String>,
}

impl ClaimSet {
    pub fn claim(&mut self, module: &str, group: &str) {
        self.claims
            .entry(module.to_string())
            .or_insert_with(|| group.to_string());
    }

    pub fn claimed_by(&self, module: &str) -> Option<&str> {
        self.claims.get(module).map(String::as_str)
    }

    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.claims.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkOutput<'g> {
    pub group: &'g ChunkGroup,
    pub text: String,
}

/// Named groups in configured order, then the first catch-all group.
pub fn processing_order(groups: &[ChunkGroup]) -> Vec<&ChunkGroup> {
    let mut order: Vec<&ChunkGroup> = groups.iter().filter(|g| !g.is_catch_all()).collect();
    if let Some(rest) = groups.iter().find(|g| g.is_catch_all()) {
        order.push(rest);
    }
    order
}

/// Split one source file's text into per-group chunk texts.
pub fn split_source<'g>(source: &str, groups: &'g [ChunkGroup]) -> Result<Vec<ChunkOutput<'g>>> {
    let mut claims = ClaimSet::default();
    let mut out = Vec::new();
    for group in processing_order(groups) {
        let text = if group.is_catch_all() {
            unclaimed_source(source, &claims)?
        } else {
            claim_modules(source, group, &mut claims)?
        };
        out.push(ChunkOutput { group, text });
    }
    Ok(out)
}

/// Statements for the group's modules, one per line, plus a trailing newline.
pub fn claim_modules(source: &str, group: &ChunkGroup, claims: &mut ClaimSet) -> Result<String> {
    let mut found: Vec<&str> = Vec::new();
    for module in &group.modules {
        let matcher = ReExportMatcher::new(module)?;
        if let Some(m) = matcher.find(source) {
            found.push(m.as_str());
            claims.claim(matcher.name(), &group.name);
        }
    }
    let mut text = found.join("\n");
    text.push('\n');
    Ok(text)
}

/// The source minus every claimed statement, blank-line runs collapsed.
pub fn unclaimed_source(source: &str, claims: &ClaimSet) -> Result<String> {
    let mut text = source.to_string();
    for module in claims.modules() {
        let matcher = ReExportMatcher::new(module)?;
        text = matcher.remove_first(&text).into_owned();
    }
    Ok(collapse_blank_lines(&text))
}

pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN.replace_all(text, "\n\n").into_owned()
}
