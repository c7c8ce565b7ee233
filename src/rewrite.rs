use std::sync::LazyLock;

use regex::{Captures, Regex};

// Any single-quoted literal, not only import specifiers. Greedy: one match per line
// spans from the first quote to the last.
static QUOTED_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"'((\./)|(\.\./))?(.+)(';*)").expect("quoted path pattern is valid")
});

/// Prefix every quoted path-like literal with `depth` extra `../` segments.
/// A leading `./` is folded into the new prefix. Returns the text and the
/// number of literals rewritten.
pub fn rewrite_relative_specifiers(text: &str, depth: usize) -> (String, usize) {
    if depth == 0 {
        return (text.to_string(), 0);
    }
    let up = "../".repeat(depth);
    let mut count = 0usize;
    let out = QUOTED_PATH.replace_all(text, |caps: &Captures<'_>| {
        count += 1;
        let lead = match caps.get(1).map(|m| m.as_str()) {
            Some("../") => "../",
            _ => "",
        };
        format!("'{}{}{}{}", lead, up, &caps[4], &caps[5])
    });
    (out.into_owned(), count)
}
