use owo_colors::OwoColorize;
use thiserror::Error;

pub const PLUGIN_NAME: &str = "EntryChunkWebpackPlugin";

/// Non-fatal problems. Each one is printed once and never aborts the host build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    #[error("options.chunkConfig should not be empty.")]
    EmptyChunkConfig,
    #[error("options.mode should be 'add' or 'replace' or ''. Its default value is 'add'. (got {0:?})")]
    InvalidMode(String),
    #[error("Webpack configuration.entry should be object {{ <key>: non-empty string }}")]
    MalformedEntry,
    #[error("chunk group '{ignored}' is a second catch-all group and is ignored; unclaimed modules go to '{kept}'.")]
    ExtraCatchAll { ignored: String, kept: String },
}

/// Print a plugin-prefixed warning line to stderr and emit it as a `WARN` event.
pub fn warn(warning: &Warning) {
    tracing::warn!("[{PLUGIN_NAME}] {warning}");
    eprintln!("{}", format!("[{PLUGIN_NAME}] {warning}").yellow());
}
