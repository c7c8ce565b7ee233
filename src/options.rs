use std::str::FromStr;

use clap::ValueEnum;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::diagnostics::Warning;
use crate::exclude::Exclude;
use crate::group::ChunkGroup;

/// How generated chunks are registered back into the entry map.
#[derive(Copy, Clone, Debug, Default, ValueEnum, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mode {
    /// Keep the original entries and add one entry per chunk.
    #[default]
    Add,
    /// Drop every original entry; only chunk entries remain.
    Replace,
    /// Write chunk files but never register them.
    #[value(name = "none")]
    Off,
}

impl Mode {
    pub fn registers(self) -> bool {
        !matches!(self, Mode::Off)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Add => "add",
            Mode::Replace => "replace",
            Mode::Off => "",
        }
    }
}

impl FromStr for Mode {
    type Err = Warning;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Mode::Add),
            "replace" => Ok(Mode::Replace),
            "" => Ok(Mode::Off),
            other => Err(Warning::InvalidMode(other.to_string())),
        }
    }
}

impl TryFrom<String> for Mode {
    type Error = Warning;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.as_str().to_string()
    }
}

/// Whether a `<name>.min` entry is registered next to each chunk entry.
///
/// Accepts `true`/`false` or the string `"both"`. The plain entry is always
/// registered, so `On` and `Both` register the same keys.
#[derive(Copy, Clone, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum Minify {
    #[default]
    Off,
    On,
    Both,
}

impl Minify {
    pub fn enabled(self) -> bool {
        !matches!(self, Minify::Off)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MinifyRepr {
    Flag(bool),
    Named(String),
}

impl<'de> Deserialize<'de> for Minify {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match MinifyRepr::deserialize(deserializer)? {
            MinifyRepr::Flag(true) => Ok(Minify::On),
            MinifyRepr::Flag(false) => Ok(Minify::Off),
            MinifyRepr::Named(s) => match s.trim().to_ascii_lowercase().as_str() {
                "both" => Ok(Minify::Both),
                "true" | "on" => Ok(Minify::On),
                "false" | "off" | "" => Ok(Minify::Off),
                other => Err(de::Error::custom(format!(
                    "min should be a boolean or \"both\", got {other:?}"
                ))),
            },
        }
    }
}

impl From<bool> for Minify {
    fn from(value: bool) -> Self {
        if value {
            Minify::On
        } else {
            Minify::Off
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChunkOptions {
    pub mode: Mode,
    pub min: Minify,
    pub chunk_config: Vec<ChunkGroup>,
    pub exclude: Exclude,
}

impl ChunkOptions {
    pub fn new(chunk_config: Vec<ChunkGroup>) -> Self {
        Self {
            chunk_config,
            ..Default::default()
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_min(mut self, min: impl Into<Minify>) -> Self {
        self.min = min.into();
        self
    }

    pub fn with_exclude(mut self, exclude: Exclude) -> Self {
        self.exclude = exclude;
        self
    }

    /// Guards that abort a whole `apply` call without side effects.
    pub fn validate(&self) -> Result<(), Warning> {
        if self.chunk_config.is_empty() {
            return Err(Warning::EmptyChunkConfig);
        }
        Ok(())
    }

    /// Catch-all groups after the first; they never receive output.
    pub fn ignored_catch_alls(&self) -> Vec<Warning> {
        let mut catch_alls = self.chunk_config.iter().filter(|g| g.is_catch_all());
        let Some(kept) = catch_alls.next() else {
            return Vec::new();
        };
        catch_alls
            .map(|g| Warning::ExtraCatchAll {
                ignored: g.name.clone(),
                kept: kept.name.clone(),
            })
            .collect()
    }
}
