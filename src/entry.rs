use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One item of an entry's `import` list. Anything but a string is kept
/// verbatim so it survives a round trip and can be reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImportSource {
    Path(String),
    Other(Value),
}

impl ImportSource {
    pub fn as_path(&self) -> Option<&str> {
        match self {
            ImportSource::Path(p) => Some(p),
            ImportSource::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDescriptor {
    #[serde(default)]
    pub import: Vec<ImportSource>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryValue {
    Path(String),
    Descriptor(EntryDescriptor),
    Other(Value),
}

impl EntryValue {
    /// Entry pointing at a single generated file.
    pub fn import(path: &Path) -> Self {
        EntryValue::Descriptor(EntryDescriptor {
            import: vec![ImportSource::Path(path.to_string_lossy().into_owned())],
            extra: Map::new(),
        })
    }

    /// Both accepted shapes normalised to an import list.
    pub fn import_list(&self) -> Vec<ImportSource> {
        match self {
            EntryValue::Path(p) => vec![ImportSource::Path(p.clone())],
            EntryValue::Descriptor(d) => d.import.clone(),
            EntryValue::Other(v) => vec![ImportSource::Other(v.clone())],
        }
    }
}

pub type EntryMap = IndexMap<String, EntryValue>;

/// The bundler's `entry` option. Anything that is not an object is `Invalid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Map(EntryMap),
    Invalid(Value),
}

impl Entry {
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value::<EntryMap>(value.clone()) {
            Ok(map) => Entry::Map(map),
            Err(_) => Entry::Invalid(value),
        }
    }

    pub fn as_map(&self) -> Option<&EntryMap> {
        match self {
            Entry::Map(m) => Some(m),
            Entry::Invalid(_) => None,
        }
    }
}

impl From<EntryMap> for Entry {
    fn from(map: EntryMap) -> Self {
        Entry::Map(map)
    }
}
