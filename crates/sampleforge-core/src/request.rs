use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How sample values are drawn for a whole expansion.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Values derive from the 1-based item index and are reproducible.
    #[default]
    #[serde(alias = "default")]
    Deterministic,
    /// Values are drawn independently from a random source.
    Random,
}

impl GenerationMode {
    /// Mode handed to the synthesizer for the item at `index` (1-based).
    pub fn for_item(self, index: usize) -> ItemMode {
        match self {
            Self::Deterministic => ItemMode::Deterministic(index),
            Self::Random => ItemMode::Random,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deterministic => "deterministic",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-item generation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", content = "index", rename_all = "snake_case")]
pub enum ItemMode {
    Deterministic(usize),
    Random,
}

impl ItemMode {
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Deterministic(index) => Some(index),
            Self::Random => None,
        }
    }
}

/// Item budget and mode for one expansion.
///
/// The count is kept as written by the host; the validation gate rejects
/// non-positive values before any synthesis happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GenerationRequest {
    pub item_count: i64,
    #[serde(default)]
    pub mode: GenerationMode,
}

impl GenerationRequest {
    pub fn new(item_count: i64, mode: GenerationMode) -> Self {
        Self { item_count, mode }
    }

    pub fn deterministic(item_count: i64) -> Self {
        Self::new(item_count, GenerationMode::Deterministic)
    }

    pub fn random(item_count: i64) -> Self {
        Self::new(item_count, GenerationMode::Random)
    }
}
