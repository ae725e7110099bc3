use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::DEFAULT_ITEM_COUNT;
use crate::declaration::Declaration;
use crate::request::{GenerationMode, GenerationRequest};

/// A unit of independent expansions, as read from a manifest file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Manifest {
    /// Values used by entries that do not set their own.
    #[serde(default)]
    pub defaults: ManifestDefaults,
    pub declarations: Vec<ManifestEntry>,
}

/// Manifest-wide request defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ManifestDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<GenerationMode>,
}

/// One declaration plus its optional request overrides.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ManifestEntry {
    #[serde(flatten)]
    pub declaration: Declaration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<GenerationMode>,
}

impl ManifestEntry {
    /// Resolve the request, entry values first, then manifest defaults.
    pub fn request(&self, defaults: &ManifestDefaults) -> GenerationRequest {
        GenerationRequest {
            item_count: self
                .item_count
                .or(defaults.item_count)
                .unwrap_or(DEFAULT_ITEM_COUNT),
            mode: self.mode.or(defaults.mode).unwrap_or_default(),
        }
    }
}
