use std::path::Path;

use tracing::debug;

use sampleforge_core::Manifest;

use crate::errors::GenerationError;

/// Supported manifest encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Json,
}

impl ManifestFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, GenerationError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(GenerationError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Read and parse a manifest file, TOML or JSON by extension.
pub fn load_manifest(path: &Path) -> Result<Manifest, GenerationError> {
    let format = ManifestFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    let manifest = parse_manifest(&text, format)?;
    debug!(
        path = %path.display(),
        declarations = manifest.declarations.len(),
        "manifest loaded"
    );
    Ok(manifest)
}

pub fn parse_manifest(text: &str, format: ManifestFormat) -> Result<Manifest, GenerationError> {
    let manifest = match format {
        ManifestFormat::Toml => toml::from_str(text)?,
        ManifestFormat::Json => serde_json::from_str(text)?,
    };
    Ok(manifest)
}
