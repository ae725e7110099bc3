use thiserror::Error;

use crate::model::ExpansionReport;

/// Errors raised while turning sample expressions into concrete values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("no samples were generated for type '{name}'")]
    UnresolvedNamedType { name: String },
    #[error("sample references form a cycle: {}", chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },
}

/// Errors emitted by the generation crate outside of expansion diagnostics.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("unsupported manifest format: {0}")]
    UnsupportedFormat(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),
    #[error("expansion failed with {} diagnostic(s)", .0.diagnostics.len())]
    Failed(ExpansionReport),
}
