use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::declaration::DeclarationKind;

/// Severity of an expansion diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Note => f.write_str("note"),
        }
    }
}

/// Reasons an expansion is refused or a candidate is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum DiagnosticError {
    #[error("sample generation can only be applied to structs and enums, not to a {kind}")]
    UnsupportedDeclarationKind { kind: DeclarationKind },
    #[error("'item_count' argument must be greater than zero (got {item_count})")]
    NonPositiveItemCount { item_count: i64 },
    #[error("'item_count' argument must be at most {max} (got {item_count})")]
    ItemCountTooLarge { item_count: i64, max: i64 },
    #[error("enum must contain at least one case")]
    EmptyVariantSet,
    #[error("stored field '{field}' needs an explicit type annotation")]
    MissingTypeAnnotation { field: String },
    #[error("constructor '{constructor}' takes '{parameter}', which is not an eligible field")]
    UnresolvedConstructorParameter {
        constructor: String,
        parameter: String,
    },
}

impl DiagnosticError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedDeclarationKind { .. } => "unsupported_declaration_kind",
            Self::NonPositiveItemCount { .. } => "non_positive_item_count",
            Self::ItemCountTooLarge { .. } => "item_count_too_large",
            Self::EmptyVariantSet => "empty_variant_set",
            Self::MissingTypeAnnotation { .. } => "missing_type_annotation",
            Self::UnresolvedConstructorParameter { .. } => "unresolved_constructor_parameter",
        }
    }

    /// Skipped constructors are reported but never fail an expansion.
    pub fn severity(&self) -> Severity {
        match self {
            Self::UnresolvedConstructorParameter { .. } => Severity::Note,
            _ => Severity::Error,
        }
    }

    pub fn fix_it(&self) -> Option<&'static str> {
        match self {
            Self::EmptyVariantSet => Some("add a new enum case"),
            Self::MissingTypeAnnotation { .. } => Some("add an explicit type annotation"),
            _ => None,
        }
    }
}

/// A diagnostic attached to the declaration that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{severity} in '{declaration}': {error}")]
pub struct Diagnostic {
    pub declaration: String,
    pub severity: Severity,
    pub error: DiagnosticError,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_it: Option<String>,
}

impl Diagnostic {
    pub fn new(declaration: impl Into<String>, error: DiagnosticError) -> Self {
        Self {
            declaration: declaration.into(),
            severity: error.severity(),
            fix_it: error.fix_it().map(str::to_string),
            error,
        }
    }

    pub fn code(&self) -> &'static str {
        self.error.code()
    }
}
