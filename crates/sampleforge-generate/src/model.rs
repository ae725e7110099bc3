use std::collections::BTreeMap;

use serde::Serialize;

use sampleforge_core::{CategoryTag, DeclarationKind, Diagnostic, GenerationMode, TypeDescriptor};

use crate::errors::GenerationError;
use crate::expr::ValueExpression;

/// A stored field eligible for synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSlot {
    pub name: String,
    pub descriptor: TypeDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryTag>,
}

/// A constructor a synthesized item can call.
///
/// `name` is `None` for the implicit memberwise constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructorCandidate {
    pub name: Option<String>,
    pub parameter_names: Vec<String>,
    pub parameter_types: BTreeMap<String, TypeDescriptor>,
}

impl ConstructorCandidate {
    /// Memberwise constructor over `fields`, in declaration order.
    pub fn implicit(fields: &[FieldSlot]) -> Self {
        Self {
            name: None,
            parameter_names: fields.iter().map(|field| field.name.clone()).collect(),
            parameter_types: fields
                .iter()
                .map(|field| (field.name.clone(), field.descriptor.clone()))
                .collect(),
        }
    }

    pub fn is_implicit(&self) -> bool {
        self.name.is_none()
    }

    pub fn arity(&self) -> usize {
        self.parameter_names.len()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<memberwise>")
    }
}

/// One payload slot of a variant, with its resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadBinding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub descriptor: TypeDescriptor,
}

/// A sum-type variant ready for expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantSlot {
    pub tag: String,
    pub payload: Vec<PayloadBinding>,
}

/// The static sample accessor generated for one declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedAccessor {
    pub declaration: String,
    pub kind: DeclarationKind,
    pub mode: GenerationMode,
    pub items: Vec<ValueExpression>,
}

impl GeneratedAccessor {
    /// Types whose samples this accessor refers to, first occurrence order.
    pub fn dependencies(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for item in &self.items {
            for name in item.sample_references() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// Outcome of expanding a whole manifest.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExpansionReport {
    pub accessors: Vec<GeneratedAccessor>,
    pub diagnostics: Vec<Diagnostic>,
    pub notes: Vec<Diagnostic>,
    pub counts_by_code: BTreeMap<String, u64>,
}

impl ExpansionReport {
    pub fn record_accessor(&mut self, accessor: GeneratedAccessor) {
        self.accessors.push(accessor);
    }

    pub fn record_diagnostic(&mut self, diagnostic: Diagnostic) {
        *self
            .counts_by_code
            .entry(diagnostic.code().to_string())
            .or_insert(0) += 1;
        self.diagnostics.push(diagnostic);
    }

    pub fn record_note(&mut self, note: Diagnostic) {
        *self
            .counts_by_code
            .entry(note.code().to_string())
            .or_insert(0) += 1;
        self.notes.push(note);
    }

    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Convert into an error when any expansion was refused.
    pub fn into_result(self) -> Result<Self, GenerationError> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(GenerationError::Failed(self))
        }
    }
}
