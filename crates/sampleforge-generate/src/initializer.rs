use std::collections::BTreeMap;

use tracing::debug;

use sampleforge_core::{Declaration, DiagnosticError};

use crate::model::{ConstructorCandidate, FieldSlot};
use crate::resolver::resolve;

/// Constructor chosen for a product type, plus the candidates passed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub constructor: ConstructorCandidate,
    pub rejected: Vec<DiagnosticError>,
}

/// Explicit constructors of a declaration, in declaration order.
pub fn candidates(declaration: &Declaration) -> Vec<ConstructorCandidate> {
    declaration
        .initializers
        .iter()
        .map(|initializer| {
            let mut parameter_types = BTreeMap::new();
            for parameter in &initializer.parameters {
                parameter_types
                    .entry(parameter.name.clone())
                    .or_insert_with(|| resolve(&parameter.type_annotation));
            }
            ConstructorCandidate {
                name: Some(initializer.name.clone()),
                parameter_names: initializer
                    .parameters
                    .iter()
                    .map(|parameter| parameter.name.clone())
                    .collect(),
                parameter_types,
            }
        })
        .collect()
}

/// Choose the constructor a synthesized item targets.
///
/// Without explicit constructors the memberwise one over `available` is
/// used. Otherwise the satisfiable candidate with the most parameters
/// wins, earlier declarations breaking ties. A candidate naming a
/// parameter that is not an available field is skipped and reported.
pub fn select(candidates: &[ConstructorCandidate], available: &[FieldSlot]) -> Selection {
    let mut best: Option<&ConstructorCandidate> = None;
    let mut rejected = Vec::new();

    for candidate in candidates {
        let missing = candidate
            .parameter_names
            .iter()
            .find(|parameter| !available.iter().any(|field| &field.name == *parameter));

        if let Some(parameter) = missing {
            debug!(
                constructor = candidate.display_name(),
                parameter = %parameter,
                "constructor skipped"
            );
            rejected.push(DiagnosticError::UnresolvedConstructorParameter {
                constructor: candidate.display_name().to_string(),
                parameter: parameter.clone(),
            });
            continue;
        }

        if best.is_none_or(|current| candidate.arity() > current.arity()) {
            best = Some(candidate);
        }
    }

    let constructor = match best {
        Some(candidate) => candidate.clone(),
        None => ConstructorCandidate::implicit(available),
    };

    Selection {
        constructor,
        rejected,
    }
}
