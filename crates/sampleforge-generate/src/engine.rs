use std::time::Instant;

use tracing::{debug, info, warn};

use sampleforge_core::{
    Declaration, Diagnostic, GenerationRequest, Manifest, validate_declaration,
};

use crate::expr::ValueExpression;
use crate::initializer::{candidates, select};
use crate::members::extract;
use crate::model::{ExpansionReport, GeneratedAccessor};
use crate::synth::construct;
use crate::variants::{expand as expand_variants, variant_slots};

/// Successful expansion of one declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    pub accessor: GeneratedAccessor,
    /// Constructors skipped while choosing the target, as notes.
    pub notes: Vec<Diagnostic>,
}

/// Runs the sample pipeline for declarations handed over by a host.
///
/// The engine holds no state; every call is a pure function of its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpansionEngine;

impl ExpansionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Expand one declaration into its sample accessor.
    pub fn expand(
        &self,
        declaration: &Declaration,
        request: &GenerationRequest,
    ) -> Result<Expansion, Diagnostic> {
        validate_declaration(declaration, request)
            .map_err(|error| Diagnostic::new(&declaration.name, error))?;

        // Validation bounds the count to 1..=MAX_ITEM_COUNT.
        let count = usize::try_from(request.item_count).unwrap_or_default();
        let mut notes = Vec::new();

        let items: Vec<ValueExpression> = if declaration.kind.is_sum() {
            expand_variants(&variant_slots(declaration), request)
        } else {
            let fields = extract(declaration);
            let selection = select(&candidates(declaration), &fields);
            notes.extend(
                selection
                    .rejected
                    .into_iter()
                    .map(|error| Diagnostic::new(&declaration.name, error)),
            );
            debug!(
                declaration = %declaration.name,
                constructor = selection.constructor.display_name(),
                fields = fields.len(),
                "constructor selected"
            );
            (1..=count)
                .map(|index| {
                    construct(
                        &selection.constructor,
                        &fields,
                        request.mode.for_item(index),
                    )
                })
                .collect()
        };

        Ok(Expansion {
            accessor: GeneratedAccessor {
                declaration: declaration.name.clone(),
                kind: declaration.kind,
                mode: request.mode,
                items,
            },
            notes,
        })
    }

    /// Expand every manifest entry; failures never stop sibling entries.
    pub fn expand_all(&self, manifest: &Manifest) -> ExpansionReport {
        let start = Instant::now();
        let mut report = ExpansionReport::default();

        info!(
            declarations = manifest.declarations.len(),
            "expansion started"
        );

        for entry in &manifest.declarations {
            let request = entry.request(&manifest.defaults);
            match self.expand(&entry.declaration, &request) {
                Ok(expansion) => {
                    info!(
                        declaration = %entry.declaration.name,
                        kind = %entry.declaration.kind,
                        items = expansion.accessor.items.len(),
                        mode = %request.mode,
                        "declaration expanded"
                    );
                    for note in expansion.notes {
                        debug!(
                            declaration = %note.declaration,
                            code = note.code(),
                            "{}",
                            note.error
                        );
                        report.record_note(note);
                    }
                    report.record_accessor(expansion.accessor);
                }
                Err(diagnostic) => {
                    warn!(
                        declaration = %diagnostic.declaration,
                        code = diagnostic.code(),
                        "{}",
                        diagnostic.error
                    );
                    report.record_diagnostic(diagnostic);
                }
            }
        }

        info!(
            accessors = report.accessors.len(),
            diagnostics = report.diagnostics.len(),
            notes = report.notes.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "expansion finished"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use sampleforge_core::{
        DeclarationKind, DiagnosticError, ItemMode, Member, ScalarKind, Variant,
    };

    use super::*;

    fn point() -> Declaration {
        Declaration::product(
            "Point",
            vec![Member::stored("x", "Int"), Member::stored("y", "String")],
        )
    }

    #[test]
    fn product_items_are_indexed_from_one() {
        let expansion = ExpansionEngine::new()
            .expand(&point(), &GenerationRequest::deterministic(3))
            .expect("expand");

        let items = &expansion.accessor.items;
        assert_eq!(items.len(), 3);
        for (position, item) in items.iter().enumerate() {
            let calls = item.provider_calls();
            assert_eq!(calls.len(), 2);
            assert_eq!(calls[0].kind, ScalarKind::Int);
            assert_eq!(calls[1].kind, ScalarKind::String);
            assert!(
                calls
                    .iter()
                    .all(|call| call.mode == ItemMode::Deterministic(position + 1))
            );
        }
    }

    #[test]
    fn refusals_carry_the_declaration_name() {
        let engine = ExpansionEngine::new();

        let error = engine
            .expand(&point(), &GenerationRequest::deterministic(0))
            .expect_err("zero items");
        assert_eq!(error.declaration, "Point");
        assert_eq!(
            error.error,
            DiagnosticError::NonPositiveItemCount { item_count: 0 }
        );

        let empty = Declaration::sum("Nothing", Vec::new());
        let error = engine
            .expand(&empty, &GenerationRequest::deterministic(2))
            .expect_err("no variants");
        assert_eq!(error.error, DiagnosticError::EmptyVariantSet);
        assert_eq!(error.fix_it.as_deref(), Some("add a new enum case"));

        for count in [i64::MAX, sampleforge_core::MAX_ITEM_COUNT + 1] {
            let error = engine
                .expand(&point(), &GenerationRequest::deterministic(count))
                .expect_err("too many items");
            assert_eq!(error.code(), "item_count_too_large");
            let flag = Declaration::sum("Flag", vec![Variant::unit("on")]);
            let error = engine
                .expand(&flag, &GenerationRequest::random(count))
                .expect_err("too many items");
            assert_eq!(error.code(), "item_count_too_large");
        }

        let mut class = point();
        class.kind = DeclarationKind::Class;
        let error = engine
            .expand(&class, &GenerationRequest::deterministic(2))
            .expect_err("class");
        assert_eq!(error.code(), "unsupported_declaration_kind");
    }

    #[test]
    fn sum_expansion_has_no_notes() {
        let declaration =
            Declaration::sum("Toggle", vec![Variant::unit("on"), Variant::unit("off")]);
        let expansion = ExpansionEngine::new()
            .expand(&declaration, &GenerationRequest::random(3))
            .expect("expand");
        assert_eq!(expansion.accessor.items.len(), 3);
        assert!(expansion.notes.is_empty());
    }
}
