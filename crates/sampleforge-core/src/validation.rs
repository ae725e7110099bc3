use crate::MAX_ITEM_COUNT;
use crate::declaration::{Declaration, DeclarationKind, Storage};
use crate::diagnostic::DiagnosticError;
use crate::request::GenerationRequest;

/// Check declaration-shape and argument preconditions.
///
/// Rules are checked in order: declaration kind, item count bounds, then
/// the variant count of sum types.
pub fn validate(
    kind: DeclarationKind,
    item_count: i64,
    variant_count: usize,
) -> Result<(), DiagnosticError> {
    if !kind.is_product() && !kind.is_sum() {
        return Err(DiagnosticError::UnsupportedDeclarationKind { kind });
    }

    if item_count <= 0 {
        return Err(DiagnosticError::NonPositiveItemCount { item_count });
    }

    if item_count > MAX_ITEM_COUNT {
        return Err(DiagnosticError::ItemCountTooLarge {
            item_count,
            max: MAX_ITEM_COUNT,
        });
    }

    if kind.is_sum() && variant_count == 0 {
        return Err(DiagnosticError::EmptyVariantSet);
    }

    Ok(())
}

/// Every plain stored instance field must spell out its type.
pub fn validate_members(declaration: &Declaration) -> Result<(), DiagnosticError> {
    for member in &declaration.members {
        if member.is_static || member.storage != Storage::Stored {
            continue;
        }
        let annotated = member
            .type_annotation
            .as_deref()
            .is_some_and(|ty| !ty.trim().is_empty());
        if !annotated {
            return Err(DiagnosticError::MissingTypeAnnotation {
                field: member.name.clone(),
            });
        }
    }
    Ok(())
}

/// Run every gate rule for one declaration and request.
pub fn validate_declaration(
    declaration: &Declaration,
    request: &GenerationRequest,
) -> Result<(), DiagnosticError> {
    validate(
        declaration.kind,
        request.item_count,
        declaration.variants.len(),
    )?;
    if declaration.kind.is_product() {
        validate_members(declaration)?;
    }
    Ok(())
}
