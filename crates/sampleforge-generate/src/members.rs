use std::collections::HashSet;

use tracing::debug;

use sampleforge_core::{Declaration, Member, Storage};

use crate::model::FieldSlot;
use crate::resolver::resolve;

/// Ordered fields of a product declaration that can receive sample values.
///
/// Static members, computed members and members with observers are
/// skipped, as are members without a type annotation (the validation gate
/// reports those). The first occurrence of a name wins.
pub fn extract(declaration: &Declaration) -> Vec<FieldSlot> {
    let mut seen = HashSet::new();
    let mut slots = Vec::new();

    for member in &declaration.members {
        let Some(type_annotation) = eligible_type(member) else {
            debug!(
                declaration = %declaration.name,
                member = %member.name,
                "member skipped"
            );
            continue;
        };
        if !seen.insert(member.name.as_str()) {
            continue;
        }
        slots.push(FieldSlot {
            name: member.name.clone(),
            descriptor: resolve(type_annotation),
            category: member.category.clone(),
        });
    }

    slots
}

/// Type annotation of a plain stored instance field.
pub fn eligible_type(member: &Member) -> Option<&str> {
    if member.is_static || member.storage != Storage::Stored {
        return None;
    }
    member
        .type_annotation
        .as_deref()
        .map(str::trim)
        .filter(|ty| !ty.is_empty())
}
