use sampleforge_core::{Declaration, GenerationRequest, MAX_ITEM_COUNT};

use crate::expr::{Argument, ValueExpression};
use crate::model::{PayloadBinding, VariantSlot};
use crate::resolver::resolve;
use crate::synth::synthesize;

/// Variants of a sum declaration with resolved payload types.
pub fn variant_slots(declaration: &Declaration) -> Vec<VariantSlot> {
    declaration
        .variants
        .iter()
        .map(|variant| VariantSlot {
            tag: variant.tag.clone(),
            payload: variant
                .payload
                .iter()
                .map(|slot| PayloadBinding {
                    label: slot.label.clone(),
                    descriptor: resolve(&slot.type_annotation),
                })
                .collect(),
        })
        .collect()
}

/// Fill the item budget by cycling through `variants` in order.
///
/// The item at position `p` (1-based) uses variant `(p - 1) % len` and, in
/// deterministic mode, index `p`. Returns an empty list when there are no
/// variants or the count is outside `1..=MAX_ITEM_COUNT`; the validation
/// gate reports those cases.
pub fn expand(variants: &[VariantSlot], request: &GenerationRequest) -> Vec<ValueExpression> {
    if request.item_count > MAX_ITEM_COUNT {
        return Vec::new();
    }
    let Ok(count) = usize::try_from(request.item_count) else {
        return Vec::new();
    };

    variants
        .iter()
        .cycle()
        .take(count)
        .enumerate()
        .map(|(offset, variant)| {
            let mode = request.mode.for_item(offset + 1);
            let arguments = variant
                .payload
                .iter()
                .map(|binding| Argument {
                    label: binding.label.clone(),
                    value: synthesize(&binding.descriptor, None, mode),
                })
                .collect();
            ValueExpression::Variant {
                tag: variant.tag.clone(),
                arguments,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use sampleforge_core::{ItemMode, PayloadSlot, Variant};

    use super::*;

    fn tags(items: &[ValueExpression]) -> Vec<&str> {
        items
            .iter()
            .map(|item| match item {
                ValueExpression::Variant { tag, .. } => tag.as_str(),
                other => panic!("expected a variant, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn cycles_variants_round_robin() {
        let declaration = Declaration::sum(
            "Letter",
            vec![
                Variant::unit("a"),
                Variant::tuple("b", &["Int"]),
                Variant::unit("c"),
            ],
        );
        let items = expand(
            &variant_slots(&declaration),
            &GenerationRequest::deterministic(6),
        );
        assert_eq!(tags(&items), vec!["a", "b", "c", "a", "b", "c"]);
    }

    #[test]
    fn uneven_budget_stops_mid_cycle() {
        let declaration = Declaration::sum(
            "Case",
            vec![
                Variant::unit("case1"),
                Variant::unit("case2"),
                Variant::unit("case3"),
            ],
        );
        let items = expand(
            &variant_slots(&declaration),
            &GenerationRequest::deterministic(5),
        );
        assert_eq!(tags(&items), vec!["case1", "case2", "case3", "case1", "case2"]);
    }

    #[test]
    fn payload_labels_survive_and_index_is_global() {
        let declaration = Declaration::sum(
            "Response",
            vec![
                Variant::unit("idle"),
                Variant {
                    tag: "response".to_string(),
                    payload: vec![
                        PayloadSlot::labeled("time", "Date"),
                        PayloadSlot::labeled("name", "String"),
                        PayloadSlot::unlabeled("Data"),
                    ],
                },
            ],
        );
        let items = expand(
            &variant_slots(&declaration),
            &GenerationRequest::deterministic(4),
        );

        let ValueExpression::Variant { arguments, .. } = &items[3] else {
            panic!("expected a variant");
        };
        let labels: Vec<_> = arguments.iter().map(|arg| arg.label.as_deref()).collect();
        assert_eq!(labels, vec![Some("time"), Some("name"), None]);
        assert!(
            items[3]
                .provider_calls()
                .iter()
                .all(|call| call.mode == ItemMode::Deterministic(4))
        );
    }

    #[test]
    fn random_mode_attaches_no_index() {
        let declaration = Declaration::sum("Flag", vec![Variant::tuple("on", &["Int"])]);
        let items = expand(&variant_slots(&declaration), &GenerationRequest::random(2));
        assert_eq!(items.len(), 2);
        assert!(
            items
                .iter()
                .flat_map(|item| item.provider_calls())
                .all(|call| call.mode == ItemMode::Random)
        );
    }

    #[test]
    fn non_positive_count_yields_nothing() {
        let declaration = Declaration::sum("Flag", vec![Variant::unit("on")]);
        let slots = variant_slots(&declaration);
        assert!(expand(&slots, &GenerationRequest::deterministic(0)).is_empty());
        assert!(expand(&slots, &GenerationRequest::deterministic(-3)).is_empty());
        assert!(expand(&slots, &GenerationRequest::deterministic(i64::MAX)).is_empty());
    }
}
