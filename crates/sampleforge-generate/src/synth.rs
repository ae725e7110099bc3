use sampleforge_core::{CategoryTag, ItemMode, TypeDescriptor};

use crate::expr::{Argument, ProviderCall, ValueExpression};
use crate::model::{ConstructorCandidate, FieldSlot};

/// Build the value expression for one slot of one item.
///
/// Optional wrappers are looked through, containers get exactly one
/// element, and named types point at the first sample of that type. A
/// category applies to every scalar reached below the slot.
pub fn synthesize(
    descriptor: &TypeDescriptor,
    category: Option<&CategoryTag>,
    mode: ItemMode,
) -> ValueExpression {
    match descriptor {
        TypeDescriptor::Scalar { kind } => ValueExpression::Provider(ProviderCall {
            kind: *kind,
            category: category.cloned(),
            mode,
        }),
        TypeDescriptor::Optional { inner, .. } => synthesize(inner, category, mode),
        TypeDescriptor::Array { element } => ValueExpression::Sequence {
            elements: vec![synthesize(element, category, mode)],
        },
        TypeDescriptor::Dictionary { key, value } => ValueExpression::Mapping {
            entries: vec![(
                synthesize(key, category, mode),
                synthesize(value, category, mode),
            )],
        },
        TypeDescriptor::Named { name } => ValueExpression::SampleRef {
            type_name: name.clone(),
        },
    }
}

/// Build one product item by calling `constructor` with a synthesized
/// value per parameter.
///
/// Parameter types come from the constructor; categories come from the
/// field of the same name.
pub fn construct(
    constructor: &ConstructorCandidate,
    fields: &[FieldSlot],
    mode: ItemMode,
) -> ValueExpression {
    let arguments = constructor
        .parameter_names
        .iter()
        .map(|parameter| {
            let field = fields.iter().find(|field| &field.name == parameter);
            let descriptor = constructor
                .parameter_types
                .get(parameter)
                .or(field.map(|field| &field.descriptor));
            let value = match descriptor {
                Some(descriptor) => synthesize(
                    descriptor,
                    field.and_then(|field| field.category.as_ref()),
                    mode,
                ),
                None => ValueExpression::SampleRef {
                    type_name: parameter.clone(),
                },
            };
            Argument::labeled(parameter.clone(), value)
        })
        .collect();

    ValueExpression::Construct {
        constructor: constructor.name.clone(),
        arguments,
    }
}

#[cfg(test)]
mod tests {
    use sampleforge_core::ScalarKind;

    use super::*;
    use crate::resolver::resolve;

    fn provider(kind: ScalarKind, mode: ItemMode) -> ValueExpression {
        ValueExpression::Provider(ProviderCall {
            kind,
            category: None,
            mode,
        })
    }

    #[test]
    fn optional_depth_never_changes_the_value() {
        let mode = ItemMode::Deterministic(2);
        let plain = synthesize(&resolve("Int"), None, mode);
        assert_eq!(synthesize(&resolve("Int?"), None, mode), plain);
        assert_eq!(synthesize(&resolve("Int????????"), None, mode), plain);
    }

    #[test]
    fn dictionary_with_array_key_and_optional_value() {
        let mode = ItemMode::Deterministic(1);
        let value = synthesize(&resolve("[[Int]: String?]"), None, mode);
        assert_eq!(
            value,
            ValueExpression::Mapping {
                entries: vec![(
                    ValueExpression::Sequence {
                        elements: vec![provider(ScalarKind::Int, mode)],
                    },
                    provider(ScalarKind::String, mode),
                )],
            }
        );
    }

    #[test]
    fn nested_arrays_keep_one_element_per_level() {
        let value = synthesize(&resolve("[[[Int]]]"), None, ItemMode::Random);
        let mut depth = 0;
        let mut current = &value;
        while let ValueExpression::Sequence { elements } = current {
            assert_eq!(elements.len(), 1);
            current = &elements[0];
            depth += 1;
        }
        assert_eq!(depth, 3);
        assert_eq!(current, &provider(ScalarKind::Int, ItemMode::Random));
    }

    #[test]
    fn named_types_reference_their_first_sample() {
        let value = synthesize(&resolve("[Product]"), None, ItemMode::Deterministic(4));
        assert_eq!(value.sample_references(), vec!["Product"]);
    }

    #[test]
    fn category_reaches_scalars_inside_containers() {
        let value = synthesize(
            &resolve("[String]?"),
            Some(&CategoryTag::Email),
            ItemMode::Deterministic(1),
        );
        let calls = value.provider_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].category, Some(CategoryTag::Email));
    }

    #[test]
    fn every_slot_of_an_item_shares_the_index() {
        let fields = vec![
            FieldSlot {
                name: "x".to_string(),
                descriptor: resolve("Int"),
                category: None,
            },
            FieldSlot {
                name: "y".to_string(),
                descriptor: resolve("[String: Date]"),
                category: None,
            },
        ];
        let constructor = ConstructorCandidate::implicit(&fields);
        let item = construct(&constructor, &fields, ItemMode::Deterministic(7));

        let calls = item.provider_calls();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|call| call.mode == ItemMode::Deterministic(7)));
    }
}
