use sampleforge_core::{ScalarKind, TypeDescriptor};

/// Resolve a textual type expression into a descriptor.
///
/// Grammar, outer to inner: trailing `?` suffixes, then `[T]`, `[K: V]` or
/// a bare name. Anything that does not fit falls back to `Named` with the
/// input text, so unknown syntax never rejects a field.
pub fn resolve(expression: &str) -> TypeDescriptor {
    let text = expression.trim();
    let (base, depth) = strip_optional_suffixes(text);
    if depth > 0 {
        return TypeDescriptor::optional(resolve_base(base), depth);
    }
    resolve_base(text)
}

fn strip_optional_suffixes(text: &str) -> (&str, usize) {
    let mut base = text;
    let mut depth = 0;
    while let Some(rest) = base.strip_suffix('?') {
        base = rest.trim_end();
        depth += 1;
    }
    (base, depth)
}

fn resolve_base(text: &str) -> TypeDescriptor {
    if let Some(body) = bracket_body(text) {
        if body.trim().is_empty() {
            return TypeDescriptor::named(text);
        }
        return match split_top_level_colon(body) {
            Some((key, value)) if !key.trim().is_empty() && !value.trim().is_empty() => {
                TypeDescriptor::dictionary(resolve(key), resolve(value))
            }
            Some(_) => TypeDescriptor::named(text),
            None => TypeDescriptor::array(resolve(body)),
        };
    }

    match ScalarKind::parse(text) {
        Some(kind) => TypeDescriptor::scalar(kind),
        None => TypeDescriptor::named(text),
    }
}

/// Contents of `[...]` when the opening bracket closes at the very end.
fn bracket_body(text: &str) -> Option<&str> {
    if !text.starts_with('[') || !text.ends_with(']') {
        return None;
    }
    let mut depth = 0_usize;
    for (position, ch) in text.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 && position != text.len() - 1 {
                    return None;
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    Some(&text[1..text.len() - 1])
}

/// Split at the first `:` outside nested brackets, skipping `::` paths.
fn split_top_level_colon(body: &str) -> Option<(&str, &str)> {
    let bytes = body.as_bytes();
    let mut depth = 0_usize;
    let mut position = 0;
    while position < bytes.len() {
        match bytes[position] {
            b'[' | b'<' | b'(' => depth += 1,
            b']' | b'>' | b')' => depth = depth.saturating_sub(1),
            b':' if depth == 0 => {
                if bytes.get(position + 1) == Some(&b':') {
                    position += 2;
                    continue;
                }
                return Some((&body[..position], &body[position + 1..]));
            }
            _ => {}
        }
        position += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(kind: ScalarKind) -> TypeDescriptor {
        TypeDescriptor::scalar(kind)
    }

    #[test]
    fn resolves_bare_scalars_and_named_types() {
        assert_eq!(resolve("Int"), scalar(ScalarKind::Int));
        assert_eq!(resolve("  String "), scalar(ScalarKind::String));
        assert_eq!(resolve("Product"), TypeDescriptor::named("Product"));
    }

    #[test]
    fn counts_consecutive_optional_suffixes() {
        assert_eq!(
            resolve("Int????????"),
            TypeDescriptor::optional(scalar(ScalarKind::Int), 8)
        );
        assert_eq!(
            resolve("String ? ?"),
            TypeDescriptor::optional(scalar(ScalarKind::String), 2)
        );
        assert_eq!(
            resolve("[Int]?"),
            TypeDescriptor::optional(TypeDescriptor::array(scalar(ScalarKind::Int)), 1)
        );
        assert_eq!(
            resolve("[Int?]"),
            TypeDescriptor::array(TypeDescriptor::optional(scalar(ScalarKind::Int), 1))
        );
    }

    #[test]
    fn resolves_nested_arrays() {
        let expected = TypeDescriptor::array(TypeDescriptor::array(TypeDescriptor::array(
            TypeDescriptor::array(scalar(ScalarKind::Int)),
        )));
        assert_eq!(resolve("[[[[Int]]]]"), expected);
    }

    #[test]
    fn resolves_dictionaries_with_compound_keys() {
        assert_eq!(
            resolve("[[Int]: String?]"),
            TypeDescriptor::dictionary(
                TypeDescriptor::array(scalar(ScalarKind::Int)),
                TypeDescriptor::optional(scalar(ScalarKind::String), 1),
            )
        );
    }

    #[test]
    fn resolves_deeply_mixed_containers() {
        let descriptor = resolve("[[Int]: [[String: [String: [Int: [Int: MyEnum]]]]]]");
        let innermost = TypeDescriptor::dictionary(
            scalar(ScalarKind::Int),
            TypeDescriptor::named("MyEnum"),
        );
        let expected = TypeDescriptor::dictionary(
            TypeDescriptor::array(scalar(ScalarKind::Int)),
            TypeDescriptor::array(TypeDescriptor::dictionary(
                scalar(ScalarKind::String),
                TypeDescriptor::dictionary(
                    scalar(ScalarKind::String),
                    TypeDescriptor::dictionary(scalar(ScalarKind::Int), innermost),
                ),
            )),
        );
        assert_eq!(descriptor, expected);
    }

    #[test]
    fn path_separators_are_not_dictionary_colons() {
        assert_eq!(
            resolve("[std::string::String]"),
            TypeDescriptor::array(TypeDescriptor::named("std::string::String"))
        );
        assert_eq!(
            resolve("[a::Key: Int]"),
            TypeDescriptor::dictionary(TypeDescriptor::named("a::Key"), scalar(ScalarKind::Int))
        );
    }

    #[test]
    fn malformed_expressions_fall_back_to_named() {
        assert_eq!(resolve("[]"), TypeDescriptor::named("[]"));
        assert_eq!(resolve("[Int"), TypeDescriptor::named("[Int"));
        assert_eq!(resolve("[A][B]"), TypeDescriptor::named("[A][B]"));
        assert_eq!(resolve("[: Int]"), TypeDescriptor::named("[: Int]"));
        assert_eq!(
            resolve("Optional<Int>"),
            TypeDescriptor::named("Optional<Int>")
        );
    }

    #[test]
    fn resolution_is_idempotent() {
        let text = "[[String: [Int]]: Product??]";
        assert_eq!(resolve(text), resolve(text));
    }
}
