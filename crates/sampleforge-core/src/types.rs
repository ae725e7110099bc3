use std::fmt;

use serde::{Deserialize, Serialize};

/// Built-in scalar kinds understood by the data generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScalarKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float,
    Double,
    String,
    Data,
    Date,
    Uuid,
    Url,
}

impl ScalarKind {
    pub const ALL: &'static [ScalarKind] = &[
        ScalarKind::Bool,
        ScalarKind::Int,
        ScalarKind::Int8,
        ScalarKind::Int16,
        ScalarKind::Int32,
        ScalarKind::Int64,
        ScalarKind::UInt,
        ScalarKind::UInt8,
        ScalarKind::UInt16,
        ScalarKind::UInt32,
        ScalarKind::UInt64,
        ScalarKind::Float,
        ScalarKind::Double,
        ScalarKind::String,
        ScalarKind::Data,
        ScalarKind::Date,
        ScalarKind::Uuid,
        ScalarKind::Url,
    ];

    /// Parse a bare type identifier. Rust primitive spellings are accepted
    /// as aliases of the canonical names.
    pub fn parse(value: &str) -> Option<Self> {
        let kind = match value {
            "Bool" | "bool" => Self::Bool,
            "Int" | "isize" => Self::Int,
            "Int8" | "i8" => Self::Int8,
            "Int16" | "i16" => Self::Int16,
            "Int32" | "i32" => Self::Int32,
            "Int64" | "i64" => Self::Int64,
            "UInt" | "usize" => Self::UInt,
            "UInt8" | "u8" => Self::UInt8,
            "UInt16" | "u16" => Self::UInt16,
            "UInt32" | "u32" => Self::UInt32,
            "UInt64" | "u64" => Self::UInt64,
            "Float" | "f32" => Self::Float,
            "Double" | "f64" => Self::Double,
            "String" | "str" => Self::String,
            "Data" => Self::Data,
            "Date" | "DateTime" => Self::Date,
            "UUID" | "Uuid" => Self::Uuid,
            "URL" | "Url" => Self::Url,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical type name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Int8 => "Int8",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::UInt => "UInt",
            Self::UInt8 => "UInt8",
            Self::UInt16 => "UInt16",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::String => "String",
            Self::Data => "Data",
            Self::Date => "Date",
            Self::Uuid => "UUID",
            Self::Url => "URL",
        }
    }

    /// Name of the provider operation producing a value of this kind.
    pub fn method(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt => "uint",
            Self::UInt8 => "uint8",
            Self::UInt16 => "uint16",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Data => "data",
            Self::Date => "date",
            Self::Uuid => "uuid",
            Self::Url => "url",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Syntactic description of a field or payload type.
///
/// Resolution never consults a type checker: `Named` is trusted to be
/// another declaration that exposes its own samples.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TypeDescriptor {
    Scalar { kind: ScalarKind },
    Optional { inner: Box<TypeDescriptor>, depth: usize },
    Array { element: Box<TypeDescriptor> },
    Dictionary { key: Box<TypeDescriptor>, value: Box<TypeDescriptor> },
    Named { name: String },
}

impl TypeDescriptor {
    pub fn scalar(kind: ScalarKind) -> Self {
        Self::Scalar { kind }
    }

    pub fn optional(inner: TypeDescriptor, depth: usize) -> Self {
        Self::Optional {
            inner: Box::new(inner),
            depth,
        }
    }

    pub fn array(element: TypeDescriptor) -> Self {
        Self::Array {
            element: Box::new(element),
        }
    }

    pub fn dictionary(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::Dictionary {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named { name: name.into() }
    }

    /// Strip every optional layer.
    pub fn unwrapped(&self) -> &TypeDescriptor {
        match self {
            Self::Optional { inner, .. } => inner.unwrapped(),
            other => other,
        }
    }

    /// Names of every `Named` type reachable from this descriptor, in
    /// left-to-right order.
    pub fn named_references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_named(&mut names);
        names
    }

    fn collect_named<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Self::Scalar { .. } => {}
            Self::Optional { inner, .. } => inner.collect_named(names),
            Self::Array { element } => element.collect_named(names),
            Self::Dictionary { key, value } => {
                key.collect_named(names);
                value.collect_named(names);
            }
            Self::Named { name } => names.push(name.as_str()),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar { kind } => write!(f, "{kind}"),
            Self::Optional { inner, depth } => {
                write!(f, "{inner}")?;
                for _ in 0..*depth {
                    f.write_str("?")?;
                }
                Ok(())
            }
            Self::Array { element } => write!(f, "[{element}]"),
            Self::Dictionary { key, value } => write!(f, "[{key}: {value}]"),
            Self::Named { name } => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_map_to_canonical_kinds() {
        assert_eq!(ScalarKind::parse("i64"), Some(ScalarKind::Int64));
        assert_eq!(ScalarKind::parse("UUID"), Some(ScalarKind::Uuid));
        assert_eq!(ScalarKind::parse("Uuid"), Some(ScalarKind::Uuid));
        assert_eq!(ScalarKind::parse("Product"), None);
    }

    #[test]
    fn display_round_trips_canonical_text() {
        let descriptor = TypeDescriptor::dictionary(
            TypeDescriptor::array(TypeDescriptor::scalar(ScalarKind::Int)),
            TypeDescriptor::optional(TypeDescriptor::scalar(ScalarKind::String), 2),
        );
        assert_eq!(descriptor.to_string(), "[[Int]: String??]");
    }

    #[test]
    fn named_references_are_collected_in_order() {
        let descriptor = TypeDescriptor::dictionary(
            TypeDescriptor::named("Key"),
            TypeDescriptor::array(TypeDescriptor::optional(TypeDescriptor::named("Value"), 1)),
        );
        assert_eq!(descriptor.named_references(), vec!["Key", "Value"]);
    }
}
