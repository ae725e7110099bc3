use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::category::CategoryTag;

/// Read-only description of an annotated declaration, supplied by the host.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Declaration {
    /// Type name as written in source.
    pub name: String,
    pub kind: DeclarationKind,
    /// Members of a product type, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Member>,
    /// Explicitly declared constructors, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initializers: Vec<Initializer>,
    /// Variants of a sum type, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<Variant>,
}

impl Declaration {
    /// Product type with the given members and no explicit constructors.
    pub fn product(name: impl Into<String>, members: Vec<Member>) -> Self {
        Self {
            name: name.into(),
            kind: DeclarationKind::Struct,
            members,
            initializers: Vec::new(),
            variants: Vec::new(),
        }
    }

    /// Sum type with the given variants.
    pub fn sum(name: impl Into<String>, variants: Vec<Variant>) -> Self {
        Self {
            name: name.into(),
            kind: DeclarationKind::Enum,
            members: Vec::new(),
            initializers: Vec::new(),
            variants,
        }
    }

    pub fn with_initializer(mut self, initializer: Initializer) -> Self {
        self.initializers.push(initializer);
        self
    }
}

/// Syntactic kind of a declaration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Struct,
    Enum,
    Class,
    Protocol,
    Actor,
    Extension,
    Union,
}

impl DeclarationKind {
    pub fn is_product(self) -> bool {
        matches!(self, Self::Struct)
    }

    pub fn is_sum(self) -> bool {
        matches!(self, Self::Enum)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Class => "class",
            Self::Protocol => "protocol",
            Self::Actor => "actor",
            Self::Extension => "extension",
            Self::Union => "union",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a member's value is held.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Storage {
    /// Plain stored value.
    #[default]
    Stored,
    /// Stored value with observer logic attached.
    Observed,
    /// Value produced by a custom accessor; no storage of its own.
    Computed,
}

/// A member of a product type.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Member {
    pub name: String,
    /// Explicit type annotation, when one is written.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_annotation: Option<String>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub storage: Storage,
    /// Whether the member declares an initial value.
    #[serde(default)]
    pub has_default: bool,
    /// Category override, e.g. `email` or `image(width:64,height:64)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryTag>,
}

impl Member {
    /// Plain stored member with an explicit type.
    pub fn stored(name: impl Into<String>, type_annotation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_annotation: Some(type_annotation.into()),
            is_static: false,
            storage: Storage::Stored,
            has_default: false,
            category: None,
        }
    }

    pub fn with_category(mut self, category: CategoryTag) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_storage(mut self, storage: Storage) -> Self {
        self.storage = storage;
        self
    }

    pub fn into_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// An explicitly declared constructor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Initializer {
    /// Constructor function name.
    #[serde(default = "default_initializer_name")]
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl Initializer {
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }
}

fn default_initializer_name() -> String {
    "new".to_string()
}

/// Constructor parameter.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_annotation: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_annotation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_annotation: type_annotation.into(),
        }
    }
}

/// A sum-type variant with its ordered payload.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Variant {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub payload: Vec<PayloadSlot>,
}

impl Variant {
    /// Payload-free variant.
    pub fn unit(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            payload: Vec::new(),
        }
    }

    /// Variant with unlabeled payload slots.
    pub fn tuple(tag: impl Into<String>, types: &[&str]) -> Self {
        Self {
            tag: tag.into(),
            payload: types.iter().map(|ty| PayloadSlot::unlabeled(*ty)).collect(),
        }
    }
}

/// One payload slot of a variant.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PayloadSlot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub type_annotation: String,
}

impl PayloadSlot {
    pub fn unlabeled(type_annotation: impl Into<String>) -> Self {
        Self {
            label: None,
            type_annotation: type_annotation.into(),
        }
    }

    pub fn labeled(label: impl Into<String>, type_annotation: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            type_annotation: type_annotation.into(),
        }
    }
}
