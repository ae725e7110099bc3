use serde::Serialize;

use sampleforge_core::{CategoryTag, ItemMode, ScalarKind};

/// Structural value-producing expression handed back to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "expr", rename_all = "snake_case")]
pub enum ValueExpression {
    /// Call into the data generator for one scalar value.
    Provider(ProviderCall),
    /// Ordered collection literal.
    Sequence { elements: Vec<ValueExpression> },
    /// Mapping literal.
    Mapping {
        entries: Vec<(ValueExpression, ValueExpression)>,
    },
    /// First sample of another declaration.
    SampleRef { type_name: String },
    /// Product construction; `constructor` is `None` for the memberwise form.
    Construct {
        constructor: Option<String>,
        arguments: Vec<Argument>,
    },
    /// Sum-type variant; no arguments means a bare tag reference.
    Variant { tag: String, arguments: Vec<Argument> },
}

/// Scalar provider invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderCall {
    pub kind: ScalarKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryTag>,
    pub mode: ItemMode,
}

/// A possibly labeled argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Argument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub value: ValueExpression,
}

impl Argument {
    pub fn labeled(label: impl Into<String>, value: ValueExpression) -> Self {
        Self {
            label: Some(label.into()),
            value,
        }
    }

    pub fn positional(value: ValueExpression) -> Self {
        Self { label: None, value }
    }
}

impl ValueExpression {
    /// Type names referenced through `SampleRef`, depth-first.
    pub fn sample_references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.visit(&mut |expr| {
            if let ValueExpression::SampleRef { type_name } = expr {
                names.push(type_name.as_str());
            }
        });
        names
    }

    /// Every provider call, depth-first.
    pub fn provider_calls(&self) -> Vec<&ProviderCall> {
        let mut calls = Vec::new();
        self.visit(&mut |expr| {
            if let ValueExpression::Provider(call) = expr {
                calls.push(call);
            }
        });
        calls
    }

    fn visit<'a>(&'a self, f: &mut dyn FnMut(&'a ValueExpression)) {
        f(self);
        match self {
            Self::Provider(_) | Self::SampleRef { .. } => {}
            Self::Sequence { elements } => {
                for element in elements {
                    element.visit(f);
                }
            }
            Self::Mapping { entries } => {
                for (key, value) in entries {
                    key.visit(f);
                    value.visit(f);
                }
            }
            Self::Construct { arguments, .. } | Self::Variant { arguments, .. } => {
                for argument in arguments {
                    argument.value.visit(f);
                }
            }
        }
    }
}
