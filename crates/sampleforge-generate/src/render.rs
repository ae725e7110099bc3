use std::fmt::Write as _;

use crate::expr::{Argument, ProviderCall, ValueExpression};
use crate::model::{ExpansionReport, GeneratedAccessor};

const INDENT: &str = "    ";

/// Knobs for the rendered accessor code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Name of the generated associated function.
    pub accessor_name: String,
    /// Path of the data generator type the expressions call into.
    pub generator_path: String,
    /// `cfg` predicate gating the accessor; `None` emits it unconditionally.
    pub cfg_gate: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            accessor_name: "sample".to_string(),
            generator_path: "DataGenerator".to_string(),
            cfg_gate: Some("debug_assertions".to_string()),
        }
    }
}

/// Render an accessor as an `impl` block returning every sample.
pub fn render_accessor(accessor: &GeneratedAccessor, options: &RenderOptions) -> String {
    let mut out = String::new();
    if let Some(gate) = &options.cfg_gate {
        let _ = writeln!(out, "#[cfg({gate})]");
    }
    let _ = writeln!(out, "impl {} {{", accessor.declaration);
    let _ = writeln!(
        out,
        "{INDENT}pub fn {}() -> Vec<Self> {{",
        options.accessor_name
    );
    let _ = writeln!(out, "{INDENT}{INDENT}vec![");
    for item in &accessor.items {
        let _ = writeln!(
            out,
            "{INDENT}{INDENT}{INDENT}{},",
            render_expression(item, options)
        );
    }
    let _ = writeln!(out, "{INDENT}{INDENT}]");
    let _ = writeln!(out, "{INDENT}}}");
    out.push_str("}\n");
    out
}

/// Render every accessor of a report, separated by blank lines.
pub fn render_report(report: &ExpansionReport, options: &RenderOptions) -> String {
    let mut out = String::from("// @generated by sampleforge. Do not edit.\n");
    for accessor in &report.accessors {
        out.push('\n');
        out.push_str(&render_accessor(accessor, options));
    }
    out
}

/// Render a single expression on one line.
pub fn render_expression(expression: &ValueExpression, options: &RenderOptions) -> String {
    match expression {
        ValueExpression::Provider(call) => render_provider(call, options),
        ValueExpression::Sequence { elements } => {
            let elements: Vec<_> = elements
                .iter()
                .map(|element| render_expression(element, options))
                .collect();
            format!("vec![{}]", elements.join(", "))
        }
        ValueExpression::Mapping { entries } => {
            let entries: Vec<_> = entries
                .iter()
                .map(|(key, value)| {
                    format!(
                        "({}, {})",
                        render_expression(key, options),
                        render_expression(value, options)
                    )
                })
                .collect();
            format!(
                "::std::collections::HashMap::from([{}])",
                entries.join(", ")
            )
        }
        ValueExpression::SampleRef { type_name } => {
            format!("{type_name}::{}().remove(0)", options.accessor_name)
        }
        ValueExpression::Construct {
            constructor: None,
            arguments,
        } if arguments.is_empty() => "Self {}".to_string(),
        ValueExpression::Construct {
            constructor: None,
            arguments,
        } => format!("Self {{ {} }}", render_fields(arguments, options)),
        ValueExpression::Construct {
            constructor: Some(name),
            arguments,
        } => format!("Self::{name}({})", render_positional(arguments, options)),
        ValueExpression::Variant { tag, arguments } => {
            // Struct-like variants need every slot named; anything else is
            // rendered as a tuple variant.
            if arguments.is_empty() {
                format!("Self::{tag}")
            } else if arguments.iter().all(|argument| argument.label.is_some()) {
                format!("Self::{tag} {{ {} }}", render_fields(arguments, options))
            } else {
                format!("Self::{tag}({})", render_positional(arguments, options))
            }
        }
    }
}

fn render_provider(call: &ProviderCall, options: &RenderOptions) -> String {
    let mut out = match call.mode.index() {
        Some(index) => format!("{}::deterministic({index})", options.generator_path),
        None => format!("{}::random()", options.generator_path),
    };
    if let Some(category) = &call.category {
        let _ = write!(out, ".with_category({:?})", category.to_string());
    }
    let _ = write!(out, ".{}()", call.kind.method());
    out
}

fn render_positional(arguments: &[Argument], options: &RenderOptions) -> String {
    arguments
        .iter()
        .map(|argument| render_expression(&argument.value, options))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_fields(arguments: &[Argument], options: &RenderOptions) -> String {
    arguments
        .iter()
        .enumerate()
        .map(|(position, argument)| {
            let value = render_expression(&argument.value, options);
            match &argument.label {
                Some(label) => format!("{label}: {value}"),
                None => format!("{position}: {value}"),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
