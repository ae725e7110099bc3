//! Type-driven sample synthesis for sampleforge.
//!
//! This crate turns declaration descriptions into collections of
//! fully-populated sample expressions, renders them as Rust accessor code,
//! and provides the `DataGenerator` that produces the concrete values.

pub mod datagen;
pub mod engine;
pub mod errors;
pub mod expr;
pub mod fixtures;
pub mod initializer;
pub mod manifest;
pub mod members;
pub mod model;
pub mod render;
pub mod resolver;
pub mod synth;
pub mod variants;

pub use datagen::{DataGenerator, GeneratedValue};
pub use engine::{Expansion, ExpansionEngine};
pub use errors::{EvaluationError, GenerationError};
pub use expr::{Argument, ProviderCall, ValueExpression};
pub use fixtures::SampleStore;
pub use manifest::{ManifestFormat, load_manifest, parse_manifest};
pub use model::{
    ConstructorCandidate, ExpansionReport, FieldSlot, GeneratedAccessor, PayloadBinding,
    VariantSlot,
};
pub use render::{RenderOptions, render_accessor, render_expression, render_report};
pub use resolver::resolve;
