//! Core contracts for sampleforge.
//!
//! This crate defines the declaration description a host hands to the
//! generator, the type descriptors and category tags the synthesis engine
//! works with, and the diagnostics produced when a declaration cannot be
//! expanded.

pub mod category;
pub mod declaration;
pub mod diagnostic;
pub mod error;
pub mod manifest;
pub mod request;
pub mod types;
pub mod validation;

pub use category::CategoryTag;
pub use declaration::{
    Declaration, DeclarationKind, Initializer, Member, Parameter, PayloadSlot, Storage, Variant,
};
pub use diagnostic::{Diagnostic, DiagnosticError, Severity};
pub use error::{Error, Result};
pub use manifest::{Manifest, ManifestDefaults, ManifestEntry};
pub use request::{GenerationMode, GenerationRequest, ItemMode};
pub use types::{ScalarKind, TypeDescriptor};
pub use validation::{validate, validate_declaration, validate_members};

/// Item count used when neither a manifest entry nor its defaults set one.
pub const DEFAULT_ITEM_COUNT: i64 = 3;

/// Largest item count a single expansion accepts.
pub const MAX_ITEM_COUNT: i64 = 100_000;
