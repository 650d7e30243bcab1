//! Declarative object-to-hash serialization
//!
//! This crate provides:
//! - A builder DSL for declaring serializer variants: attribute lists, root
//!   naming, key casing and merge composition
//! - Lazy compilation of a declared attribute list into an executable
//!   extraction routine
//! - A process-wide registry of declared variants with bulk recompilation
//!   (`bootstrap_all`) for hot-reload scenarios
//! - Root wrapping with pluralization and meta/links injection for
//!   collections
//!
//! Subjects enter the engine as anything implementing `serde::Serialize` and
//! come out as insertion-ordered JSON mappings.

pub mod casing;
pub mod config;
pub mod definition;
pub mod engine;
pub mod errors;
pub mod locals;
pub mod registry;
pub mod root;
pub mod variant;

pub use casing::Format;
pub use engine::Serializer;
pub use errors::HashifyError;
pub use locals::Locals;
pub use registry::{bootstrap_all, register, registered, reset};
pub use root::Root;
pub use variant::{HashifyContext, SerializerVariant, VariantBuilder};

#[cfg(test)]
mod tests;
