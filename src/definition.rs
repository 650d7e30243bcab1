//! Compilation of a declared attribute list into an executable extractor.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::casing::key_for;
use crate::variant::{AccessorFn, HashifyContext, SerializerVariant};

/// How one attribute is resolved. Chosen once at compile time, not per call.
enum Source {
    /// Read the same-named field from the current subject object.
    Field(String),
    /// Call the variant's override accessor.
    Accessor(Arc<AccessorFn>),
}

/// The compiled extraction routine for one serializer variant: an ordered
/// list of `(output key, resolver)` pairs.
pub struct Extractor {
    variant_name: String,
    entries: Vec<(String, Source)>,
}

impl Extractor {
    /// Build the extractor from a variant's frozen declaration state.
    ///
    /// An attribute with a same-named accessor resolves through it;
    /// everything else becomes a field read. Missing fields are not
    /// detected here, they surface when the extractor runs.
    pub(crate) fn compile(variant: &SerializerVariant) -> Self {
        let entries = variant
            .attributes()
            .iter()
            .map(|attr| {
                let key = key_for(attr, variant.format());
                let source = match variant.accessor(attr) {
                    Some(f) => Source::Accessor(f),
                    None => Source::Field(attr.clone()),
                };
                (key, source)
            })
            .collect();

        Self {
            variant_name: variant.name().to_string(),
            entries,
        }
    }

    /// Run the extraction against the current subject object, producing an
    /// ordered mapping in declaration order.
    pub(crate) fn hashify(&self, ctx: &HashifyContext) -> Result<Map<String, Value>> {
        let mut hash = Map::new();
        for (key, source) in &self.entries {
            let value = match source {
                Source::Accessor(f) => f(ctx),
                Source::Field(attr) => ctx.field(attr),
            }
            .with_context(|| format!("serializer {}", self.variant_name))?;
            hash.insert(key.clone(), value);
        }
        Ok(hash)
    }
}
