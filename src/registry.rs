//! Process-wide registry of declared serializer variants.
//!
//! Populated automatically by [`VariantBuilder::build`](crate::VariantBuilder::build);
//! read by `bootstrap_all`, which an external reload collaborator runs after
//! (re)loading serializer sources.

use std::sync::{Arc, RwLock};

use log::debug;
use once_cell::sync::Lazy;

use crate::variant::SerializerVariant;

/// `None` until the first registration, so "never registered" stays
/// observable.
static REGISTRY: Lazy<RwLock<Option<Vec<Arc<SerializerVariant>>>>> =
    Lazy::new(|| RwLock::new(None));

/// Idempotent append in registration order. Called automatically on every
/// variant declaration.
pub fn register(variant: &Arc<SerializerVariant>) {
    let mut guard = REGISTRY.write().expect("serializer registry poisoned");
    let list = guard.get_or_insert_with(Vec::new);
    if list.iter().any(|v| Arc::ptr_eq(v, variant)) {
        return;
    }
    list.push(Arc::clone(variant));
}

/// Registered variants in registration order, or `None` if nothing was ever
/// registered.
pub fn registered() -> Option<Vec<Arc<SerializerVariant>>> {
    REGISTRY.read().expect("serializer registry poisoned").clone()
}

/// Compile every registered variant in registration order, fully replacing
/// each compiled extractor.
///
/// Safe to call repeatedly (hot reload). Returns the number of variants
/// compiled, or `None` when the registry was never initialized.
pub fn bootstrap_all() -> Option<usize> {
    let variants = registered()?;
    for variant in &variants {
        variant.compile();
        debug!("compiled serializer {}", variant.name());
    }
    Some(variants.len())
}

/// Test-support hook: restore the never-initialized state.
pub fn reset() {
    *REGISTRY.write().expect("serializer registry poisoned") = None;
}
