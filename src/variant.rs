//! Serializer variant declaration, derivation and the per-object context
//! handed to override accessors.

use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::{Arc, RwLock};

use anyhow::{anyhow, Result};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::casing::Format;
use crate::definition::Extractor;
use crate::engine::Serializer;
use crate::locals::Locals;
use crate::registry;
use crate::root::Root;

/// Override accessor: resolves one attribute against the current subject.
pub type AccessorFn = dyn Fn(&HashifyContext) -> Result<Value> + Send + Sync;

/// Merge source: produces a map that is shallow-merged over the extracted one.
pub type MergeFn = dyn Fn(&HashifyContext) -> Result<Map<String, Value>> + Send + Sync;

/// Per-object view available to accessors and merge sources during
/// extraction.
pub struct HashifyContext<'a> {
    obj: &'a Value,
    locals: Option<&'a Locals>,
}

impl<'a> HashifyContext<'a> {
    pub(crate) fn new(obj: &'a Value, locals: Option<&'a Locals>) -> Self {
        Self { obj, locals }
    }

    /// The object currently being serialized.
    pub fn obj(&self) -> &Value {
        self.obj
    }

    /// Read a same-named field off the current object.
    pub fn field(&self, name: &str) -> Result<Value> {
        match self.obj {
            Value::Object(map) => map
                .get(name)
                .cloned()
                .ok_or_else(|| anyhow!("undefined attribute `{name}` on subject")),
            _ => Err(anyhow!(
                "cannot read attribute `{name}`: subject is not a keyed object"
            )),
        }
    }

    /// The locals supplied for this request.
    pub fn locals(&self) -> Result<&Locals> {
        self.locals
            .ok_or_else(|| anyhow!("no locals were supplied for this serialization"))
    }
}

/// A declared serializer variant.
///
/// Declaration state is frozen by [`VariantBuilder::build`]; only the
/// compiled extractor is replaced afterwards, on every bootstrap.
pub struct SerializerVariant {
    name: String,
    attributes: Vec<String>,
    merge_sources: Vec<String>,
    root: Option<Root>,
    format: Format,
    accessors: HashMap<String, Arc<AccessorFn>>,
    merge_fns: HashMap<String, Arc<MergeFn>>,
    compiled: RwLock<Option<Arc<Extractor>>>,
}

impl Debug for SerializerVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerVariant")
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .field("merge_sources", &self.merge_sources)
            .field("root", &self.root)
            .field("format", &self.format)
            .field("accessors", &self.accessors.keys().collect::<Vec<_>>())
            .field(
                "compiled",
                &self.compiled.read().map(|c| c.is_some()).unwrap_or(false),
            )
            .finish()
    }
}

impl SerializerVariant {
    /// Start declaring a new variant.
    pub fn declare(name: impl Into<String>) -> VariantBuilder {
        VariantBuilder::new(name.into())
    }

    /// Start declaring a variant derived from `parent`.
    ///
    /// The parent's attribute list (if non-empty), merge-source list (if
    /// non-empty), root name (always, even when unset) and named
    /// accessors/merge sources are snapshotted at this moment. The casing
    /// format is not carried over.
    pub fn derive(parent: &Arc<SerializerVariant>, name: impl Into<String>) -> VariantBuilder {
        let mut builder = VariantBuilder::new(name.into());
        if !parent.attributes.is_empty() {
            builder.attribute_names.extend(parent.attributes.clone());
        }
        if !parent.merge_sources.is_empty() {
            builder.merge_names.extend(parent.merge_sources.clone());
        }
        builder.root = parent.root.clone();
        builder.accessors = parent.accessors.clone();
        builder.merge_fns = parent.merge_fns.clone();
        builder
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn merge_sources(&self) -> &[String] {
        &self.merge_sources
    }

    pub fn root(&self) -> Option<&Root> {
        self.root.as_ref()
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub(crate) fn accessor(&self, name: &str) -> Option<Arc<AccessorFn>> {
        self.accessors.get(name).cloned()
    }

    pub(crate) fn merge_fn(&self, name: &str) -> Option<Arc<MergeFn>> {
        self.merge_fns.get(name).cloned()
    }

    /// Compile (or recompile) this variant's extractor, fully replacing any
    /// prior one. Idempotent; re-run by every bootstrap.
    pub fn compile(&self) {
        let extractor = Arc::new(Extractor::compile(self));
        let mut guard = self
            .compiled
            .write()
            .expect("compiled extractor lock poisoned");
        *guard = Some(extractor);
    }

    pub(crate) fn extractor(&self) -> Result<Arc<Extractor>> {
        self.compiled
            .read()
            .expect("compiled extractor lock poisoned")
            .clone()
            .ok_or_else(|| {
                anyhow!(
                    "serializer {} has no compiled extractor; call bootstrap_all() after declaring serializers",
                    self.name
                )
            })
    }

    /// Begin a serialization request for a single object or a sequence.
    pub fn serialize<T: Serialize + ?Sized>(self: &Arc<Self>, subject: &T) -> Result<Serializer> {
        Ok(Serializer::new(
            Arc::clone(self),
            serde_json::to_value(subject)?,
            None,
        ))
    }

    /// Begin a serialization request with locals supplied up front.
    pub fn serialize_with_locals<T, L>(self: &Arc<Self>, subject: &T, locals: &L) -> Result<Serializer>
    where
        T: Serialize + ?Sized,
        L: Serialize + ?Sized,
    {
        Ok(Serializer::new(
            Arc::clone(self),
            serde_json::to_value(subject)?,
            Some(serde_json::to_value(locals)?),
        ))
    }
}

/// Declaration surface for a serializer variant.
///
/// All declaration happens here; `build` freezes the state, registers the
/// variant in the global registry and hands back the shared handle.
pub struct VariantBuilder {
    name: String,
    attribute_names: Vec<String>,
    merge_names: Vec<String>,
    root: Option<Root>,
    format: Format,
    accessors: HashMap<String, Arc<AccessorFn>>,
    merge_fns: HashMap<String, Arc<MergeFn>>,
}

impl VariantBuilder {
    fn new(name: String) -> Self {
        Self {
            name,
            attribute_names: Vec::new(),
            merge_names: Vec::new(),
            root: None,
            format: Format::Snake,
            accessors: HashMap::new(),
            merge_fns: HashMap::new(),
        }
    }

    /// Append attribute names. Later duplicates are dropped; first-seen
    /// order is preserved.
    pub fn attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        push_dedup(&mut self.attribute_names, names);
        self
    }

    /// Append merge-source names, with the same dedup discipline as
    /// [`attributes`](Self::attributes).
    pub fn merge_with<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        push_dedup(&mut self.merge_names, names);
        self
    }

    /// Declare the root key used to wrap output.
    pub fn root(mut self, name: impl Into<String>) -> Self {
        self.root = Some(Root::Key(name.into()));
        self
    }

    /// Suppress root wrapping for this variant.
    pub fn root_disabled(mut self) -> Self {
        self.root = Some(Root::Disabled);
        self
    }

    /// Set the output key casing.
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Define an override accessor for an attribute name. At compile time
    /// an attribute with a same-named accessor resolves through it instead
    /// of reading the subject's field.
    pub fn accessor<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&HashifyContext) -> Result<Value> + Send + Sync + 'static,
    {
        self.accessors.insert(name.into(), Arc::new(f));
        self
    }

    /// Define a named merge source: a zero-arg producer whose returned map
    /// is shallow-merged over each extracted mapping (its keys win).
    pub fn merge_source<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&HashifyContext) -> Result<Map<String, Value>> + Send + Sync + 'static,
    {
        self.merge_fns.insert(name.into(), Arc::new(f));
        self
    }

    /// Freeze the declaration, register the variant globally and return it.
    pub fn build(self) -> Arc<SerializerVariant> {
        let mut attributes = Vec::new();
        push_dedup(&mut attributes, self.attribute_names);
        let mut merge_sources = Vec::new();
        push_dedup(&mut merge_sources, self.merge_names);

        let variant = Arc::new(SerializerVariant {
            name: self.name,
            attributes,
            merge_sources,
            root: self.root,
            format: self.format,
            accessors: self.accessors,
            merge_fns: self.merge_fns,
            compiled: RwLock::new(None),
        });
        registry::register(&variant);
        variant
    }
}

fn push_dedup<I, S>(list: &mut Vec<String>, names: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    for name in names {
        let name = name.into();
        if !list.contains(&name) {
            list.push(name);
        }
    }
}
