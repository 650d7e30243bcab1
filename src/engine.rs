//! Request-scoped serialization engine.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use once_cell::sync::OnceCell;
use serde_json::{Map, Value};

use crate::definition::Extractor;
use crate::errors::HashifyError;
use crate::locals::{self, Locals};
use crate::root::{Root, RootWrapper};
use crate::variant::{HashifyContext, SerializerVariant};

/// The subject of one request, classified once at construction.
enum Subject {
    One(Value),
    Many(Vec<Value>),
}

/// One serialization request: a subject plus per-request overrides.
///
/// Built by [`SerializerVariant::serialize`]; configured by value through
/// the fluent methods; consumed conceptually by `to_map`/`to_json`.
pub struct Serializer {
    variant: Arc<SerializerVariant>,
    subject: Subject,
    raw_locals: Option<Value>,
    resolved_locals: OnceCell<Result<Option<Arc<Locals>>, HashifyError>>,
    meta: Option<Value>,
    links: Option<Value>,
    root_override: Option<Root>,
}

impl Serializer {
    pub(crate) fn new(
        variant: Arc<SerializerVariant>,
        subject: Value,
        raw_locals: Option<Value>,
    ) -> Self {
        // An array subject is a collection; everything else (objects
        // included) is a single resource.
        let subject = match subject {
            Value::Array(items) => Subject::Many(items),
            other => Subject::One(other),
        };

        Self {
            variant,
            subject,
            raw_locals,
            resolved_locals: OnceCell::new(),
            meta: None,
            links: None,
            root_override: None,
        }
    }

    /// Attach a meta entry, emitted only for collections with an active
    /// root.
    pub fn meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Attach a links entry, emitted only for collections with an active
    /// root.
    pub fn links(mut self, links: Value) -> Self {
        self.links = Some(links);
        self
    }

    /// Override the declared root key for this request.
    pub fn root(mut self, name: impl Into<String>) -> Self {
        self.root_override = Some(Root::Key(name.into()));
        self
    }

    /// Strip root wrapping for this request.
    pub fn root_disabled(mut self) -> Self {
        self.root_override = Some(Root::Disabled);
        self
    }

    /// Set or overwrite the locals for this request.
    pub fn with_locals(mut self, locals: Value) -> Self {
        self.raw_locals = Some(locals);
        self.resolved_locals = OnceCell::new();
        self
    }

    /// Resolve the locals supplied for this request.
    ///
    /// The result is computed once and cached; repeated calls return the
    /// identical context. `None` when no locals were ever supplied.
    pub fn locals(&self) -> Result<Option<Arc<Locals>>> {
        let resolved = self.resolved_locals.get_or_init(|| {
            locals::resolve(self.raw_locals.as_ref(), self.variant.name())
                .map(|opt| opt.map(Arc::new))
        });
        resolved.clone().map_err(Into::into)
    }

    /// Produce the output mapping: run the compiled extractor over the
    /// subject, fold in merge sources, then apply root wrapping.
    pub fn to_map(&self) -> Result<Value> {
        let extractor = self.variant.extractor()?;
        let locals = self.locals()?;
        let wrapper = RootWrapper::new(
            self.root_override.as_ref().or(self.variant.root()),
            self.variant.format(),
            self.meta.as_ref(),
            self.links.as_ref(),
        );

        match &self.subject {
            Subject::One(obj) => {
                let hash = self.hashify(&extractor, obj, locals.as_deref())?;
                Ok(wrapper.wrap_singular(hash))
            }
            Subject::Many(objs) => {
                let mut hashes = Vec::with_capacity(objs.len());
                for obj in objs {
                    hashes.push(Value::Object(self.hashify(&extractor, obj, locals.as_deref())?));
                }
                Ok(wrapper.wrap_collection(hashes))
            }
        }
    }

    /// Encode the output mapping as compact JSON text.
    pub fn to_json(&self) -> Result<String> {
        let map = self.to_map()?;
        Ok(serde_json::to_string(&map)?)
    }

    fn hashify(
        &self,
        extractor: &Extractor,
        obj: &Value,
        locals: Option<&Locals>,
    ) -> Result<Map<String, Value>> {
        let ctx = HashifyContext::new(obj, locals);
        let mut hash = extractor.hashify(&ctx)?;

        for name in self.variant.merge_sources() {
            let source = self.variant.merge_fn(name).ok_or_else(|| {
                anyhow!(
                    "serializer {} declares merge source `{name}` but no such source is defined",
                    self.variant.name()
                )
            })?;
            // Shallow merge; merge-source keys win on conflict.
            for (key, value) in source(&ctx)? {
                hash.insert(key, value);
            }
        }

        Ok(hash)
    }
}
