//! Root wrapping of serialized output.

use serde_json::{Map, Value};

use crate::casing::{key_for, pluralize, Format};

/// Declared or overridden root naming for a serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Root {
    /// Wrap output under this key (pluralized for collections).
    Key(String),
    /// Suppress wrapping even when the variant declares a root.
    Disabled,
}

/// Applies the wrapping rules to produced mappings: nesting under the
/// effective root key, pluralization for collections, and meta/links
/// injection for collections with an active root.
pub(crate) struct RootWrapper<'a> {
    root: Option<&'a Root>,
    format: Format,
    meta: Option<&'a Value>,
    links: Option<&'a Value>,
}

impl<'a> RootWrapper<'a> {
    pub fn new(
        root: Option<&'a Root>,
        format: Format,
        meta: Option<&'a Value>,
        links: Option<&'a Value>,
    ) -> Self {
        Self {
            root,
            format,
            meta,
            links,
        }
    }

    /// The cased root key, or `None` when the root is disabled or unset.
    fn active_key(&self) -> Option<String> {
        match self.root {
            Some(Root::Key(name)) => Some(key_for(name, self.format)),
            Some(Root::Disabled) | None => None,
        }
    }

    pub fn wrap_singular(&self, hash: Map<String, Value>) -> Value {
        match self.active_key() {
            Some(key) => {
                let mut out = Map::new();
                out.insert(key, Value::Object(hash));
                Value::Object(out)
            }
            None => Value::Object(hash),
        }
    }

    pub fn wrap_collection(&self, hashes: Vec<Value>) -> Value {
        match self.active_key() {
            Some(key) => {
                let mut out = Map::new();
                out.insert(pluralize(&key), Value::Array(hashes));
                if let Some(meta) = self.meta {
                    out.insert("meta".to_string(), meta.clone());
                }
                if let Some(links) = self.links {
                    out.insert("links".to_string(), links.clone());
                }
                Value::Object(out)
            }
            None => Value::Array(hashes),
        }
    }
}
