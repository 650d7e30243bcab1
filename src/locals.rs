//! Materialization of caller-supplied locals into a read-only context.

use anyhow::{anyhow, Result};
use serde_json::{Map, Value};

use crate::errors::HashifyError;

/// Read-only, name-addressable view over the locals supplied for a request.
#[derive(Debug, Clone, PartialEq)]
pub struct Locals {
    entries: Map<String, Value>,
}

impl Locals {
    /// Look up a local by name.
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.entries
            .get(name)
            .ok_or_else(|| anyhow!("unknown local `{name}`"))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Names of the supplied locals, in the order they were given.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Convert the raw locals value into an attribute-accessible context.
///
/// Absent, null or empty locals resolve to `None`. A present value that is
/// not a key/value map fails with [`HashifyError::Locals`] naming the
/// serializer.
pub(crate) fn resolve(
    raw: Option<&Value>,
    serializer: &str,
) -> Result<Option<Locals>, HashifyError> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) if map.is_empty() => Ok(None),
        Some(Value::Object(map)) => Ok(Some(Locals {
            entries: map.clone(),
        })),
        Some(_) => Err(HashifyError::locals(serializer)),
    }
}
