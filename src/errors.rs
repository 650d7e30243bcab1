use thiserror::Error;

/// Typed errors surfaced by the serialization engine.
///
/// Attribute-resolution failures (a declared attribute that cannot be read
/// off the subject) are deliberately not a custom type here; they propagate
/// as plain `anyhow` errors from the extraction path.
#[derive(Error, Debug, Clone)]
pub enum HashifyError {
    #[error("{serializer} is expecting your locals as a map. You can do this by passing a \
             locals map to your serializer like this: \
             variant.serialize_with_locals(subject, &map) \
             or like this: variant.serialize(subject)?.with_locals(map)")]
    Locals { serializer: String },
}

impl HashifyError {
    pub fn locals(serializer: impl Into<String>) -> Self {
        HashifyError::Locals {
            serializer: serializer.into(),
        }
    }
}
