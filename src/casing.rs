//! Key casing and root-name pluralization.

use heck::ToLowerCamelCase;

/// Output key casing for a serializer variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Attribute names pass through unchanged. The default.
    #[default]
    Snake,
    /// `foo_bar` becomes `fooBar`.
    Camel,
}

/// Produce the output key for an attribute name under the given format.
pub fn key_for(name: &str, format: Format) -> String {
    match format {
        Format::Snake => name.to_string(),
        Format::Camel => name.to_lower_camel_case(),
    }
}

/// English pluralization, applied to collection root keys.
pub fn pluralize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix('y') {
        if matches!(stem.chars().last(), Some(c) if !is_vowel(c)) {
            return format!("{stem}ies");
        }
    }
    if name.ends_with('s')
        || name.ends_with('x')
        || name.ends_with('z')
        || name.ends_with("ch")
        || name.ends_with("sh")
    {
        return format!("{name}es");
    }
    format!("{name}s")
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}
