//! Rendering backends
//!
//! Each backend is a [`ReporterDelegate`](crate::visit::ReporterDelegate)
//! fed by the one shared traversal engine. Backends are pure functions of
//! the traversal events: they consume Labels only and never inspect the
//! node behaviorally.

pub mod describe;
pub mod graphql;
pub mod source;
pub mod structure;
pub mod typescript;

use std::collections::BTreeMap;

use crate::error::Result;
use crate::label::Label;
use crate::refine::View;
use crate::registry::TypeRegistry;

/// Options shared by the string-producing backends
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Top-level type name
    pub name: String,
    /// Overrides for the GraphQL scalar mapping, keyed by schema type name
    pub scalar_map: BTreeMap<String, String>,
    /// Indentation unit
    pub indent: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            name: "Schema".to_string(),
            scalar_map: BTreeMap::new(),
            indent: "  ".to_string(),
        }
    }
}

impl RenderOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Human-readable description of a label
pub fn describe(label: &Label) -> String {
    describe::render(label)
}

/// TypeScript interface declaration
pub fn typescript_interface(label: &Label, options: &RenderOptions) -> String {
    typescript::render(label, options)
}

/// GraphQL schema for the label plus every named type reachable from it.
/// Referenced records resolve through `view`, so a draft root renders
/// drafted targets.
pub fn graphql_schema(
    label: &Label,
    registry: &TypeRegistry,
    view: View,
    options: &RenderOptions,
) -> Result<String> {
    graphql::render(label, registry, view, options)
}

/// Structural JSON dump of the label tree
pub fn structural_json(label: &Label) -> serde_json::Value {
    structure::render(label)
}

/// Sorted, de-duplicated list of declared type names appearing in the label
pub fn type_inventory(label: &Label) -> Vec<String> {
    structure::inventory(label)
}

/// Re-parseable declaration of the shape
pub fn source_form(label: &Label) -> String {
    source::render(label)
}

/// Convert to PascalCase (for synthesized type names)
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' || c == ' ' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("geo_point"), "GeoPoint");
        assert_eq!(to_pascal_case("geo"), "Geo");
        assert_eq!(to_pascal_case("Author"), "Author");
    }
}
