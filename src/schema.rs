//! Schema authoring surface
//!
//! A `Schema` is a named field-to-node mapping. The strict and draft views
//! are derived wrapper nodes, recomputed on every access - there is no
//! cached state, and recomputation is idempotent.

use crate::node::{dictionary, record, TypeNode};
use crate::refine;

/// An immutable field mapping plus a name
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: String,
    fields: Vec<(String, TypeNode)>,
}

impl Schema {
    pub fn new<K, I>(name: impl Into<String>, fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, TypeNode)>,
    {
        Self {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(k, node)| (k.into(), node))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[(String, TypeNode)] {
        &self.fields
    }

    /// The publish-ready view: the declared shape, fully enforced.
    pub fn strict(&self) -> TypeNode {
        dictionary(self.fields.iter().cloned())
            .named(Some(&self.name))
            .required(true)
    }

    /// The in-progress view: recursively widened and loosened.
    pub fn draft(&self) -> TypeNode {
        refine::draft(&self.strict()).required(false)
    }

    /// This schema as a registerable named record.
    pub fn record(&self) -> TypeNode {
        record(self.name.clone(), self.fields.iter().cloned())
    }
}
