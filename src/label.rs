//! Label tree
//!
//! A `Label` is a pure-data projection of a type node's shape. Rendering
//! backends consume Labels only - they never inspect the node that produced
//! one. A Label is computed on demand and never mutated independently of its
//! node.

use serde::{Deserialize, Serialize};

/// How a slot may be absent.
///
/// `None` marks a structural slot that is unconditionally present whenever
/// its container is visited (a list's item type, for example), as opposed to
/// a user-declared required or optional member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Optionality {
    Required,
    Optional,
    None,
}

/// Shape description for a single node
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub kind: LabelKind,
    pub optionality: Optionality,
    /// Registered type name, when the node carries one. Named labels are
    /// rendered as references instead of being recursed into.
    pub name: Option<String>,
}

/// Kind-specific payload
#[derive(Debug, Clone, PartialEq)]
pub enum LabelKind {
    Primitive {
        type_name: &'static str,
    },
    List {
        item: Box<Label>,
    },
    Dictionary {
        /// Members in declaration order. The order is externally observable.
        members: Vec<(String, Label)>,
    },
    Pointer {
        target: String,
    },
    Iterator {
        target: String,
    },
}

impl Label {
    /// Kind discriminant as a lowercase word, for structural output
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            LabelKind::Primitive { .. } => "primitive",
            LabelKind::List { .. } => "list",
            LabelKind::Dictionary { .. } => "dictionary",
            LabelKind::Pointer { .. } => "pointer",
            LabelKind::Iterator { .. } => "iterator",
        }
    }

    pub fn is_required(&self) -> bool {
        self.optionality == Optionality::Required
    }
}
