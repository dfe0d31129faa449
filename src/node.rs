//! Type node algebra
//!
//! A `TypeNode` is one field's behavioral value: it can toggle requiredness,
//! acquire a name, report its own shape as a [`Label`], compose a validation
//! plan, and serialize/parse wire values. Nodes are immutable - `required()`
//! and `named()` return a new node and never change kind.
//!
//! The kind set is closed: Scalar, Dictionary, List, Pointer, Iterator,
//! Record. Every traversal site matches exhaustively so adding a kind is a
//! compile-time-checked change.

use serde_json::Value;

use crate::label::{Label, LabelKind, Optionality};
use crate::validate::{Plan, Predicate};

/// Leaf scalar kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Text,
    SingleLine,
    SingleWord,
    Number,
    Integer,
    Boolean,
    Any,
}

impl ScalarKind {
    /// Schema-facing type name
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarKind::Text => "text",
            ScalarKind::SingleLine => "single-line",
            ScalarKind::SingleWord => "single-word",
            ScalarKind::Number => "number",
            ScalarKind::Integer => "integer",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Any => "any",
        }
    }

    /// The less-refined scalar this one widens to, if any.
    ///
    /// Atomic scalars (text, number, boolean, any) have no base.
    pub fn base(&self) -> Option<ScalarKind> {
        match self {
            ScalarKind::SingleLine | ScalarKind::SingleWord => Some(ScalarKind::Text),
            ScalarKind::Integer => Some(ScalarKind::Number),
            ScalarKind::Text | ScalarKind::Number | ScalarKind::Boolean | ScalarKind::Any => None,
        }
    }

    fn predicate(&self) -> Predicate {
        match self {
            ScalarKind::Text => Predicate::Text,
            ScalarKind::SingleLine => Predicate::SingleLine,
            ScalarKind::SingleWord => Predicate::SingleWord,
            ScalarKind::Number => Predicate::Number,
            ScalarKind::Integer => Predicate::Integer,
            ScalarKind::Boolean => Predicate::Boolean,
            ScalarKind::Any => Predicate::Anything,
        }
    }
}

/// One dictionary member, in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub key: String,
    pub node: TypeNode,
}

/// A record: a dictionary carrying a declared type name
#[derive(Debug, Clone, PartialEq)]
pub struct RecordType {
    pub name: String,
    pub members: Vec<Member>,
}

/// Closed sum over the node kinds
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    Scalar(ScalarKind),
    /// Ordered, unique-key mapping of member name to node
    Dictionary(Vec<Member>),
    /// Single homogeneous item type
    List(Box<TypeNode>),
    /// Single reference to a named record; never serialized or parsed
    Pointer(String),
    /// Sequence of references to a named record; never serialized or parsed
    Iterator(String),
    Record(RecordType),
}

/// One field's capability set
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    kind: Kind,
    required: bool,
    name: Option<String>,
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

fn scalar(kind: ScalarKind) -> TypeNode {
    TypeNode {
        kind: Kind::Scalar(kind),
        required: false,
        name: None,
    }
}

/// Free-form text
pub fn text() -> TypeNode {
    scalar(ScalarKind::Text)
}

/// Text without line breaks; widens to `text()`
pub fn single_line() -> TypeNode {
    scalar(ScalarKind::SingleLine)
}

/// Text without whitespace; widens to `text()`
pub fn single_word() -> TypeNode {
    scalar(ScalarKind::SingleWord)
}

pub fn number() -> TypeNode {
    scalar(ScalarKind::Number)
}

/// Whole number; widens to `number()`
pub fn integer() -> TypeNode {
    scalar(ScalarKind::Integer)
}

pub fn boolean() -> TypeNode {
    scalar(ScalarKind::Boolean)
}

/// Accepts any value
pub fn any() -> TypeNode {
    scalar(ScalarKind::Any)
}

/// Ordered mapping of member name to node
pub fn dictionary<K, I>(members: I) -> TypeNode
where
    K: Into<String>,
    I: IntoIterator<Item = (K, TypeNode)>,
{
    TypeNode {
        kind: Kind::Dictionary(
            members
                .into_iter()
                .map(|(key, node)| Member {
                    key: key.into(),
                    node,
                })
                .collect(),
        ),
        required: false,
        name: None,
    }
}

/// Homogeneous list of `item`
pub fn list(item: TypeNode) -> TypeNode {
    TypeNode {
        kind: Kind::List(Box::new(item)),
        required: false,
        name: None,
    }
}

/// A named dictionary that can be referenced by pointers and iterators
pub fn record<K, I>(name: impl Into<String>, members: I) -> TypeNode
where
    K: Into<String>,
    I: IntoIterator<Item = (K, TypeNode)>,
{
    TypeNode {
        kind: Kind::Record(RecordType {
            name: name.into(),
            members: members
                .into_iter()
                .map(|(key, node)| Member {
                    key: key.into(),
                    node,
                })
                .collect(),
        }),
        required: false,
        name: None,
    }
}

/// Single relationship to the record named `target`
pub fn has_one(target: impl Into<String>) -> TypeNode {
    TypeNode {
        kind: Kind::Pointer(target.into()),
        required: false,
        name: None,
    }
}

/// Multi-valued relationship to the record named `target`
pub fn has_many(target: impl Into<String>) -> TypeNode {
    TypeNode {
        kind: Kind::Iterator(target.into()),
        required: false,
        name: None,
    }
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

impl TypeNode {
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Requiredness toggle. Returns a new node; the receiver is untouched.
    pub fn required(&self, required: bool) -> TypeNode {
        TypeNode {
            kind: self.kind.clone(),
            required,
            name: self.name.clone(),
        }
    }

    /// Attach or clear a registered name. Returns a new node.
    pub fn named(&self, name: Option<&str>) -> TypeNode {
        TypeNode {
            kind: self.kind.clone(),
            required: self.required,
            name: name.map(str::to_owned),
        }
    }

    /// Registered name: an explicit `named()` wins over a record's declared
    /// name.
    pub fn name(&self) -> Option<&str> {
        match (&self.name, &self.kind) {
            (Some(name), _) => Some(name),
            (None, Kind::Record(rec)) => Some(&rec.name),
            (None, _) => None,
        }
    }

    /// The less-refined node this one widens to. `None` for atomic scalars
    /// and all non-scalar kinds.
    pub fn base(&self) -> Option<TypeNode> {
        match &self.kind {
            Kind::Scalar(s) => s.base().map(|b| TypeNode {
                kind: Kind::Scalar(b),
                required: self.required,
                name: self.name.clone(),
            }),
            _ => None,
        }
    }

    /// Project this node's shape as a pure-data label tree.
    pub fn label(&self) -> Label {
        self.label_with(if self.required {
            Optionality::Required
        } else {
            Optionality::Optional
        })
    }

    fn label_with(&self, optionality: Optionality) -> Label {
        let kind = match &self.kind {
            Kind::Scalar(s) => LabelKind::Primitive {
                type_name: s.type_name(),
            },
            Kind::Dictionary(members) => LabelKind::Dictionary {
                members: members
                    .iter()
                    .map(|m| (m.key.clone(), m.node.label()))
                    .collect(),
            },
            Kind::List(item) => LabelKind::List {
                // The item slot is structural: unconditionally present
                // whenever the list itself is visited.
                item: Box::new(item.label_with(Optionality::None)),
            },
            Kind::Pointer(target) => LabelKind::Pointer {
                target: target.clone(),
            },
            Kind::Iterator(target) => LabelKind::Iterator {
                target: target.clone(),
            },
            Kind::Record(rec) => LabelKind::Dictionary {
                members: rec
                    .members
                    .iter()
                    .map(|m| (m.key.clone(), m.node.label()))
                    .collect(),
            },
        };
        Label {
            kind,
            optionality,
            name: self.name().map(str::to_owned),
        }
    }

    // -- validation ---------------------------------------------------------

    /// Compose the validation plan for this node.
    ///
    /// A required node must be present before its inner plan runs; a
    /// non-required node accepts absence outright. A required list
    /// additionally rejects emptiness - that constraint rides on the
    /// requiredness flag, which draft derivation clears, so it never fires in
    /// a draft view.
    pub fn validator(&self) -> Plan {
        let inner = self.inner_plan();
        if self.required {
            let inner = match &self.kind {
                Kind::List(_) => Plan::check(Predicate::NonEmptyArray).and_then(inner),
                _ => inner,
            };
            Plan::is_present().and_then(inner)
        } else {
            Plan::optional(inner)
        }
    }

    /// Validate a value against this node through an injected engine.
    ///
    /// Completes with an ordered error list (empty means valid); `Err` is an
    /// engine-level fault, never a validation failure.
    pub fn validate(
        &self,
        engine: &dyn crate::validate::ValidationEngine,
        value: &Value,
    ) -> crate::error::Result<Vec<crate::validate::ValidationError>> {
        engine.run(&self.validator(), Some(value))
    }

    fn inner_plan(&self) -> Plan {
        match &self.kind {
            Kind::Scalar(s) => Plan::check(s.predicate()),
            Kind::Dictionary(members) => Plan::object(
                members
                    .iter()
                    .map(|m| (m.key.clone(), m.node.validator()))
                    .collect(),
            ),
            Kind::Record(rec) => Plan::object(
                rec.members
                    .iter()
                    .map(|m| (m.key.clone(), m.node.validator()))
                    .collect(),
            ),
            Kind::List(item) => Plan::array(item.validator()),
            // Relationship fields are descriptive only.
            Kind::Pointer(_) | Kind::Iterator(_) => Plan::check(Predicate::Anything),
        }
    }

    // -- serialize / parse --------------------------------------------------

    /// Serialize a value for the wire.
    ///
    /// `None` is the dropped-key convention: pointer and iterator fields
    /// always yield it, and enclosing dictionaries omit the key entirely.
    /// Absent input yields `Some(Null)` - an explicit null distinguishes
    /// "intentionally empty" from "key omitted".
    pub fn serialize(&self, value: Option<&Value>) -> Option<Value> {
        if matches!(self.kind, Kind::Pointer(_) | Kind::Iterator(_)) {
            return None;
        }
        let value = match value {
            None | Some(Value::Null) => return Some(Value::Null),
            Some(v) => v,
        };
        match &self.kind {
            Kind::Scalar(_) => Some(value.clone()),
            Kind::List(item) => match value {
                Value::Array(items) => Some(Value::Array(
                    items
                        .iter()
                        .map(|v| item.serialize(Some(v)).unwrap_or(Value::Null))
                        .collect(),
                )),
                other => Some(other.clone()),
            },
            Kind::Dictionary(members) => serialize_members(members, value),
            Kind::Record(rec) => serialize_members(&rec.members, value),
            Kind::Pointer(_) | Kind::Iterator(_) => None,
        }
    }

    /// Parse a wire value back into a value. Structurally symmetric with
    /// [`TypeNode::serialize`].
    pub fn parse(&self, wire: Option<&Value>) -> Option<Value> {
        if matches!(self.kind, Kind::Pointer(_) | Kind::Iterator(_)) {
            return None;
        }
        let wire = match wire {
            None | Some(Value::Null) => return Some(Value::Null),
            Some(v) => v,
        };
        match &self.kind {
            Kind::Scalar(_) => Some(wire.clone()),
            Kind::List(item) => match wire {
                Value::Array(items) => Some(Value::Array(
                    items
                        .iter()
                        .map(|v| item.parse(Some(v)).unwrap_or(Value::Null))
                        .collect(),
                )),
                other => Some(other.clone()),
            },
            Kind::Dictionary(members) => parse_members(members, wire),
            Kind::Record(rec) => parse_members(&rec.members, wire),
            Kind::Pointer(_) | Kind::Iterator(_) => None,
        }
    }
}

fn serialize_members(members: &[Member], value: &Value) -> Option<Value> {
    let map = match value {
        Value::Object(map) => map,
        other => return Some(other.clone()),
    };
    let mut out = serde_json::Map::new();
    for member in members {
        // A member serializing to the dropped-key convention is simply not
        // assigned; explicit nulls are retained.
        if let Some(v) = member.node.serialize(map.get(&member.key)) {
            out.insert(member.key.clone(), v);
        }
    }
    Some(Value::Object(out))
}

fn parse_members(members: &[Member], wire: &Value) -> Option<Value> {
    let map = match wire {
        Value::Object(map) => map,
        other => return Some(other.clone()),
    };
    let mut out = serde_json::Map::new();
    for member in members {
        if let Some(v) = member.node.parse(map.get(&member.key)) {
            out.insert(member.key.clone(), v);
        }
    }
    Some(Value::Object(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_returns_new_node() {
        let a = text();
        let b = a.required(true);
        assert!(!a.is_required());
        assert!(b.is_required());
        assert_eq!(a.kind(), b.required(false).kind());
    }

    #[test]
    fn test_named_wins_over_record_name() {
        let rec = record("Author", vec![("name", text())]);
        assert_eq!(rec.name(), Some("Author"));
        assert_eq!(rec.named(Some("Writer")).name(), Some("Writer"));
        assert_eq!(rec.named(None).name(), Some("Author"));
    }

    #[test]
    fn test_scalar_bases() {
        assert_eq!(
            single_line().base().map(|n| n.label().kind),
            Some(text().label().kind)
        );
        assert_eq!(
            integer().base().map(|n| n.label().kind),
            Some(number().label().kind)
        );
        assert!(text().base().is_none());
        assert!(any().base().is_none());
        assert!(list(text()).base().is_none());
    }

    #[test]
    fn test_base_preserves_requiredness() {
        let node = single_line().required(true);
        assert!(node.base().unwrap().is_required());
    }

    #[test]
    fn test_list_item_label_is_structural() {
        let label = list(text().required(true)).label();
        match label.kind {
            crate::label::LabelKind::List { item } => {
                assert_eq!(item.optionality, crate::label::Optionality::None);
            }
            other => panic!("expected list label, got {:?}", other),
        }
    }

    #[test]
    fn test_serialize_retains_explicit_null() {
        let author = dictionary([("first", text()), ("last", text())]);
        let out = author
            .serialize(Some(&json!({"first": "A", "last": null})))
            .unwrap();
        assert_eq!(out, json!({"first": "A", "last": null}));
    }

    #[test]
    fn test_serialize_drops_relationship_fields() {
        let node = dictionary([("hed", text()), ("author", has_one("Author"))]);
        let out = node
            .serialize(Some(&json!({"hed": "x", "author": {"id": 1}})))
            .unwrap();
        assert_eq!(out, json!({"hed": "x"}));
    }

    #[test]
    fn test_round_trip() {
        let node = dictionary([
            ("hed", single_line().required(true)),
            ("tags", list(text())),
            ("geo", dictionary([("lat", integer()), ("long", integer())])),
        ]);
        let value = json!({
            "hed": "a",
            "tags": ["x", "y"],
            "geo": {"lat": 1, "long": 2},
        });
        let wire = node.serialize(Some(&value)).unwrap();
        let back = node.parse(Some(&wire)).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_absent_serializes_to_explicit_null() {
        assert_eq!(text().serialize(None), Some(Value::Null));
        assert_eq!(text().serialize(Some(&Value::Null)), Some(Value::Null));
    }
}
