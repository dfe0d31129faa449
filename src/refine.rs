//! Draft/strict derivation
//!
//! The strict view of a node is the node itself. The draft view is a
//! recursive rewrite that only ever loosens: scalars widen one level toward
//! their base, dictionary members are forced optional, lists lose the
//! non-empty gate by becoming optional at the container level, relationship
//! fields become optional. The rewrite is deterministic and side-effect
//! free; it is recomputed at every call site rather than cached.

use crate::node::{dictionary, has_many, has_one, list, record, Kind, Member, TypeNode};

/// Which of the two linked views a consumer wants. Reference resolution
/// follows the view: a draft root resolves its targets as drafts too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Strict,
    Draft,
}

impl View {
    pub fn apply(&self, node: &TypeNode) -> TypeNode {
        match self {
            View::Strict => strict(node),
            View::Draft => draft(node),
        }
    }
}

/// The strict view: the declared node, unchanged.
pub fn strict(node: &TypeNode) -> TypeNode {
    node.clone()
}

/// Derive the draft counterpart of a declared node.
pub fn draft(node: &TypeNode) -> TypeNode {
    let name = node.name();
    let drafted = match node.kind() {
        // One level of un-refinement; a plain base scalar's draft is itself.
        Kind::Scalar(_) => node.base().unwrap_or_else(|| node.clone()),

        // Every member is forced optional regardless of its declared
        // requiredness, recursively through nested dictionaries.
        Kind::Dictionary(members) => {
            dictionary(draft_members(members)).required(node.is_required())
        }

        // The draft list never enforces non-emptiness and is always optional
        // at the container level, even if the field was declared required.
        Kind::List(item) => list(draft(item)).required(false),

        // Relationship fields reference the draft of the target record
        // (resolved by name at render time) and are always optional.
        Kind::Pointer(target) => has_one(target.clone()).required(false),
        Kind::Iterator(target) => has_many(target.clone()).required(false),

        // A record's draft is the draft of its underlying dictionary; the
        // declared name is retained on both views.
        Kind::Record(rec) => {
            record(rec.name.clone(), draft_members(&rec.members)).required(node.is_required())
        }
    };
    match name {
        Some(name) if !matches!(node.kind(), Kind::Record(_)) => drafted.named(Some(name)),
        _ => drafted,
    }
}

fn draft_members(members: &[Member]) -> Vec<(String, TypeNode)> {
    members
        .iter()
        .map(|m| (m.key.clone(), draft(&m.node).required(false)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::LabelKind;
    use crate::node::{boolean, integer, single_line, text};

    fn members_of(node: &TypeNode) -> Vec<Member> {
        match node.kind() {
            Kind::Dictionary(members) => members.clone(),
            Kind::Record(rec) => rec.members.clone(),
            other => panic!("expected dictionary, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_is_identity() {
        let node = single_line().required(true);
        assert_eq!(strict(&node), node);
    }

    #[test]
    fn test_scalar_widens_one_level() {
        match draft(&single_line()).label().kind {
            LabelKind::Primitive { type_name } => assert_eq!(type_name, "text"),
            other => panic!("expected primitive, got {:?}", other),
        }
        // A plain base scalar's draft is itself.
        assert_eq!(draft(&text()), text());
        assert_eq!(draft(&boolean()), boolean());
    }

    #[test]
    fn test_dictionary_members_forced_optional() {
        let node = dictionary([
            ("hed", single_line().required(true)),
            ("geo", dictionary([("lat", integer().required(true))])),
        ]);
        let drafted = draft(&node);
        for member in members_of(&drafted) {
            assert!(!member.node.is_required(), "member {} stayed required", member.key);
        }
        // Recursively through nested dictionaries.
        let geo = &members_of(&drafted)[1].node;
        assert!(!members_of(geo)[0].node.is_required());
    }

    #[test]
    fn test_required_list_becomes_optional() {
        let node = list(text()).required(true);
        assert!(!draft(&node).is_required());
    }

    #[test]
    fn test_relationships_become_optional() {
        assert!(!draft(&has_one("Author").required(true)).is_required());
        assert!(!draft(&has_many("Episode").required(true)).is_required());
    }

    #[test]
    fn test_record_keeps_name() {
        let rec = record("Episode", vec![("hed", single_line().required(true))]);
        let drafted = draft(&rec);
        assert_eq!(drafted.name(), Some("Episode"));
        assert!(!members_of(&drafted)[0].node.is_required());
    }

    #[test]
    fn test_view_applies_matching_derivation() {
        let node = single_line().required(true);
        assert_eq!(View::Strict.apply(&node), node);
        assert_eq!(View::Draft.apply(&node), draft(&node));
    }

    #[test]
    fn test_draft_is_deterministic() {
        let node = dictionary([("a", single_line().required(true)), ("b", list(text()))]);
        assert_eq!(draft(&node), draft(&node));
    }
}
