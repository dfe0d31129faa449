//! Structural JSON backend
//!
//! Dumps the label tree as plain data for tooling, and collects the
//! inventory of declared type names a shape depends on. Neither output is a
//! string, so both walk the label directly instead of going through the
//! reporter.

use serde_json::{json, Value};

use crate::label::{Label, LabelKind, Optionality};

/// JSON projection of a label tree
pub fn render(label: &Label) -> Value {
    let mut out = json!({
        "kind": label.kind_name(),
        "optionality": optionality_str(label.optionality),
    });
    if let Some(name) = &label.name {
        out["name"] = json!(name);
    }

    match &label.kind {
        LabelKind::Primitive { type_name } => {
            out["type"] = json!(type_name);
        }
        LabelKind::List { item } => {
            out["item"] = render(item);
        }
        LabelKind::Dictionary { members } => {
            let fields: Vec<Value> = members
                .iter()
                .map(|(key, member)| {
                    let mut field = render(member);
                    field["key"] = json!(key);
                    field
                })
                .collect();
            out["members"] = Value::Array(fields);
        }
        LabelKind::Pointer { target } | LabelKind::Iterator { target } => {
            out["target"] = json!(target);
        }
    }
    out
}

/// Sorted, de-duplicated names of declared types the label refers to,
/// whether by registered name or by pointer/iterator target.
pub fn inventory(label: &Label) -> Vec<String> {
    let mut names = Vec::new();
    collect(label, true, &mut names);
    names.sort();
    names.dedup();
    names
}

fn collect(label: &Label, root: bool, names: &mut Vec<String>) {
    if !root {
        if let Some(name) = &label.name {
            names.push(name.clone());
            return;
        }
    }
    match &label.kind {
        LabelKind::Primitive { .. } => {}
        LabelKind::List { item } => collect(item, false, names),
        LabelKind::Dictionary { members } => {
            for (_, member) in members {
                collect(member, false, names);
            }
        }
        LabelKind::Pointer { target } | LabelKind::Iterator { target } => {
            names.push(target.clone());
        }
    }
}

fn optionality_str(optionality: Optionality) -> &'static str {
    match optionality {
        Optionality::Required => "required",
        Optionality::Optional => "optional",
        Optionality::None => "none",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{dictionary, has_many, has_one, integer, list, text};

    #[test]
    fn test_structural_dump() {
        let label = dictionary([
            ("hed", text().required(true)),
            ("tags", list(text())),
        ])
        .label();
        // An untoggled root is optional; structural "none" is reserved for
        // container item slots.
        assert_eq!(
            render(&label),
            json!({
                "kind": "dictionary",
                "optionality": "optional",
                "members": [
                    {
                        "kind": "primitive",
                        "optionality": "required",
                        "type": "text",
                        "key": "hed",
                    },
                    {
                        "kind": "list",
                        "optionality": "optional",
                        "key": "tags",
                        "item": {
                            "kind": "primitive",
                            "optionality": "none",
                            "type": "text",
                        },
                    },
                ],
            })
        );
    }

    #[test]
    fn test_named_label_carries_name() {
        let label = text().named(Some("Slug")).label();
        assert_eq!(render(&label)["name"], json!("Slug"));
    }

    #[test]
    fn test_inventory_sorted_and_deduped() {
        let label = dictionary([
            ("author", has_one("Author")),
            ("editor", has_one("Author")),
            ("episodes", has_many("Episode")),
            (
                "nested",
                dictionary([("show", has_one("Show"))]),
            ),
        ])
        .label();
        assert_eq!(inventory(&label), vec!["Author", "Episode", "Show"]);
    }

    #[test]
    fn test_inventory_counts_named_members_without_recursing() {
        let inner = dictionary([("author", has_one("Author"))]).named(Some("Inner"));
        let label = dictionary([("inner", inner), ("count", integer())]).label();
        // The named member is itself the dependency; its insides are not.
        assert_eq!(inventory(&label), vec!["Inner"]);
    }
}
