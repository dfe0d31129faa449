//! Position-aware label traversal
//!
//! One shared visitor walks a [`Label`] tree, computes a [`Position`] for
//! every node and dispatches to a [`ReporterDelegate`]. Every rendering
//! backend implements the same flat event protocol; there is exactly one
//! traversal engine.
//!
//! An event reaching a delegate that does not handle it is a programming
//! error in the backend - the default handlers panic and the panic must not
//! be swallowed.

use crate::label::{Label, LabelKind};
use crate::render::RenderOptions;
use crate::report::Reporter;

/// Traversal position of the node being visited. Computed per visit, never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Top-level invocation always begins here
    WholeSchema,
    First,
    Middle,
    Last,
    /// Sole member of a singleton dictionary
    Only,
    ListItem,
    PointerItem,
    IteratorItem,
    /// Wildcard for callers that match on positions
    Any,
}

/// Generic container kinds for `open_generic`/`close_generic`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenericKind {
    List,
    Pointer,
    Iterator,
}

macro_rules! unhandled {
    ($delegate:expr, $event:expr) => {
        panic!(
            "traversal protocol error: delegate {} does not handle {}",
            $delegate, $event
        )
    };
}

/// The flat event protocol every backend implements.
///
/// Defaults panic: a delegate receiving an event it does not override is a
/// backend bug, not a user-facing failure. Backends override with an empty
/// body where an event is reachable but has nothing to emit.
#[allow(unused_variables)]
pub trait ReporterDelegate {
    /// Delegate name used in protocol-error panics
    fn backend_name(&self) -> &'static str;

    fn open_schema(&mut self, reporter: &mut Reporter, options: &RenderOptions) {
        unhandled!(self.backend_name(), "open_schema")
    }

    fn close_schema(&mut self, reporter: &mut Reporter, options: &RenderOptions) {
        unhandled!(self.backend_name(), "close_schema")
    }

    fn open_dictionary(&mut self, reporter: &mut Reporter, label: &Label, position: Position) {
        unhandled!(self.backend_name(), "open_dictionary")
    }

    fn close_dictionary(&mut self, reporter: &mut Reporter, label: &Label, position: Position) {
        unhandled!(self.backend_name(), "close_dictionary")
    }

    fn emit_key(&mut self, reporter: &mut Reporter, key: &str, position: Position, required: bool) {
        unhandled!(self.backend_name(), "emit_key")
    }

    fn close_value(&mut self, reporter: &mut Reporter, position: Position) {
        unhandled!(self.backend_name(), "close_value")
    }

    fn open_generic(&mut self, reporter: &mut Reporter, kind: GenericKind, position: Position) {
        unhandled!(self.backend_name(), "open_generic")
    }

    fn close_generic(&mut self, reporter: &mut Reporter, kind: GenericKind, position: Position) {
        unhandled!(self.backend_name(), "close_generic")
    }

    fn emit_primitive(&mut self, reporter: &mut Reporter, type_name: &str, position: Position) {
        unhandled!(self.backend_name(), "emit_primitive")
    }

    fn end_primitive(&mut self, reporter: &mut Reporter, position: Position) {
        unhandled!(self.backend_name(), "end_primitive")
    }

    fn emit_named_type(&mut self, reporter: &mut Reporter, name: &str, position: Position) {
        unhandled!(self.backend_name(), "emit_named_type")
    }
}

/// Walk one label, dispatching events to the delegate.
///
/// A label carrying a registered name is visited as a named reference
/// instead of being recursed into - except at the top level, where the named
/// shape itself is being rendered. This breaks pointer/iterator cycles
/// structurally.
pub fn visit(
    label: &Label,
    position: Position,
    delegate: &mut dyn ReporterDelegate,
    reporter: &mut Reporter,
) {
    if position != Position::WholeSchema {
        if let Some(name) = &label.name {
            delegate.emit_named_type(reporter, name, position);
            return;
        }
    }

    match &label.kind {
        LabelKind::Primitive { type_name } => {
            delegate.emit_primitive(reporter, type_name, position);
            delegate.end_primitive(reporter, position);
        }

        LabelKind::Dictionary { members } => {
            delegate.open_dictionary(reporter, label, position);
            let count = members.len();
            for (index, (key, member)) in members.iter().enumerate() {
                let member_position = if count == 1 {
                    Position::Only
                } else if index == 0 {
                    Position::First
                } else if index == count - 1 {
                    Position::Last
                } else {
                    Position::Middle
                };
                delegate.emit_key(reporter, key, member_position, member.is_required());
                visit(member, member_position, delegate, reporter);
                delegate.close_value(reporter, member_position);
            }
            delegate.close_dictionary(reporter, label, position);
        }

        LabelKind::List { item } => {
            delegate.open_generic(reporter, GenericKind::List, position);
            visit(item, Position::ListItem, delegate, reporter);
            delegate.close_generic(reporter, GenericKind::List, position);
        }

        LabelKind::Pointer { target } => {
            delegate.open_generic(reporter, GenericKind::Pointer, position);
            delegate.emit_named_type(reporter, target, Position::PointerItem);
            delegate.close_generic(reporter, GenericKind::Pointer, position);
        }

        LabelKind::Iterator { target } => {
            delegate.open_generic(reporter, GenericKind::Iterator, position);
            delegate.emit_named_type(reporter, target, Position::IteratorItem);
            delegate.close_generic(reporter, GenericKind::Iterator, position);
        }
    }
}

/// Drive a full traversal: open the schema, visit the root at
/// [`Position::WholeSchema`], close the schema, and return the joined
/// output.
pub fn render_with(
    label: &Label,
    delegate: &mut dyn ReporterDelegate,
    options: &RenderOptions,
) -> String {
    let mut reporter = Reporter::with_indent(&options.indent);
    delegate.open_schema(&mut reporter, options);
    visit(label, Position::WholeSchema, delegate, &mut reporter);
    delegate.close_schema(&mut reporter, options);
    reporter.into_output()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{dictionary, has_one, list, text};

    /// Records every event it sees; nothing is unhandled.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ReporterDelegate for Recorder {
        fn backend_name(&self) -> &'static str {
            "recorder"
        }

        fn open_schema(&mut self, _: &mut Reporter, _: &RenderOptions) {
            self.events.push("open_schema".into());
        }

        fn close_schema(&mut self, _: &mut Reporter, _: &RenderOptions) {
            self.events.push("close_schema".into());
        }

        fn open_dictionary(&mut self, _: &mut Reporter, _: &Label, position: Position) {
            self.events.push(format!("open_dictionary:{:?}", position));
        }

        fn close_dictionary(&mut self, _: &mut Reporter, _: &Label, position: Position) {
            self.events.push(format!("close_dictionary:{:?}", position));
        }

        fn emit_key(&mut self, _: &mut Reporter, key: &str, position: Position, required: bool) {
            self.events
                .push(format!("key:{}:{:?}:{}", key, position, required));
        }

        fn close_value(&mut self, _: &mut Reporter, _: Position) {
            self.events.push("close_value".into());
        }

        fn open_generic(&mut self, _: &mut Reporter, kind: GenericKind, _: Position) {
            self.events.push(format!("open_generic:{:?}", kind));
        }

        fn close_generic(&mut self, _: &mut Reporter, kind: GenericKind, _: Position) {
            self.events.push(format!("close_generic:{:?}", kind));
        }

        fn emit_primitive(&mut self, _: &mut Reporter, type_name: &str, _: Position) {
            self.events.push(format!("primitive:{}", type_name));
        }

        fn end_primitive(&mut self, _: &mut Reporter, _: Position) {}

        fn emit_named_type(&mut self, _: &mut Reporter, name: &str, position: Position) {
            self.events.push(format!("named:{}:{:?}", name, position));
        }
    }

    fn record(label: &Label) -> Vec<String> {
        let mut recorder = Recorder::default();
        let mut reporter = Reporter::new();
        visit(label, Position::WholeSchema, &mut recorder, &mut reporter);
        recorder.events
    }

    #[test]
    fn test_singleton_member_is_only() {
        let events = record(&dictionary([("a", text())]).label());
        assert!(events.contains(&"key:a:Only:false".to_string()));
    }

    #[test]
    fn test_first_middle_last_in_declared_order() {
        let events = record(
            &dictionary([("a", text()), ("b", text()), ("c", text())]).label(),
        );
        let keys: Vec<&String> = events.iter().filter(|e| e.starts_with("key:")).collect();
        assert_eq!(keys[0], "key:a:First:false");
        assert_eq!(keys[1], "key:b:Middle:false");
        assert_eq!(keys[2], "key:c:Last:false");
    }

    #[test]
    fn test_list_item_position_is_fixed() {
        let events = record(&list(text()).label());
        assert_eq!(
            events,
            vec![
                "open_generic:List".to_string(),
                "primitive:text".to_string(),
                "close_generic:List".to_string(),
            ]
        );
    }

    #[test]
    fn test_pointer_emits_named_reference() {
        let events = record(&has_one("Author").label());
        assert!(events.contains(&"named:Author:PointerItem".to_string()));
    }

    #[test]
    fn test_named_label_is_not_recursed_into() {
        let inner = dictionary([("x", text())]).named(Some("Inner"));
        let events = record(&dictionary([("inner", inner)]).label());
        assert!(events.contains(&"named:Inner:Only".to_string()));
        // The inner dictionary's own members never fire events.
        assert!(!events.iter().any(|e| e.starts_with("key:x")));
    }

    #[test]
    #[should_panic(expected = "does not handle")]
    fn test_unhandled_event_panics() {
        struct Empty;
        impl ReporterDelegate for Empty {
            fn backend_name(&self) -> &'static str {
                "empty"
            }
        }
        let mut reporter = Reporter::new();
        visit(
            &text().label(),
            Position::WholeSchema,
            &mut Empty,
            &mut reporter,
        );
    }
}
