//! Source-form backend
//!
//! Renders a label back into the constructor calls that would declare it,
//! so a shape can be round-tripped through text. Named labels that are not
//! pointer or iterator targets come out as `reference("Name")` calls, since
//! their definitions live in the registry, not in this declaration.

use crate::label::Label;
use crate::render::RenderOptions;
use crate::report::Reporter;
use crate::visit::{render_with, GenericKind, Position, ReporterDelegate};

pub fn render(label: &Label) -> String {
    let mut backend = SourceBackend::default();
    render_with(label, &mut backend, &RenderOptions::default())
}

fn constructor(type_name: &str) -> &'static str {
    match type_name {
        "text" => "text()",
        "single-line" => "single_line()",
        "single-word" => "single_word()",
        "number" => "number()",
        "integer" => "integer()",
        "boolean" => "boolean()",
        "any" => "any()",
        other => panic!("traversal protocol error: unreachable primitive {other}"),
    }
}

#[derive(Default)]
struct SourceBackend {
    /// Requiredness of pending members, resolved at close_value
    required_stack: Vec<bool>,
}

impl ReporterDelegate for SourceBackend {
    fn backend_name(&self) -> &'static str {
        "source"
    }

    fn open_schema(&mut self, _reporter: &mut Reporter, _options: &RenderOptions) {}

    fn close_schema(&mut self, reporter: &mut Reporter, _options: &RenderOptions) {
        reporter.writeln("");
    }

    fn open_dictionary(&mut self, reporter: &mut Reporter, label: &Label, position: Position) {
        if position == Position::WholeSchema {
            if let Some(name) = &label.name {
                reporter.write("record(\"");
                reporter.write(name);
                reporter.write("\", {");
            } else {
                reporter.write("dictionary({");
            }
        } else {
            reporter.write("dictionary({");
        }
        reporter.writeln("");
        reporter.indent();
    }

    fn close_dictionary(&mut self, reporter: &mut Reporter, _label: &Label, _position: Position) {
        reporter.outdent();
        let pad = reporter.pad();
        reporter.write(&pad);
        reporter.write("})");
    }

    fn emit_key(&mut self, reporter: &mut Reporter, key: &str, _position: Position, required: bool) {
        let pad = reporter.pad();
        reporter.write(&pad);
        reporter.write(key);
        reporter.write(": ");
        self.required_stack.push(required);
    }

    fn close_value(&mut self, reporter: &mut Reporter, _position: Position) {
        let required = self
            .required_stack
            .pop()
            .unwrap_or_else(|| panic!("traversal protocol error: close_value without emit_key"));
        if required {
            reporter.write(".required(true)");
        }
        reporter.writeln(",");
    }

    fn open_generic(&mut self, reporter: &mut Reporter, kind: GenericKind, _position: Position) {
        match kind {
            GenericKind::List => reporter.write("list("),
            GenericKind::Pointer => reporter.write("has_one("),
            GenericKind::Iterator => reporter.write("has_many("),
        }
    }

    fn close_generic(&mut self, reporter: &mut Reporter, _kind: GenericKind, _position: Position) {
        reporter.write(")");
    }

    fn emit_primitive(&mut self, reporter: &mut Reporter, type_name: &str, _position: Position) {
        reporter.write(constructor(type_name));
    }

    fn end_primitive(&mut self, _reporter: &mut Reporter, _position: Position) {}

    fn emit_named_type(&mut self, reporter: &mut Reporter, name: &str, position: Position) {
        match position {
            Position::PointerItem | Position::IteratorItem => {
                reporter.write("\"");
                reporter.write(name);
                reporter.write("\"");
            }
            _ => {
                reporter.write("reference(\"");
                reporter.write(name);
                reporter.write("\")");
            }
        }
    }
}
