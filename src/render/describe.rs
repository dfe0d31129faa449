//! Human-description backend

use crate::label::Label;
use crate::render::RenderOptions;
use crate::report::Reporter;
use crate::visit::{render_with, GenericKind, Position, ReporterDelegate};

pub fn render(label: &Label) -> String {
    let mut backend = DescribeBackend::default();
    render_with(label, &mut backend, &RenderOptions::default())
}

fn phrase(type_name: &str) -> &'static str {
    match type_name {
        "text" => "text",
        "single-line" => "a single line of text",
        "single-word" => "a single word",
        "number" => "a number",
        "integer" => "an integer",
        "boolean" => "a boolean",
        "any" => "anything",
        other => panic!("traversal protocol error: unreachable primitive {other}"),
    }
}

#[derive(Default)]
struct DescribeBackend {
    /// Whether the current output line still needs its newline
    line_open: bool,
}

impl ReporterDelegate for DescribeBackend {
    fn backend_name(&self) -> &'static str {
        "describe"
    }

    fn open_schema(&mut self, _reporter: &mut Reporter, _options: &RenderOptions) {}

    fn close_schema(&mut self, reporter: &mut Reporter, _options: &RenderOptions) {
        if self.line_open {
            reporter.writeln("");
            self.line_open = false;
        }
    }

    fn open_dictionary(&mut self, reporter: &mut Reporter, _label: &Label, _position: Position) {
        reporter.writeln("an object containing:");
        reporter.indent();
        self.line_open = false;
    }

    fn close_dictionary(&mut self, reporter: &mut Reporter, _label: &Label, _position: Position) {
        reporter.outdent();
    }

    fn emit_key(&mut self, reporter: &mut Reporter, key: &str, _position: Position, required: bool) {
        let pad = reporter.pad();
        reporter.write(&pad);
        reporter.write("- ");
        reporter.write(key);
        if required {
            reporter.write(" (required)");
        }
        reporter.write(": ");
    }

    fn close_value(&mut self, reporter: &mut Reporter, _position: Position) {
        if self.line_open {
            reporter.writeln("");
            self.line_open = false;
        }
    }

    fn open_generic(&mut self, reporter: &mut Reporter, kind: GenericKind, _position: Position) {
        match kind {
            GenericKind::List => reporter.write("a list of "),
            GenericKind::Pointer => reporter.write("a link to "),
            GenericKind::Iterator => reporter.write("a collection of "),
        }
    }

    fn close_generic(&mut self, _reporter: &mut Reporter, _kind: GenericKind, _position: Position) {}

    fn emit_primitive(&mut self, reporter: &mut Reporter, type_name: &str, _position: Position) {
        reporter.write(phrase(type_name));
        self.line_open = true;
    }

    fn end_primitive(&mut self, _reporter: &mut Reporter, _position: Position) {}

    fn emit_named_type(&mut self, reporter: &mut Reporter, name: &str, _position: Position) {
        reporter.write(name);
        self.line_open = true;
    }
}
