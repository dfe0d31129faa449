//! TypeScript interface backend

use crate::label::Label;
use crate::render::{to_pascal_case, RenderOptions};
use crate::report::Reporter;
use crate::visit::{render_with, GenericKind, Position, ReporterDelegate};

pub fn render(label: &Label, options: &RenderOptions) -> String {
    let mut backend = TypescriptBackend;
    render_with(label, &mut backend, options)
}

fn ts_type(type_name: &str) -> &'static str {
    match type_name {
        "text" | "single-line" | "single-word" => "string",
        "number" | "integer" => "number",
        "boolean" => "boolean",
        "any" => "any",
        other => panic!("traversal protocol error: unreachable primitive {other}"),
    }
}

struct TypescriptBackend;

impl ReporterDelegate for TypescriptBackend {
    fn backend_name(&self) -> &'static str {
        "typescript"
    }

    fn open_schema(&mut self, reporter: &mut Reporter, options: &RenderOptions) {
        reporter.write("export interface ");
        reporter.write(&to_pascal_case(&options.name));
        reporter.write(" ");
    }

    fn close_schema(&mut self, reporter: &mut Reporter, _options: &RenderOptions) {
        reporter.writeln("");
    }

    fn open_dictionary(&mut self, reporter: &mut Reporter, _label: &Label, _position: Position) {
        reporter.writeln("{");
        reporter.indent();
    }

    fn close_dictionary(&mut self, reporter: &mut Reporter, _label: &Label, _position: Position) {
        reporter.outdent();
        let pad = reporter.pad();
        reporter.write(&pad);
        reporter.write("}");
    }

    fn emit_key(&mut self, reporter: &mut Reporter, key: &str, _position: Position, required: bool) {
        let pad = reporter.pad();
        reporter.write(&pad);
        reporter.write(key);
        if !required {
            reporter.write("?");
        }
        reporter.write(": ");
    }

    fn close_value(&mut self, reporter: &mut Reporter, _position: Position) {
        reporter.writeln(";");
    }

    fn open_generic(&mut self, reporter: &mut Reporter, kind: GenericKind, _position: Position) {
        match kind {
            GenericKind::List | GenericKind::Iterator => reporter.write("Array<"),
            GenericKind::Pointer => {}
        }
    }

    fn close_generic(&mut self, reporter: &mut Reporter, kind: GenericKind, _position: Position) {
        match kind {
            GenericKind::List | GenericKind::Iterator => reporter.write(">"),
            GenericKind::Pointer => {}
        }
    }

    fn emit_primitive(&mut self, reporter: &mut Reporter, type_name: &str, _position: Position) {
        reporter.write(ts_type(type_name));
    }

    fn end_primitive(&mut self, _reporter: &mut Reporter, _position: Position) {}

    fn emit_named_type(&mut self, reporter: &mut Reporter, name: &str, _position: Position) {
        reporter.write(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{boolean, dictionary, has_many, has_one, integer, list, single_line, text};

    #[test]
    fn test_interface_declaration() {
        let label = dictionary([
            ("hed", single_line().required(true)),
            ("dek", text()),
            ("explicit", boolean().required(true)),
        ])
        .label();
        assert_eq!(
            render(&label, &RenderOptions::named("Episode")),
            "export interface Episode {\n\
             \x20 hed: string;\n\
             \x20 dek?: string;\n\
             \x20 explicit: boolean;\n\
             }\n"
        );
    }

    #[test]
    fn test_nested_and_generics() {
        let label = dictionary([
            ("tags", list(text()).required(true)),
            ("geo", dictionary([("lat", integer().required(true))])),
            ("author", has_one("Author")),
            ("episodes", has_many("Episode").required(true)),
        ])
        .label();
        assert_eq!(
            render(&label, &RenderOptions::named("Show")),
            "export interface Show {\n\
             \x20 tags: Array<string>;\n\
             \x20 geo?: {\n\
             \x20   lat: number;\n\
             \x20 };\n\
             \x20 author?: Author;\n\
             \x20 episodes: Array<Episode>;\n\
             }\n"
        );
    }
}
