//! GraphQL schema backend
//!
//! Anonymous nested dictionaries cannot be inlined in GraphQL, so this
//! backend hoists them: it synthesizes a type name from the enclosing type
//! and field, pushes a reporter frame for the hoisted declaration, and pops
//! back to the parent field. Named types referenced by the root label are
//! emitted as their own top-level declarations, resolved through the
//! registry.

use crate::error::Result;
use crate::label::Label;
use crate::refine::View;
use crate::registry::TypeRegistry;
use crate::render::{to_pascal_case, RenderOptions};
use crate::report::Reporter;
use crate::visit::{render_with, GenericKind, Position, ReporterDelegate};

pub fn render(
    label: &Label,
    registry: &TypeRegistry,
    view: View,
    options: &RenderOptions,
) -> Result<String> {
    let reachable = registry.reachable_from(label)?;
    tracing::debug!(types = reachable.len() + 1, ?view, "rendering graphql schema");

    let mut out = render_one(label, &options.name, options);
    for name in &reachable {
        // Resolution follows the view: a draft root gets drafted targets.
        let record = match view {
            View::Strict => registry.get(name).cloned(),
            View::Draft => registry.draft_view(name),
        }
        .ok_or_else(|| crate::error::SchemaError::UnknownTarget(name.clone()))?;
        out.push('\n');
        out.push_str(&render_one(&record.label(), name, options));
    }
    Ok(out)
}

fn render_one(label: &Label, name: &str, options: &RenderOptions) -> String {
    let options = RenderOptions {
        name: name.to_string(),
        scalar_map: options.scalar_map.clone(),
        indent: options.indent.clone(),
    };
    let mut backend = GraphqlBackend::default();
    render_with(label, &mut backend, &options)
}

#[derive(Default)]
struct GraphqlBackend {
    /// Enclosing type names; the top is the type being written
    type_stack: Vec<String>,
    /// Pending (key, required) pairs, resolved at close_value
    key_stack: Vec<(String, bool)>,
    scalar_map: std::collections::BTreeMap<String, String>,
}

impl GraphqlBackend {
    fn current_type(&self) -> &str {
        self.type_stack
            .last()
            .map(String::as_str)
            .unwrap_or_else(|| panic!("traversal protocol error: no enclosing graphql type"))
    }

    fn current_key(&self) -> &str {
        self.key_stack
            .last()
            .map(|(key, _)| key.as_str())
            .unwrap_or_else(|| panic!("traversal protocol error: no pending graphql field"))
    }
}

impl ReporterDelegate for GraphqlBackend {
    fn backend_name(&self) -> &'static str {
        "graphql"
    }

    fn open_schema(&mut self, _reporter: &mut Reporter, options: &RenderOptions) {
        self.type_stack.push(to_pascal_case(&options.name));
        self.scalar_map = options.scalar_map.clone();
    }

    fn close_schema(&mut self, _reporter: &mut Reporter, _options: &RenderOptions) {
        self.type_stack.pop();
    }

    fn open_dictionary(&mut self, reporter: &mut Reporter, _label: &Label, position: Position) {
        if position == Position::WholeSchema {
            reporter.write("type ");
            reporter.write(&self.current_type().to_string());
            reporter.writeln(" {");
            reporter.indent();
            return;
        }

        // Hoist: the field references a synthesized type, declared in its
        // own frame.
        let synthesized = format!(
            "{}{}",
            self.current_type(),
            to_pascal_case(self.current_key())
        );
        reporter.write(&synthesized);
        reporter.push_frame(Some(&synthesized));
        reporter.writeln("");
        reporter.write("type ");
        reporter.write(&synthesized);
        reporter.writeln(" {");
        reporter.indent();
        self.type_stack.push(synthesized);
    }

    fn close_dictionary(&mut self, reporter: &mut Reporter, _label: &Label, position: Position) {
        reporter.outdent();
        reporter.writeln("}");
        if position != Position::WholeSchema {
            reporter.pop_frame();
            self.type_stack.pop();
        }
    }

    fn emit_key(&mut self, reporter: &mut Reporter, key: &str, _position: Position, required: bool) {
        let pad = reporter.pad();
        reporter.write(&pad);
        reporter.write(key);
        reporter.write(": ");
        self.key_stack.push((key.to_string(), required));
    }

    fn close_value(&mut self, reporter: &mut Reporter, _position: Position) {
        let (_, required) = self
            .key_stack
            .pop()
            .unwrap_or_else(|| panic!("traversal protocol error: close_value without emit_key"));
        if required {
            reporter.write("!");
        }
        reporter.writeln("");
    }

    fn open_generic(&mut self, reporter: &mut Reporter, kind: GenericKind, _position: Position) {
        match kind {
            GenericKind::List | GenericKind::Iterator => reporter.write("["),
            GenericKind::Pointer => {}
        }
    }

    fn close_generic(&mut self, reporter: &mut Reporter, kind: GenericKind, _position: Position) {
        match kind {
            GenericKind::List | GenericKind::Iterator => reporter.write("]"),
            GenericKind::Pointer => {}
        }
    }

    fn emit_primitive(&mut self, reporter: &mut Reporter, type_name: &str, _position: Position) {
        let mapped = if let Some(mapped) = self.scalar_map.get(type_name) {
            mapped.clone()
        } else {
            match type_name {
                "text" | "single-line" | "single-word" => "String".to_string(),
                "integer" => "Int".to_string(),
                "number" => "Float".to_string(),
                "boolean" => "Boolean".to_string(),
                "any" => "JSON".to_string(),
                other => panic!("traversal protocol error: unreachable primitive {other}"),
            }
        };
        reporter.write(&mapped);
    }

    fn end_primitive(&mut self, _reporter: &mut Reporter, _position: Position) {}

    fn emit_named_type(&mut self, reporter: &mut Reporter, name: &str, _position: Position) {
        reporter.write(name);
    }
}
