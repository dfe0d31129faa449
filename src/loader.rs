//! Schema declaration loader
//!
//! Declarations are JSON documents naming a schema and its fields. A
//! directory of declarations loads into a [`TypeRegistry`] so cross-schema
//! references resolve.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use walkdir::WalkDir;

use crate::error::{Result, SchemaError};
use crate::node::{
    any, boolean, dictionary, has_many, has_one, integer, list, number, single_line, single_word,
    text, TypeNode,
};
use crate::registry::TypeRegistry;
use crate::schema::Schema;

#[derive(Debug, Deserialize)]
struct SchemaDecl {
    name: String,
    fields: Vec<FieldDecl>,
}

#[derive(Debug, Deserialize)]
struct FieldDecl {
    key: String,
    #[serde(flatten)]
    node: NodeDecl,
}

#[derive(Debug, Deserialize)]
struct NodeDecl {
    #[serde(default)]
    required: bool,
    #[serde(flatten)]
    shape: ShapeDecl,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum ShapeDecl {
    Text,
    SingleLine,
    SingleWord,
    Number,
    Integer,
    Boolean,
    Any,
    List { item: Box<NodeDecl> },
    Dictionary { members: Vec<FieldDecl> },
    HasOne { target: String },
    HasMany { target: String },
}

/// Parse one JSON schema declaration.
pub fn parse_schema(json: &str) -> Result<Schema> {
    let decl: SchemaDecl = serde_json::from_str(json)?;
    if decl.name.is_empty() {
        return Err(SchemaError::InvalidDeclaration(
            "schema name must not be empty".to_string(),
        ));
    }
    let fields = build_fields(&decl.fields)?;
    Ok(Schema::new(decl.name, fields))
}

/// Load one declaration file.
pub fn load_file(path: &Path) -> Result<Schema> {
    let json = fs::read_to_string(path)?;
    parse_schema(&json).map_err(|e| match e {
        SchemaError::InvalidDeclaration(msg) => {
            SchemaError::InvalidDeclaration(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Load every `.json` declaration under `dir`, registering each schema's
/// record so cross-schema references resolve. Returns the loaded schemas in
/// path order.
pub fn load_directory(dir: &Path, registry: &mut TypeRegistry) -> Result<Vec<Schema>> {
    let mut schemas = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            SchemaError::InvalidDeclaration(format!("cannot walk {}: {}", dir.display(), e))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let schema = load_file(entry.path())?;
        tracing::info!(name = %schema.name(), path = %entry.path().display(), "loaded schema");
        registry.register(schema.record())?;
        schemas.push(schema);
    }
    Ok(schemas)
}

fn build_fields(fields: &[FieldDecl]) -> Result<Vec<(String, TypeNode)>> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(fields.len());
    for field in fields {
        if !seen.insert(field.key.as_str()) {
            return Err(SchemaError::InvalidDeclaration(format!(
                "duplicate field key: {}",
                field.key
            )));
        }
        out.push((field.key.clone(), build_node(&field.node)?));
    }
    Ok(out)
}

fn build_node(decl: &NodeDecl) -> Result<TypeNode> {
    let node = match &decl.shape {
        ShapeDecl::Text => text(),
        ShapeDecl::SingleLine => single_line(),
        ShapeDecl::SingleWord => single_word(),
        ShapeDecl::Number => number(),
        ShapeDecl::Integer => integer(),
        ShapeDecl::Boolean => boolean(),
        ShapeDecl::Any => any(),
        ShapeDecl::List { item } => list(build_node(item)?),
        ShapeDecl::Dictionary { members } => dictionary(build_fields(members)?),
        ShapeDecl::HasOne { target } => has_one(target.clone()),
        ShapeDecl::HasMany { target } => has_many(target.clone()),
    };
    Ok(node.required(decl.required))
}
