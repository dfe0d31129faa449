//! Golden Tests for Rendering Backends
//!
//! One fixture schema rendered through every backend, asserted against
//! exact expected output. Any formatting drift shows up as a diff here.

use copydesk::node::{
    dictionary, has_many, has_one, integer, list, record, single_line, text,
};
use copydesk::render::{self, RenderOptions};
use copydesk::{Schema, TypeRegistry, View};
use serde_json::json;

fn show() -> Schema {
    Schema::new(
        "Show",
        vec![
            ("title", single_line().required(true)),
            ("summary", text()),
            (
                "geo",
                dictionary([
                    ("lat", integer().required(true)),
                    ("long", integer().required(true)),
                ]),
            ),
            ("tags", list(text()).required(true)),
            ("author", has_one("Author").required(true)),
            ("episodes", has_many("Episode")),
        ],
    )
}

fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .register(record("Author", vec![("name", text().required(true))]))
        .unwrap();
    registry
        .register(record("Episode", vec![("hed", single_line().required(true))]))
        .unwrap();
    registry
}

// =============================================================================
// Describe
// =============================================================================

#[test]
fn test_describe_golden() {
    assert_eq!(
        render::describe(&show().strict().label()),
        "\
an object containing:
  - title (required): a single line of text
  - summary: text
  - geo: an object containing:
    - lat (required): an integer
    - long (required): an integer
  - tags (required): a list of text
  - author (required): a link to Author
  - episodes: a collection of Episode
"
    );
}

// =============================================================================
// TypeScript
// =============================================================================

#[test]
fn test_typescript_golden_strict() {
    assert_eq!(
        render::typescript_interface(&show().strict().label(), &RenderOptions::named("Show")),
        "\
export interface Show {
  title: string;
  summary?: string;
  geo?: {
    lat: number;
    long: number;
  };
  tags: Array<string>;
  author: Author;
  episodes?: Array<Episode>;
}
"
    );
}

#[test]
fn test_typescript_golden_draft() {
    assert_eq!(
        render::typescript_interface(&show().draft().label(), &RenderOptions::named("Show")),
        "\
export interface Show {
  title?: string;
  summary?: string;
  geo?: {
    lat?: number;
    long?: number;
  };
  tags?: Array<string>;
  author?: Author;
  episodes?: Array<Episode>;
}
"
    );
}

// =============================================================================
// GraphQL
// =============================================================================

#[test]
fn test_graphql_golden() {
    let out = render::graphql_schema(
        &show().strict().label(),
        &registry(),
        View::Strict,
        &RenderOptions::named("Show"),
    )
    .unwrap();
    assert_eq!(
        out,
        "\
type Show {
  title: String!
  summary: String
  geo: ShowGeo
  tags: [String]!
  author: Author!
  episodes: [Episode]
}

type ShowGeo {
  lat: Int!
  long: Int!
}

type Author {
  name: String!
}

type Episode {
  hed: String!
}
"
    );
}

#[test]
fn test_graphql_golden_draft() {
    let out = render::graphql_schema(
        &show().draft().label(),
        &registry(),
        View::Draft,
        &RenderOptions::named("Show"),
    )
    .unwrap();
    assert_eq!(
        out,
        "\
type Show {
  title: String
  summary: String
  geo: ShowGeo
  tags: [String]
  author: Author
  episodes: [Episode]
}

type ShowGeo {
  lat: Float
  long: Float
}

type Author {
  name: String
}

type Episode {
  hed: String
}
"
    );
}

// =============================================================================
// Source Form
// =============================================================================

#[test]
fn test_source_golden() {
    assert_eq!(
        render::source_form(&show().strict().label()),
        r#"record("Show", {
  title: single_line().required(true),
  summary: text(),
  geo: dictionary({
    lat: integer().required(true),
    long: integer().required(true),
  }),
  tags: list(text()).required(true),
  author: has_one("Author").required(true),
  episodes: has_many("Episode"),
})
"#
    );
}

// =============================================================================
// Structure and Inventory
// =============================================================================

#[test]
fn test_structure_golden() {
    let schema = Schema::new(
        "Mini",
        vec![("hed", single_line().required(true)), ("tags", list(text()))],
    );
    assert_eq!(
        render::structural_json(&schema.strict().label()),
        json!({
            "kind": "dictionary",
            "optionality": "required",
            "name": "Mini",
            "members": [
                {
                    "kind": "primitive",
                    "optionality": "required",
                    "type": "single-line",
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
fn test_inventory_golden() {
    assert_eq!(
        render::type_inventory(&show().strict().label()),
        vec!["Author", "Episode"]
    );
}
