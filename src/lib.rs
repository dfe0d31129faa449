//! Copydesk Schema Toolkit
//!
//! Content schemas with two derived views and pluggable output formats.
//!
//! ## Features
//!
//! - **Type Node Algebra**: Immutable, composable field types with
//!   requiredness and naming toggles
//! - **Draft/Strict Views**: Every schema yields an enforced strict view and
//!   a recursively loosened draft view
//! - **Validation Plans**: Nodes compose declarative plans executed by an
//!   injected engine
//! - **Rendering Backends**: Human description, TypeScript, GraphQL,
//!   structural JSON, and round-trippable source form over one shared
//!   traversal
//! - **Record Registry**: Named records with reference checking and
//!   cycle-safe rendering
//!
//! ## Example
//!
//! ```
//! use copydesk::{Schema, StandardEngine};
//! use copydesk::node::{single_line, text};
//!
//! let episode = Schema::new(
//!     "Episode",
//!     vec![
//!         ("hed", single_line().required(true)),
//!         ("body", text().required(true)),
//!     ],
//! );
//! let engine = StandardEngine::new().unwrap();
//! let errors = episode
//!     .strict()
//!     .validate(&engine, &serde_json::json!({"hed": "Title", "body": "..."}))
//!     .unwrap();
//! assert!(errors.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod label;
pub mod loader;
pub mod node;
pub mod refine;
pub mod registry;
pub mod render;
pub mod report;
pub mod schema;
pub mod validate;
pub mod visit;

pub use error::{Result, SchemaError};
pub use label::{Label, LabelKind, Optionality};
pub use node::{Kind, TypeNode};
pub use refine::View;
pub use registry::TypeRegistry;
pub use render::RenderOptions;
pub use schema::Schema;
pub use validate::{Plan, StandardEngine, ValidationEngine, ValidationError};
