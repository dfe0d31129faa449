//! Render configuration
//!
//! Layered lookup: defaults, then an optional `copydesk.toml` next to the
//! invocation, then `COPYDESK_*` environment variables. Everything here
//! feeds [`RenderOptions`]; nothing in the core algebra reads configuration.

use std::collections::BTreeMap;

use config_crate::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::Result;
use crate::render::RenderOptions;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub typescript: TypescriptConfig,
    pub graphql: GraphqlConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TypescriptConfig {
    pub indent: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphqlConfig {
    pub indent: String,
    /// Scalar overrides, keyed by schema type name (`text`, `integer`, ...)
    pub scalar_map: BTreeMap<String, String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            typescript: TypescriptConfig::default(),
            graphql: GraphqlConfig::default(),
        }
    }
}

impl Default for TypescriptConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
        }
    }
}

impl Default for GraphqlConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            scalar_map: BTreeMap::new(),
        }
    }
}

impl RenderConfig {
    /// Load from `copydesk.toml` (if present) and `COPYDESK_*` environment
    /// variables layered over the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from("copydesk")
    }

    pub fn load_from(basename: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::new(basename, FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("COPYDESK").separator("__"))
            .build()?;
        let loaded = config.try_deserialize()?;
        tracing::debug!("render configuration loaded");
        Ok(loaded)
    }

    pub fn typescript_options(&self, name: &str) -> RenderOptions {
        RenderOptions {
            name: name.to_string(),
            scalar_map: BTreeMap::new(),
            indent: self.typescript.indent.clone(),
        }
    }

    pub fn graphql_options(&self, name: &str) -> RenderOptions {
        RenderOptions {
            name: name.to_string(),
            scalar_map: self.graphql.scalar_map.clone(),
            indent: self.graphql.indent.clone(),
        }
    }
}
