//! Schema Render CLI
//!
//! Loads a directory of schema declarations and renders or validates
//! against them.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use copydesk::config::RenderConfig;
use copydesk::{loader, render, Schema, StandardEngine, TypeRegistry, View};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "copydesk")]
#[command(about = "Render and validate content schemas")]
struct Cli {
    /// Directory of schema declarations
    #[arg(short, long, default_value = "schemas")]
    schemas: PathBuf,

    /// Use the draft view instead of the strict view
    #[arg(long, global = true)]
    draft: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Human-readable description of a schema
    Describe {
        /// Schema name
        name: String,
    },

    /// TypeScript interface declaration
    Interface {
        name: String,
    },

    /// GraphQL schema including every referenced record
    Graphql {
        name: String,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Structural JSON dump
    Structure {
        name: String,
    },

    /// Declared type names the schema depends on
    Inventory {
        name: String,
    },

    /// Round-trippable source form
    Source {
        name: String,
    },

    /// Validate a JSON document against a schema
    Validate {
        name: String,
        /// Document to validate
        file: PathBuf,
    },

    /// Check that every reference across all schemas resolves
    Check,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut registry = TypeRegistry::new();
    let schemas = loader::load_directory(&cli.schemas, &mut registry)?;
    let config = RenderConfig::load()?;

    let find = |name: &str| -> anyhow::Result<&Schema> {
        schemas
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| anyhow::anyhow!("no schema named {:?} in {:?}", name, cli.schemas))
    };
    let view = |schema: &Schema| {
        if cli.draft {
            schema.draft()
        } else {
            schema.strict()
        }
    };

    match &cli.command {
        Commands::Describe { name } => {
            let label = view(find(name)?).label();
            print!("{}", render::describe(&label));
        }

        Commands::Interface { name } => {
            let label = view(find(name)?).label();
            let options = config.typescript_options(name);
            print!("{}", render::typescript_interface(&label, &options));
        }

        Commands::Graphql { name, output } => {
            let label = view(find(name)?).label();
            let options = config.graphql_options(name);
            let resolve = if cli.draft { View::Draft } else { View::Strict };
            let rendered = render::graphql_schema(&label, &registry, resolve, &options)?;
            if let Some(path) = output {
                std::fs::write(path, &rendered)?;
                println!("✅ GraphQL schema written to {:?}", path);
            } else {
                print!("{}", rendered);
            }
        }

        Commands::Structure { name } => {
            let label = view(find(name)?).label();
            println!(
                "{}",
                serde_json::to_string_pretty(&render::structural_json(&label))?
            );
        }

        Commands::Inventory { name } => {
            let label = view(find(name)?).label();
            for dep in render::type_inventory(&label) {
                println!("{}", dep);
            }
        }

        Commands::Source { name } => {
            let label = view(find(name)?).label();
            print!("{}", render::source_form(&label));
        }

        Commands::Validate { name, file } => {
            let node = view(find(name)?);
            let document = serde_json::from_str(&std::fs::read_to_string(file)?)?;
            let engine = StandardEngine::new()?;
            let errors = node.validate(&engine, &document)?;

            if errors.is_empty() {
                println!("✅ {:?} is valid against {}", file, name);
            } else {
                println!("❌ {} validation error(s):", errors.len());
                for error in &errors {
                    println!("  └─ {}: {}", error.dotted_path(), error.message.name);
                }
                std::process::exit(1);
            }
        }

        Commands::Check => {
            registry.check_references()?;
            println!("✅ All references resolve ({} schemas)", registry.len());
        }
    }

    Ok(())
}
