//! Restyle CLI - inspect stylesheets and resolve styles from the command line

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use restyle::{
    DispatchHandle, EngineConfig, ParsePolicy, RuntimeValueStore, ScopeKind, StyleEngine, Value,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "restyle")]
#[command(about = "Parse and resolve server-declared style directives", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a stylesheet and list its styles
    Check {
        /// Stylesheet file
        file: PathBuf,

        /// Drop malformed styles instead of rejecting the sheet
        #[arg(long)]
        lenient: bool,
    },

    /// Resolve one style and print the decoration as JSON
    Resolve {
        /// Stylesheet file
        file: PathBuf,

        /// Style name
        style: String,

        /// Layout scope of the node (Box, Column, Row, LazyItem, AnimatedVisibility)
        #[arg(long)]
        scope: Option<ScopeKind>,

        /// Supply a dispatch callback that logs fired events
        #[arg(long)]
        with_dispatch: bool,

        /// Live node value, `node-id=<json>`; may be repeated
        #[arg(long = "value", value_parser = parse_live_value)]
        values: Vec<(String, Value)>,

        /// Engine configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn parse_live_value(raw: &str) -> Result<(String, Value)> {
    let (id, json) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected `node-id=<json>`, got `{}`", raw))?;
    let value = serde_json::from_str(json)
        .with_context(|| format!("invalid JSON value for `{}`", id))?;
    Ok((id.to_string(), value))
}

fn read_sheet(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file, lenient } => {
            let config = EngineConfig {
                parse_policy: if lenient {
                    ParsePolicy::DropInvalidStyles
                } else {
                    ParsePolicy::Strict
                },
                ..EngineConfig::default()
            };
            let engine = StyleEngine::new(config, RuntimeValueStore::new());
            let report = engine.load_style_sheet(&read_sheet(&file)?)?;

            println!("{} style(s)", report.styles);
            for name in engine.style_names() {
                println!("  {}", name);
            }
            for err in &report.dropped {
                println!("dropped: {}", err);
            }
        }

        Commands::Resolve {
            file,
            style,
            scope,
            with_dispatch,
            values,
            config,
        } => {
            let config = match config {
                Some(path) => EngineConfig::load(&path)
                    .with_context(|| format!("Failed to load config {:?}", path))?,
                None => EngineConfig::default(),
            };
            let store = RuntimeValueStore::new();
            for (id, value) in values {
                store.set(id, value);
            }
            let engine = StyleEngine::new(config, store);
            engine.load_style_sheet(&read_sheet(&file)?)?;

            let dispatch = with_dispatch.then(|| {
                DispatchHandle::new(|event_type, event_name, value, params| {
                    tracing::info!(event_type, event_name, ?value, ?params, "dispatch");
                })
            });
            let decoration = engine.resolve(&style, scope, dispatch.as_ref());
            println!("{}", serde_json::to_string_pretty(&decoration)?);
        }
    }

    Ok(())
}
