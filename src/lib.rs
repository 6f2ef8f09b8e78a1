//! Restyle – an interpreter for server-declared UI style directives
//!
//! A server sends stylesheet text mapping style names to lists of directive
//! calls. This crate:
//! - Parses the directive language into an AST ([`syntax`])
//! - Normalises call arguments and resolves named or positional parameters ([`directive`])
//! - Coerces arguments into typed values such as lengths, colors and brushes ([`coerce`])
//! - Resolves styles into composable [`Decoration`]s, caching what it can ([`runtime`])
//!
//! Scoped directives wait for the host's layout scope and action-bound
//! directives for its dispatch callback; until then they resolve to
//! retryable placeholders. Lambda-value arguments are read from the
//! [`RuntimeValueStore`] each time a style is resolved.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Typed value coercions used by directive builders
pub mod coerce;
/// Directive registry, dispatch and decoration model
pub mod directive;
/// Style engine, compiled cache and live value store
pub mod runtime;
/// Directive-language parser
pub mod syntax;

// Re-export key types for convenience
pub use directive::{Decoration, DispatchHandle, Modifier, Placeholder, ScopeKind};
pub use runtime::{EngineConfig, LoadReport, ParsePolicy, RuntimeValueStore, StyleEngine, StyleError};
pub use syntax::{ParseError, StyleSheet, Value};

/// Current version of the restyle crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
