//! # Ministack - A Minimalist Stack Declaration Tool
//!
//! Ministack turns a flat set of named parameters into a declared cloud
//! stack: a VPC, an EC2 instance, and (depending on the variant) an RDS
//! PostgreSQL instance with the security rules wiring them together.
//!
//! ## Core Concepts
//!
//! - **Context**: flat key/value parameters merged from a JSON context file
//!   and `-c key=value` command-line overrides
//! - **Configuration**: one immutable, fully-resolved record produced by a
//!   pure resolver that never fails - invalid input degrades to defaults
//! - **Stack**: a fixed tree of resource intents declared from the
//!   configuration by a pure function
//! - **Variants**: three stack flavors differing only in instance access
//!   model (SSH ingress vs. session manager) and database presence
//!
//! The declared tree is the tool's entire output. Synthesis into a provider
//! template, diffing, and deployment belong to the external provisioning
//! engine that consumes it.
//!
//! ## Quick Example
//!
//! ```rust
//! use ministack::context::Context;
//! use ministack::config::StackConfig;
//! use ministack::stack::{Stack, StackVariant};
//!
//! let ctx = Context::from_iter([("maxAzs", "3"), ("sshCidr", "10.0.0.0/8")]);
//! let variant = StackVariant::FullSsh;
//! let config = StackConfig::resolve(&ctx, variant.has_database());
//! let stack = Stack::declare(&config, variant);
//!
//! assert_eq!(stack.vpc.max_azs, 3);
//! assert!(stack.database.is_some());
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Error types and result aliases for ministack operations.
///
/// Only the outer shell (context file IO, override parsing, serialization)
/// is fallible; resolution and declaration never error.
pub mod error;

/// Context parameter mechanism.
///
/// Merges a JSON context file with command-line overrides into one flat,
/// untyped key/value map.
pub mod context;

/// Stack configuration and the parameter resolver.
///
/// Defines the immutable [`StackConfig`](config::StackConfig) record and the
/// best-effort resolver that clamps, defaults, and coerces raw parameters.
pub mod config;

/// Resource topology declaration.
///
/// Declares the fixed tree of resource intents (VPC, security groups,
/// instance, optional database, outputs) for a configuration and variant.
pub mod stack;

/// CLI argument parsing and subcommand implementations.
///
/// The binary entry point is a thin shell over this module.
pub mod cli;

/// Returns the current version of ministack.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
