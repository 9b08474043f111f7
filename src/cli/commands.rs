//! Subcommand implementations.

use crate::cli::{Cli, OutputFormat};
use crate::config::StackConfig;
use crate::context::Context;
use crate::error::Result;
use crate::stack::{Stack, StackVariant};
use serde::Serialize;
use tracing::info;

/// Builds the context from the configured file (if any) plus CLI overrides.
pub fn build_context(cli: &Cli) -> Result<Context> {
    let mut ctx = match &cli.context_file {
        Some(path) => Context::from_file(path)?,
        None => Context::new(),
    };
    ctx.apply_overrides(&cli.context)?;
    Ok(ctx)
}

/// `synth`: resolve, declare, and emit the full intent tree.
pub fn synth(cli: &Cli) -> Result<i32> {
    let ctx = build_context(cli)?;
    let config = StackConfig::resolve(&ctx, cli.variant.has_database());
    let stack = Stack::declare(&config, cli.variant);
    info!(
        stack = %stack.name,
        variant = %stack.variant,
        "declared stack topology"
    );
    emit(&stack, cli.output)?;
    Ok(0)
}

/// `config`: resolve and emit the configuration record only.
pub fn config(cli: &Cli) -> Result<i32> {
    let ctx = build_context(cli)?;
    let config = StackConfig::resolve(&ctx, cli.variant.has_database());
    emit(&config, cli.output)?;
    Ok(0)
}

/// `variants`: list the stack variants this tool can declare.
pub fn variants() -> i32 {
    for variant in [
        StackVariant::ComputeSsh,
        StackVariant::FullSsh,
        StackVariant::FullSessionManager,
    ] {
        let database = if variant.has_database() {
            "postgres-16"
        } else {
            "none"
        };
        let access = if variant.has_ssh_ingress() {
            "ssh"
        } else {
            "session-manager"
        };
        println!("{variant}\taccess={access}\tdatabase={database}");
    }
    0
}

fn emit<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
    }
    Ok(())
}
