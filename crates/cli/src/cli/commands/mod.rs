//! Command handlers.

pub mod auth;
pub mod packages;
pub mod tiers;

use anyhow::{Context, Result};
use serde::Serialize;

/// Write a result to stdout as pretty JSON.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("render output")?;
    println!("{rendered}");
    Ok(())
}
