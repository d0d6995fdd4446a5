//! Workspace automation for memberdesk.
//!
//! Run with `cargo xtask <task>`. Output goes straight to the terminal.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::process::{Command, ExitCode};

use anyhow::{bail, Context, Result};

const TASKS: &[(&str, &str)] = &[
    ("ci", "fmt, clippy, test and test-features in order"),
    ("fmt", "check formatting"),
    ("clippy", "lint every target with all features"),
    ("test", "run the workspace tests with all features"),
    ("test-features", "check each credential-store feature set on its own"),
    ("codegen", "export wire types to crates/domain/bindings"),
];

/// Feature sets that must build in isolation: the keychain backend is
/// optional and the recording doubles only exist behind `test-utils`.
const FEATURE_SETS: &[(&str, &str)] = &[
    ("memberdesk-common", ""),
    ("memberdesk-common", "keychain"),
    ("memberdesk-common", "test-utils"),
    ("memberdesk-infra", ""),
    ("memberdesk-infra", "keychain"),
    ("memberdesk-cli", ""),
    ("memberdesk-cli", "keychain"),
];

const BINDINGS_DIR: &str = "crates/domain/bindings";

fn main() -> ExitCode {
    let task = std::env::args().nth(1);
    let result = match task.as_deref() {
        Some("ci") => ci(),
        Some("fmt") => cargo(&["fmt", "--all", "--", "--check"]),
        Some("clippy") => cargo(&["clippy", "--workspace", "--all-targets", "--all-features"]),
        Some("test") => cargo(&["test", "--workspace", "--all-features"]),
        Some("test-features") => feature_sets(),
        Some("codegen") => codegen(),
        Some("help") | None => {
            help();
            Ok(())
        }
        Some(other) => {
            help();
            Err(anyhow::anyhow!("unknown task `{other}`"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("xtask: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn help() {
    println!("usage: cargo xtask <task>\n");
    for (name, about) in TASKS {
        println!("  {name:<14} {about}");
    }
}

fn cargo(args: &[&str]) -> Result<()> {
    println!("$ cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status().context("cargo not found")?;
    if !status.success() {
        bail!("`cargo {}` failed", args.join(" "));
    }
    Ok(())
}

fn ci() -> Result<()> {
    cargo(&["fmt", "--all", "--", "--check"])?;
    cargo(&["clippy", "--workspace", "--all-targets", "--all-features"])?;
    cargo(&["test", "--workspace", "--all-features"])?;
    feature_sets()?;
    println!("ci passed");
    Ok(())
}

fn feature_sets() -> Result<()> {
    for &(package, features) in FEATURE_SETS {
        let mut args = vec!["check", "-p", package, "--no-default-features"];
        if !features.is_empty() {
            args.extend(["--features", features]);
        }
        cargo(&args)?;
    }
    Ok(())
}

/// ts-rs writes one file per type while the `ts-gen` export tests run;
/// `index.ts` then re-exports them for the dashboard.
fn codegen() -> Result<()> {
    cargo(&["test", "-p", "memberdesk-domain", "--features", "ts-gen", "--lib"])?;

    let dir = Path::new(BINDINGS_DIR);
    let mut modules: Vec<String> = fs::read_dir(dir)
        .with_context(|| format!("no bindings written to {BINDINGS_DIR}"))?
        .filter_map(|entry| entry.ok()?.file_name().into_string().ok())
        .filter_map(|name| name.strip_suffix(".ts").map(str::to_string))
        .filter(|module| module != "index")
        .collect();
    modules.sort();

    let mut index = String::from("// Generated by `cargo xtask codegen`; do not edit.\n\n");
    for module in &modules {
        let _ = writeln!(index, "export type {{ {module} }} from './{module}';");
    }
    fs::write(dir.join("index.ts"), index).context("failed to write index.ts")?;

    println!("exported {} wire types to {BINDINGS_DIR}", modules.len());
    Ok(())
}
