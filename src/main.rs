//! import-pruner: Prune unused imports in parsed Java compilation units.
//!
//! This tool reads the type-attributed units a parser front end serializes as
//! `*.unit.json`, decides which imports are still needed, rebalances wildcard
//! imports against the configured style thresholds, and reports or writes
//! back the result.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, Commands, ScanArgs, StyleArgs};
use colored::Colorize;
use dialoguer::Confirm;
use import_pruner::config::StyleThresholds;
use import_pruner::report::{RunResult, prune_files};
use import_pruner::scanner::{collect_unit_files, store_unit};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Check { scan, style, json } => cmd_check(&scan, &style, json, args.verbose),
        Commands::Apply {
            write,
            interactive,
            scan,
            style,
        } => cmd_apply(write, interactive, &scan, &style),
        Commands::Style { style } => cmd_style(&style),
        Commands::Scan { scan } => cmd_scan(&scan),
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("IMPORT_PRUNER_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let filter = if verbose {
        filter.add_directive(tracing::Level::DEBUG.into())
    } else {
        filter
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_style(style: &StyleArgs) -> Result<(StyleThresholds, Option<PathBuf>)> {
    let (thresholds, source) = StyleThresholds::discover(style.config.as_deref())?;
    let thresholds = thresholds.with_overrides(style.class_count, style.name_count, &style.fold);
    Ok((thresholds, source))
}

fn collect_files(scan: &ScanArgs) -> Result<Vec<PathBuf>> {
    collect_unit_files(&scan.scan_paths(), &scan.exclude, !scan.no_default_excludes)
}

fn cmd_check(scan: &ScanArgs, style: &StyleArgs, json_output: bool, verbose: bool) -> Result<()> {
    let files = collect_files(scan)?;
    if verbose {
        eprintln!(
            "{} Found {} unit files to check",
            "info:".blue().bold(),
            files.len()
        );
    }
    let (thresholds, _) = load_style(style)?;
    let result = prune_files(&files, &thresholds)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_run_result(&result, verbose);
    }

    Ok(())
}

fn cmd_apply(write: bool, interactive: bool, scan: &ScanArgs, style: &StyleArgs) -> Result<()> {
    let files = collect_files(scan)?;
    let (thresholds, _) = load_style(style)?;
    let result = prune_files(&files, &thresholds)?;

    if result.changed.is_empty() {
        println!("{} No changes to apply", "info:".blue().bold());
        return Ok(());
    }

    let mut written = 0;
    for report in &result.changed {
        println!(
            "\n{} {}",
            if write || interactive {
                "Updating:"
            } else {
                "Would update:"
            }
            .yellow()
            .bold(),
            report.file.display()
        );
        print_changes(&report.changes.removed, &report.changes.added);

        let apply = if interactive {
            Confirm::new()
                .with_prompt(format!("Apply changes to {}?", report.file.display()))
                .default(true)
                .interact()
                .context("Failed to read confirmation")?
        } else {
            write
        };
        if apply {
            store_unit(&report.file, &report.unit)?;
            written += 1;
        }
    }

    if write || interactive {
        println!(
            "\n{} Updated {} of {} file(s)",
            "ok:".green().bold(),
            written,
            result.changed.len()
        );
    } else {
        println!("\n{} Use --write to apply changes", "hint:".cyan().bold());
    }

    Ok(())
}

fn cmd_style(style: &StyleArgs) -> Result<()> {
    let (thresholds, source) = load_style(style)?;
    thresholds.print(source.as_deref());
    Ok(())
}

fn cmd_scan(scan: &ScanArgs) -> Result<()> {
    let files = collect_files(scan)?;

    println!("Would process {} files:", files.len());
    for file in files {
        println!("  {}", file.display());
    }

    Ok(())
}

fn print_changes(removed: &[String], added: &[String]) {
    for line in removed {
        println!("  {} {}", "-".red(), line.red());
    }
    for line in added {
        println!("  {} {}", "+".green(), line.green());
    }
}

fn print_run_result(result: &RunResult, verbose: bool) {
    let d = &result.diagnostics;

    if verbose {
        println!(
            "\n{} Files: {}, Changed: {}, Abstained: {}",
            "Diagnostics:".bold(),
            d.files_scanned,
            d.units_changed,
            d.abstained
        );
        println!(
            "             Imports removed: {}, Imports added: {}",
            d.imports_removed, d.imports_added
        );
    }

    if d.abstained > 0 {
        eprintln!(
            "{} Skipped {} unit(s) with unresolved types",
            "warn:".yellow().bold(),
            d.abstained
        );
    }

    if result.changed.is_empty() {
        println!("{} All imports are in use", "ok:".green().bold());
        return;
    }

    println!(
        "\n{} {} file(s) with import changes:\n",
        "Found".yellow().bold(),
        result.changed.len()
    );

    for report in &result.changed {
        println!("  {}", report.file.display().to_string().dimmed());
        print_changes(&report.changes.removed, &report.changes.added);
    }
}
