use std::io::{self, IsTerminal, Write};
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use serde_json::{json, Value};
use tracing::info;

use apicat_catalog::{ApiNode, AvailabilityContext, Catalog, PlatformContext};
use apicat_diff::{
    write_diff, ApiDiff, DeclarationResolver, DiffCounts, DiffOptions, DiffWriter, TextDiffWriter,
};

use crate::cli::{Cli, Command, DiffArgs, OutputFormat, PlatformsArgs, ShowArgs};
use crate::console::ConsoleDiffWriter;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let color = stdout.is_terminal();
    if !color {
        colored::control::set_override(false);
    }
    let mut out = stdout.lock();

    match cli.command {
        Command::Diff(args) => cmd_diff(&args, cli.format, color, &mut out),
        Command::Platforms(args) => cmd_platforms(&args, cli.format, &mut out),
        Command::Show(args) => cmd_show(&args, cli.format, &mut out),
    }
}

fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    Catalog::load(path).with_context(|| format!("failed to load catalog {}", path.display()))
}

fn find_api<'a>(catalog: &'a Catalog, name: &str) -> anyhow::Result<&'a ApiNode> {
    catalog
        .find_by_full_name(name)
        .with_context(|| format!("API not found: {name}"))
}

/// Options from the config file (if any), narrowed by the `--no-*` flags.
fn diff_options(args: &DiffArgs) -> anyhow::Result<DiffOptions> {
    let mut options = match &args.config {
        Some(path) => DiffOptions::load(path)
            .with_context(|| format!("failed to load diff options {}", path.display()))?,
        None => DiffOptions::default(),
    };
    if args.no_added {
        options.include_added = false;
    }
    if args.no_removed {
        options.include_removed = false;
    }
    if args.no_changed {
        options.include_changed = false;
    }
    Ok(options)
}

fn cmd_diff(
    args: &DiffArgs,
    format: OutputFormat,
    color: bool,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    let options = diff_options(args)?;
    let ctx = AvailabilityContext::new(&catalog);

    let old = match &args.old {
        Some(framework) => DeclarationResolver::for_framework(&ctx, framework.as_str())?,
        None => DeclarationResolver::null(),
    };
    let new = match &args.package {
        Some(package) => {
            DeclarationResolver::for_package(&ctx, args.new.as_str(), package.as_str())?
        }
        None => DeclarationResolver::for_framework(&ctx, args.new.as_str())?,
    };
    let (old_label, new_label) = (old.to_string(), new.to_string());
    info!(old = %old_label, new = %new_label, ?options, "diffing catalog");

    let diffs = ApiDiff::build_all(&catalog, old, new, options);
    match format {
        OutputFormat::Text => {
            writeln!(out, "{}", format!("{old_label} -> {new_label}").bold())?;
            let total = if color {
                render(diffs, &mut ConsoleDiffWriter::new(&mut *out))?
            } else {
                render(diffs, &mut TextDiffWriter::new(&mut *out))?
            };
            if total.is_empty() {
                writeln!(out, "No differences.")?;
            } else {
                writeln!(out, "{total}")?;
            }
        }
        OutputFormat::Json => {
            let diffs: Vec<Value> = diffs.map(|diff| diff_json(&catalog, &diff)).collect();
            let doc = json!({ "old": old_label, "new": new_label, "diffs": diffs });
            serde_json::to_writer_pretty(&mut *out, &doc)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn render<'a, W: DiffWriter>(
    diffs: impl Iterator<Item = ApiDiff<'a>>,
    writer: &mut W,
) -> io::Result<DiffCounts> {
    let mut total = DiffCounts::default();
    for diff in diffs {
        total += diff.counts();
        write_diff(&diff, writer)?;
    }
    Ok(total)
}

fn diff_json(catalog: &Catalog, diff: &ApiDiff<'_>) -> Value {
    let children: Vec<Value> = diff
        .children()
        .iter()
        .map(|child| diff_json(catalog, child))
        .collect();
    json!({
        "api": catalog.full_name(diff.api()),
        "kind": diff.api().kind,
        "diff": diff.kind().to_string(),
        "old": diff.old_declaration().map(|d| d.markup.to_string()),
        "new": diff.new_declaration().map(|d| d.markup.to_string()),
        "children": children,
    })
}

fn cmd_platforms(
    args: &PlatformsArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    let api = find_api(&catalog, &args.api)?;
    let context = PlatformContext::new(&catalog, &args.framework)?;
    let Some(annotation) = context.annotation(api) else {
        bail!("{} is not available in {}", args.api, args.framework);
    };

    match format {
        OutputFormat::Text => writeln!(out, "{annotation}")?,
        OutputFormat::Json => {
            let platforms: Vec<Value> = annotation
                .entries()
                .iter()
                .map(|entry| {
                    let versions = if entry.range.covers_all_versions() {
                        Value::Null
                    } else {
                        Value::String(entry.range.to_string())
                    };
                    json!({
                        "platform": entry.platform,
                        "name": entry.display_name(),
                        "versions": versions,
                    })
                })
                .collect();
            let doc = json!({
                "api": catalog.full_name(api),
                "framework": args.framework,
                "kind": annotation.kind(),
                "platforms": platforms,
            });
            serde_json::to_writer_pretty(&mut *out, &doc)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn cmd_show(args: &ShowArgs, format: OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    let api = find_api(&catalog, &args.api)?;
    let ctx = AvailabilityContext::new(&catalog);
    if !ctx.has_framework(&args.framework) {
        bail!("unknown framework: {}", args.framework);
    }
    let Some(availability) = ctx.availability(api.id, &args.framework) else {
        bail!("{} is not available in {}", args.api, args.framework);
    };
    let declaration = availability.declaration;
    let assembly = catalog
        .assembly(declaration.assembly)
        .map(|a| a.name.as_str())
        .unwrap_or("?");
    let frameworks: Vec<&str> = ctx
        .available_frameworks(api.id)
        .iter()
        .map(|a| a.framework)
        .collect();

    match format {
        OutputFormat::Text => {
            writeln!(out, "{} ({})", catalog.full_name(api).bold(), api.kind)?;
            match availability.package {
                None => writeln!(out, "  {} {}", "in-box:".green(), args.framework)?,
                Some(package) => writeln!(out, "  {} {}", "package:".cyan(), package)?,
            }
            writeln!(out, "  assembly: {assembly}")?;
            writeln!(out, "  available in: {}", frameworks.join(", "))?;
            writeln!(out)?;
            writeln!(out, "{}", declaration.markup)?;
        }
        OutputFormat::Json => {
            let doc = json!({
                "api": catalog.full_name(api),
                "kind": api.kind,
                "framework": args.framework,
                "package": availability.package.map(|p| p.to_string()),
                "assembly": assembly,
                "markup": declaration.markup.to_string(),
                "markup_id": declaration.markup_id.to_hex(),
                "available_in": frameworks,
            });
            serde_json::to_writer_pretty(&mut *out, &doc)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
