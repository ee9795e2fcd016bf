//! ptype - Project type registry CLI
//!
//! Resolves project type manifests and inspects the resulting registry

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ptype_core::{
    load_manifest_dir, ProjectTypeManifest, ProjectTypeRegistry, ResolvedProjectType, TypeOrder,
    ValueProviderCatalog,
};

#[derive(Parser)]
#[command(name = "ptype")]
#[command(version)]
#[command(about = "Project type registry", long_about = None)]
struct Cli {
    /// Manifest file (repeatable)
    #[arg(long = "manifest", short = 'm', global = true)]
    manifests: Vec<PathBuf>,

    /// Directory scanned recursively for *.yaml / *.yml manifests
    #[arg(long, short = 'd', global = true)]
    dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List resolved project types
    List {
        /// Listing order (child-to-parent, parent-to-child, id)
        #[arg(long, default_value = "child-to-parent")]
        order: TypeOrder,
        /// Output format (table, json, yaml)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show one resolved project type with its attributes
    Show {
        /// Project type id
        id: String,
        /// Output format (table, json, yaml)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Check whether a project type is, or inherits from, another
    IsTypeOf {
        /// Project type id
        id: String,
        /// Candidate ancestor id
        candidate: String,
    },
    /// Report definitions dropped during resolution
    Check {
        /// Output format (table, json, yaml)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load every manifest given on the command line and resolve them together
fn load_registry(manifests: &[PathBuf], dir: Option<&PathBuf>) -> anyhow::Result<ProjectTypeRegistry> {
    // Value providers are supplied by host applications, not by this CLI
    let catalog = ValueProviderCatalog::new();
    let mut definitions = Vec::new();

    for path in manifests {
        let manifest = ProjectTypeManifest::load(path)
            .with_context(|| format!("Failed to load manifest {}", path.display()))?;
        definitions.extend(manifest.into_definitions(&catalog)?);
    }

    if let Some(dir) = dir {
        definitions.extend(load_manifest_dir(dir, &catalog)?);
    }

    Ok(ProjectTypeRegistry::new(definitions))
}

fn print_serialized<T: serde::Serialize>(value: &T, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(value)?),
        "yaml" => print!("{}", serde_yaml::to_string(value)?),
        other => bail!("Unknown format: {} (expected table, json or yaml)", other),
    }
    Ok(())
}

fn flags(project_type: &ResolvedProjectType) -> String {
    let mut flags = Vec::new();
    if project_type.is_primary() {
        flags.push("primary");
    }
    if project_type.is_mixable() {
        flags.push("mixable");
    }
    if !project_type.is_persisted() {
        flags.push("transient");
    }
    flags.join(",")
}

/// Handle `ptype list`
fn handle_list(registry: &ProjectTypeRegistry, order: TypeOrder, format: &str) -> anyhow::Result<()> {
    if format != "table" {
        return print_serialized(&registry.descriptors(order), format);
    }

    let header = format!(
        "{:<24} {:<28} {:<22} {:>5}  {}",
        "ID", "NAME", "FLAGS", "ATTRS", "ANCESTORS"
    );
    println!("{}", header.bold());

    for project_type in registry.project_types_ordered(order) {
        let ancestors: Vec<&str> = project_type.ancestors().iter().map(String::as_str).collect();
        println!(
            "{:<24} {:<28} {:<22} {:>5}  {}",
            project_type.id(),
            project_type.display_name(),
            flags(project_type),
            project_type.attributes().len(),
            ancestors.join(", ")
        );
    }

    println!("\nTotal: {} project type(s), order: {}", registry.len(), order);
    if !registry.exclusions().is_empty() {
        println!(
            "{}",
            format!(
                "{} definition(s) excluded, run `ptype check` for details",
                registry.exclusions().len()
            )
            .yellow()
        );
    }

    Ok(())
}

/// Handle `ptype show <id>`
fn handle_show(registry: &ProjectTypeRegistry, id: &str, format: &str) -> anyhow::Result<()> {
    let project_type = registry.get_project_type(id)?;

    if format != "table" {
        return print_serialized(&project_type.descriptor(), format);
    }

    println!("{} ({})", project_type.id().bold(), project_type.display_name());
    println!("  Flags:     {}", flags(project_type));
    println!("  Parents:   {}", project_type.parents().join(", "));
    let ancestors: Vec<&str> = project_type.ancestors().iter().map(String::as_str).collect();
    println!("  Ancestors: {}", ancestors.join(", "));

    if project_type.attributes().is_empty() {
        println!("  Attributes: (none)");
        return Ok(());
    }

    println!("  Attributes:");
    for attribute in project_type.attributes().values() {
        let kind = if attribute.is_variable() { "variable" } else { "constant" };
        let required = if attribute.is_required() { " required" } else { "" };
        let provided = if attribute.is_value_provided() { " provided" } else { "" };
        let value = attribute
            .value()
            .map(|v| v.values().join(", "))
            .unwrap_or_default();
        println!(
            "    {:<32} {}{}{} [{}]  {}",
            attribute.qualified_id(),
            kind,
            required,
            provided,
            value,
            attribute.display_name()
        );
    }

    Ok(())
}

/// Handle `ptype check`
fn handle_check(registry: &ProjectTypeRegistry, format: &str) -> anyhow::Result<()> {
    if format != "table" {
        return print_serialized(&registry.exclusions(), format);
    }

    if registry.exclusions().is_empty() {
        println!("{} All definitions resolved ({} project types)", "✓".green(), registry.len());
        return Ok(());
    }

    for exclusion in registry.exclusions() {
        println!("{} {}: {}", "✗".red(), exclusion.label(), exclusion.reason);
    }
    println!("\nExcluded: {}, resolved: {}", registry.exclusions().len(), registry.len());

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.manifests.is_empty() && cli.dir.is_none() {
        eprintln!("Warning: no --manifest or --dir given, only the base type is registered");
    }

    let registry = load_registry(&cli.manifests, cli.dir.as_ref())?;

    match cli.command {
        Commands::List { order, format } => handle_list(&registry, order, &format)?,
        Commands::Show { id, format } => handle_show(&registry, &id, &format)?,
        Commands::IsTypeOf { id, candidate } => {
            let result = registry.is_type_of(&id, &candidate)?;
            println!("{}", result);
            if !result {
                std::process::exit(1);
            }
        }
        Commands::Check { format } => handle_check(&registry, &format)?,
    }

    Ok(())
}
