//! strata CLI - deployment stack synthesizer and shared-layer packager
//!
//! Usage: strata <COMMAND>
//!
//! Commands:
//!   synth   Build the stack: layer (deployed mode) + manifest + outputs
//!   layer   Build only the shared client-toolkit layer
//!   clean   Remove the output directory

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use strata::config::{load_or_default, ConfigWarning, ExecutionMode};
use strata::layer::StagingPlan;
use strata::stack::{render_plan, synthesize};

/// strata - deployment stack synthesizer and shared-layer packager
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format for CI
    #[arg(long, default_value = "false")]
    json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the stack: resolve mode, package the layer, write the manifest
    Synth {
        /// Project root containing the client toolkit
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Output directory for the layer and manifest
        #[arg(short, long, default_value = ".strata")]
        out: PathBuf,

        /// Path to strata.toml (defaults to <source>/strata.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Local development mode - skip the layer, read DATABASE_URL
        #[arg(long)]
        local: bool,
    },

    /// Build only the shared client-toolkit layer
    Layer {
        /// Project root containing the client toolkit
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Output directory for the layer
        #[arg(short, long, default_value = ".strata")]
        out: PathBuf,

        /// Path to strata.toml (defaults to <source>/strata.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Remove the output directory
    Clean {
        /// Project root the output directory is resolved against
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Output directory to remove
        #[arg(short, long, default_value = ".strata")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Synth {
            source,
            out,
            config,
            local,
        } => cmd_synth(&source, &out, config.as_deref(), local, cli.json, cli.verbose),
        Commands::Layer {
            source,
            out,
            config,
        } => cmd_layer(&source, &out, config.as_deref(), cli.json, cli.verbose),
        Commands::Clean { source, out } => cmd_clean(&source, &out, cli.json),
    }
}

/// Resolve the output directory against the project root.
fn resolve_out(source: &Path, out: &Path) -> PathBuf {
    if out.is_absolute() {
        out.to_path_buf()
    } else {
        source.join(out)
    }
}

fn print_warnings(warnings: &[ConfigWarning], json: bool) {
    for warning in warnings {
        if json {
            let event = serde_json::json!({
                "event": "config-warning",
                "key": warning.key,
                "file": warning.file.display().to_string(),
            });
            println!("{event}");
        } else {
            println!(
                "⚠ Unknown configuration key '{}' in {}",
                warning.key,
                warning.file.display()
            );
        }
    }
}

fn cmd_synth(
    source: &Path,
    out: &Path,
    config_path: Option<&Path>,
    local: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let out_dir = resolve_out(source, out);

    if !json {
        println!("📦 strata synth");
        println!("Source: {}", source.display());
    }

    let (config, warnings) = load_or_default(config_path, source)?;
    print_warnings(&warnings, json);

    // Resolved once; every later step reads this value
    let mode = ExecutionMode::resolve(local)?;
    if !json {
        println!("Mode: {}", mode.label());
    }

    let artifact = match mode {
        ExecutionMode::Deployed => {
            let plan = StagingPlan::from_config(source, &out_dir, &config.layer);
            if verbose > 0 && !json {
                for src in &plan.sources {
                    println!("  staging {}", src.display());
                }
            }
            let artifact = strata::layer::build(&plan)?;
            if !json {
                println!(
                    "✓ Layer {}: {} files staged, {} excluded",
                    artifact.name, artifact.files_copied, artifact.files_excluded
                );
            }
            Some(artifact)
        }
        ExecutionMode::Local { .. } => None,
    };

    let manifest = synthesize(&mode, &config, artifact.as_ref());
    let manifest_path = manifest.write(&out_dir)?;

    if json {
        let event = serde_json::json!({
            "event": "synth",
            "mode": manifest.mode,
            "manifest": manifest_path.display().to_string(),
            "layer_files": artifact.as_ref().map(|a| a.files_copied),
            "outputs": manifest.outputs,
        });
        println!("{event}");
    } else {
        println!("✓ Manifest: {}", manifest_path.display());
        println!();
        for line in render_plan(&manifest) {
            println!("{line}");
        }
        println!();
        println!("Outputs:");
        for (name, value) in &manifest.outputs {
            println!("  {name} = {value}");
        }
    }

    Ok(())
}

fn cmd_layer(
    source: &Path,
    out: &Path,
    config_path: Option<&Path>,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let out_dir = resolve_out(source, out);

    if !json {
        println!("📦 strata layer");
        println!("Source: {}", source.display());
    }

    let (config, warnings) = load_or_default(config_path, source)?;
    print_warnings(&warnings, json);

    let plan = StagingPlan::from_config(source, &out_dir, &config.layer);
    if verbose > 0 && !json {
        for src in &plan.sources {
            println!("  staging {}", src.display());
        }
    }
    let artifact = strata::layer::build(&plan)?;

    if json {
        let event = serde_json::json!({
            "event": "layer",
            "name": artifact.name,
            "path": artifact.path.display().to_string(),
            "files_copied": artifact.files_copied,
            "files_excluded": artifact.files_excluded,
            "content_hash": artifact.content_hash,
        });
        println!("{event}");
    } else {
        println!(
            "✓ Layer {}: {} files staged, {} excluded",
            artifact.name, artifact.files_copied, artifact.files_excluded
        );
        println!("  Path: {}", artifact.path.display());
        println!("  Hash: {}", artifact.content_hash);
    }

    Ok(())
}

fn cmd_clean(source: &Path, out: &Path, json: bool) -> Result<()> {
    let out_dir = resolve_out(source, out);

    let removed = if out_dir.exists() {
        std::fs::remove_dir_all(&out_dir)?;
        true
    } else {
        false
    };

    if json {
        let event = serde_json::json!({
            "event": "clean",
            "path": out_dir.display().to_string(),
            "removed": removed,
        });
        println!("{event}");
    } else if removed {
        println!("✓ Removed {}", out_dir.display());
    } else {
        println!("Nothing to clean at {}", out_dir.display());
    }

    Ok(())
}
