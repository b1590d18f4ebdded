//! kinforge robot-description compiler CLI.
//!
//! - `inspect`: compile a model and print its body tree
//! - `check`: compile a model and report diagnostics
//! - `schema`: print the element table of a markup dialect

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use kinforge_core::config::CompilerConfig;
use kinforge_core::model::RobotModel;
use kinforge_core::tree::KinematicBody;
use kinforge_core::types::Dialect;
use kinforge_loader::load_file;
use kinforge_xml::{Schema, SchemaKind};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Robot description compiler for MJCF, URDF and rlsim models.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Compiler configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a model and print its body tree.
    Inspect {
        file: PathBuf,

        /// Model dialect: mjcf, urdf or rlsim.
        #[arg(short, long)]
        dialect: Dialect,
    },

    /// Compile a model and list its diagnostics.
    Check {
        file: PathBuf,

        #[arg(short, long)]
        dialect: Dialect,

        /// Fail when any diagnostic was recorded.
        #[arg(long)]
        strict: bool,
    },

    /// Print the element table of a markup dialect.
    Schema {
        #[arg(value_enum)]
        kind: MarkupKind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MarkupKind {
    Mjcf,
    Urdf,
}

impl From<MarkupKind> for SchemaKind {
    fn from(kind: MarkupKind) -> Self {
        match kind {
            MarkupKind::Mjcf => Self::Mjcf,
            MarkupKind::Urdf => Self::Urdf,
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn compile(file: &Path, dialect: Dialect, config: &CompilerConfig) -> Result<RobotModel> {
    debug!(file = %file.display(), %dialect, "compiling");
    load_file(file, dialect, config).with_context(|| format!("failed to compile {}", file.display()))
}

fn run_inspect(model: &RobotModel) {
    println!(
        "{}: {} bodies, {} joints, {} dof, {} actuators",
        model.name,
        model.tree.len(),
        model.tree.joints().count(),
        model.dof(),
        model.actuators.len()
    );
    print_body(model.tree.root(), 0);

    if !model.meshes.is_empty() {
        println!("\nmeshes:");
        for mesh in &model.meshes {
            println!("  {} -> {} (scale {:?})", mesh.id, mesh.file, mesh.scale);
        }
    }
    if !model.actuators.is_empty() {
        println!("\nactuators:");
        for actuator in &model.actuators {
            let joint = actuator.joint.as_deref().unwrap_or("<none>");
            println!("  {} [{}] -> {joint}", actuator.name, actuator.kind);
        }
    }
}

fn print_body(body: &KinematicBody, depth: usize) {
    let indent = "  ".repeat(depth);
    let [x, y, z] = kinforge_core::math::translation_of(&body.relative_transform);
    println!(
        "{indent}{} @ ({x:.3}, {y:.3}, {z:.3}): {} colliders, {} drawables",
        body.name,
        body.colliders.len(),
        body.drawables.len()
    );
    for joint in &body.joints {
        println!("{indent}  ~ {} ({})", joint.name, joint.joint_type);
    }
    for child in &body.children {
        print_body(child, depth + 1);
    }
}

fn run_check(model: &RobotModel, strict: bool) -> Result<()> {
    if model.diagnostics.is_empty() {
        println!("{}: ok", model.name);
        return Ok(());
    }
    for diagnostic in &model.diagnostics {
        println!("{}: {diagnostic}", model.name);
    }
    if strict {
        bail!("{} diagnostics recorded", model.diagnostics.len());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => CompilerConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CompilerConfig::default(),
    };

    match cli.command {
        Commands::Inspect { file, dialect } => run_inspect(&compile(&file, dialect, &config)?),
        Commands::Check {
            file,
            dialect,
            strict,
        } => run_check(&compile(&file, dialect, &config)?, strict)?,
        Commands::Schema { kind } => print!("{}", Schema::for_kind(kind.into())),
    }
    Ok(())
}
