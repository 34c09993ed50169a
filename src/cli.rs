use crate::config::load_config;
use crate::graph::FamilyGraph;
use crate::kinship::{describe_relationship, find_path};
use crate::layout::LayoutMode;
use crate::layout_dump::write_layout_dump;
use crate::source::FamilySnapshot;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "stammbaum", version, about = "Family tree layout and kinship terms")]
pub struct Args {
    /// Emit log lines as JSON
    #[arg(long = "log-json", global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute node positions and edges for a family snapshot
    Layout {
        /// Snapshot JSON file or '-' for stdin
        #[arg(short = 'i', long = "input")]
        input: Option<PathBuf>,

        /// Output file. Defaults to stdout.
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Vertical axis
        #[arg(short = 'm', long = "mode", value_enum, default_value = "generational")]
        mode: ModeArg,

        /// Config JSON file
        #[arg(short = 'c', long = "configFile")]
        config: Option<PathBuf>,
    },
    /// Describe how one person relates to another
    Relate {
        #[arg(short = 'i', long = "input")]
        input: Option<PathBuf>,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Print the shortest connection between two persons
    Path {
        #[arg(short = 'i', long = "input")]
        input: Option<PathBuf>,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ModeArg {
    Generational,
    Temporal,
}

impl From<ModeArg> for LayoutMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Generational => LayoutMode::Generational,
            ModeArg::Temporal => LayoutMode::Temporal,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    match args.command {
        Command::Layout {
            input,
            output,
            mode,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let snapshot = read_snapshot(input.as_deref())?;
            let layout = crate::compute_layout(
                &snapshot.members,
                &snapshot.relationships,
                mode.into(),
                &config.layout,
            );
            write_layout_dump(output.as_deref(), &layout)
        }
        Command::Relate { input, from, to } => {
            let snapshot = read_snapshot(input.as_deref())?;
            let graph = FamilyGraph::build(&snapshot.members, &snapshot.relationships);
            ensure_known(&graph, &[from.as_str(), to.as_str()])?;
            let description = describe_relationship(&graph, &from, &to);
            print_json(&description)
        }
        Command::Path { input, from, to } => {
            let snapshot = read_snapshot(input.as_deref())?;
            let graph = FamilyGraph::build(&snapshot.members, &snapshot.relationships);
            ensure_known(&graph, &[from.as_str(), to.as_str()])?;
            print_json(&find_path(&graph, &from, &to))
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_env("STAMMBAUM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    if let Err(err) = result {
        eprintln!("warning: logging not initialised: {err}");
    }
}

fn read_snapshot(path: Option<&Path>) -> Result<FamilySnapshot> {
    let snapshot = match path {
        Some(path) if path != Path::new("-") => FamilySnapshot::load(path)?,
        _ => FamilySnapshot::read_from(std::io::stdin().lock())?,
    };
    tracing::debug!(
        members = snapshot.members.len(),
        relationships = snapshot.relationships.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

fn ensure_known(graph: &FamilyGraph<'_>, ids: &[&str]) -> Result<()> {
    for id in ids {
        if !graph.contains(id) {
            anyhow::bail!("unknown person id '{id}'");
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialising output")?;
    println!("{text}");
    Ok(())
}
