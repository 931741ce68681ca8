//! geomspace CLI
//!
//! Inspect and search saved workspace files from the command line.
//!
//! Usage:
//!     geomspace info ~/parts/bracket.gsw
//!     geomspace list ~/parts/bracket.gsw
//!     geomspace find ~/parts/bracket.gsw "base plate"
//!     geomspace demo ~/parts/demo.gsw --overwrite

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

use geomspace::{
    parallelogram, Identified, Lookup, Point, Session, SessionResult, Vector,
};

/// geomspace - geometric workspaces on disk
#[derive(Parser)]
#[command(name = "geomspace")]
#[command(version)]
#[command(about = "Inspect, search and create saved geometry workspaces", long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show headers and object count of a workspace file
    Info {
        /// Workspace file path
        file: String,
    },

    /// List every object in a workspace file
    List {
        /// Workspace file path
        file: String,
    },

    /// Fuzzy search objects by name
    Find {
        /// Workspace file path
        file: String,

        /// Name to look for
        name: String,
    },

    /// Write a small sample workspace
    Demo {
        /// Workspace file path
        file: String,

        /// Replace the file if it exists
        #[arg(long)]
        overwrite: bool,
    },
}

fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn open(file: &str) -> SessionResult<Session> {
    let mut session = Session::new();
    session.load_file(Some(&expand_path(file)), false)?;
    Ok(session)
}

fn cmd_info(file: &str) -> SessionResult<()> {
    let session = open(file)?;

    println!("Common header:");
    for (key, value) in session.common_header().iter() {
        println!("  {:<20} {}", key, value);
    }
    println!("Header:");
    for (key, value) in session.header().iter() {
        println!("  {:<20} {}", key, value);
    }
    println!("Objects: {}", session.len());
    Ok(())
}

fn cmd_list(file: &str) -> SessionResult<()> {
    let session = open(file)?;

    for (i, entity) in session.workspace().iter().enumerate() {
        println!("{:>4}  {:<8} {}  {}", i, entity.kind(), entity.uid(), entity);
    }
    Ok(())
}

fn cmd_find(file: &str, name: &str) -> SessionResult<()> {
    let session = open(file)?;

    let found = session.search_by_name(name);
    if found.is_empty() {
        println!("No object named like {:?}", name);
        return Ok(());
    }
    for hit in found {
        println!(
            "{:>4}  score {:>3}  {:<8} {}  {}",
            hit.index,
            hit.score,
            hit.item.kind(),
            hit.item.uid(),
            hit.item.name()
        );
    }
    Ok(())
}

fn cmd_demo(file: &str, overwrite: bool) -> SessionResult<()> {
    let mut session = Session::new();

    let corner = Point::new(Vector::from([0.0, 0.0, 0.0]), "corner");
    let width = Vector::new(vec![40.0, 0.0, 0.0], "width");
    let depth = Vector::new(vec![0.0, 25.0, 0.0], "depth");
    let plate = parallelogram(&corner, &width, &depth, "base plate")?;
    let edge = plate.segments()[0].duplicate();

    session.append(corner)?;
    session.append(width)?;
    session.append(depth)?;
    session.append(edge)?;
    session.append(plate)?;
    session.add_to_header([("description", "sample workspace")]);

    let path = session.save_to_file(Some(&expand_path(file)), overwrite)?;
    println!("Wrote {} objects to {}", session.len(), path.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Info { file } => cmd_info(&file),
        Commands::List { file } => cmd_list(&file),
        Commands::Find { file, name } => cmd_find(&file, &name),
        Commands::Demo { file, overwrite } => cmd_demo(&file, overwrite),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
