//! dirlist - Expand media directories into playlists.
//!
//! Usage:
//!   dirlist [PATH]              Print the playlist tree
//!   dirlist tree [PATH]         Print the playlist tree
//!   dirlist list [PATH]         Print entry URIs, one per line
//!   dirlist export [PATH]       Export the playlist to JSON
//!   dirlist --help              Show help

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

use dirlist_core::{ExpandConfig, ExpansionMode, ItemOptions, NodeId, Playlist};
use dirlist_expand::{Collation, DirectoryExpander};

#[derive(Parser)]
#[command(
    name = "dirlist",
    version,
    about = "Expand media directories into playlists",
    long_about = "dirlist walks a directory and builds the playlist a media player \
                  would show for it: hidden files and ignored extensions are left out, \
                  subdirectories are expanded, collapsed or skipped, and symlink loops \
                  are detected."
)]
struct Cli {
    /// Directory to expand (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    #[command(flatten)]
    expand: ExpandArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the playlist as a tree
    Tree {
        /// Directory to expand
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        expand: ExpandArgs,
    },

    /// Print entry URIs in playlist order
    List {
        /// Directory to expand
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        expand: ExpandArgs,
    },

    /// Export the playlist to JSON
    Export {
        /// Directory to expand
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        expand: ExpandArgs,
    },
}

#[derive(Args, Clone, Default)]
struct ExpandArgs {
    /// Subdirectory behavior
    #[arg(short, long)]
    recursive: Option<ModeArg>,

    /// Comma-separated extensions to leave out (e.g. "m3u,db,nfo")
    #[arg(short, long)]
    ignore_filetypes: Option<String>,

    /// Option copied onto every entry (repeatable)
    #[arg(long = "option", value_name = "OPTION")]
    options: Vec<String>,

    /// Entry ordering
    #[arg(long, default_value = "codepoint")]
    collation: CollationArg,

    /// TOML file with `recursive` and `ignore_filetypes` keys
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    None,
    Collapse,
    Expand,
}

impl From<ModeArg> for ExpansionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::None => ExpansionMode::None,
            ModeArg::Collapse => ExpansionMode::Collapse,
            ModeArg::Expand => ExpansionMode::Expand,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum CollationArg {
    #[default]
    Codepoint,
    Casefold,
}

impl From<CollationArg> for Collation {
    fn from(collation: CollationArg) -> Self {
        match collation {
            CollationArg::Codepoint => Collation::Codepoint,
            CollationArg::Casefold => Collation::CaseFold,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dirlist=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Tree { path, expand }) => run_tree(&path, &expand)?,
        Some(Command::List { path, expand }) => run_list(&path, &expand)?,
        Some(Command::Export {
            path,
            output,
            expand,
        }) => run_export(&path, output, &expand)?,
        None => run_tree(&cli.path, &cli.expand)?,
    }

    Ok(())
}

/// Build the expander and run it over `path`.
fn expand(path: &Path, args: &ExpandArgs) -> Result<Playlist> {
    let path = path.canonicalize().wrap_err("Invalid path")?;

    let mut config = match &args.config {
        Some(file) => ExpandConfig::load(file)
            .wrap_err_with(|| format!("Cannot load config {}", file.display()))?,
        None => ExpandConfig::default(),
    };
    if let Some(mode) = args.recursive {
        config.recursive = mode.into();
    }
    if let Some(ignore) = &args.ignore_filetypes {
        config.ignore_filetypes = ignore.clone();
    }
    config.validate()?;

    let template: ItemOptions = args.options.iter().cloned().collect();
    let expander = DirectoryExpander::new(config).with_collator(Collation::from(args.collation));

    expander
        .expand_with(&path, &template)
        .wrap_err_with(|| format!("Cannot expand {}", path.display()))
}

/// Print the playlist as an indented tree.
fn run_tree(path: &Path, args: &ExpandArgs) -> Result<()> {
    let playlist = expand(path, args)?;

    println!();
    println!("{}", "─".repeat(60));
    println!(" {}", playlist.root_path.display());
    println!(
        " {} entries, {} directories ({} mode)",
        playlist.report.stats.entries_added,
        playlist.report.stats.containers_added,
        playlist.config.recursive
    );
    println!(" Expanded in {:.2}s", playlist.duration.as_secs_f64());
    println!("{}", "─".repeat(60));
    println!();

    print_node(&playlist, playlist.root);
    print_warnings(&playlist);

    Ok(())
}

/// Print entry URIs one per line.
fn run_list(path: &Path, args: &ExpandArgs) -> Result<()> {
    let playlist = expand(path, args)?;

    for uri in playlist.uris() {
        println!("{uri}");
    }
    print_warnings(&playlist);

    Ok(())
}

/// Export the playlist to JSON.
fn run_export(path: &Path, output: Option<PathBuf>, args: &ExpandArgs) -> Result<()> {
    let playlist = expand(path, args)?;
    let json = serde_json::to_string_pretty(&playlist)?;

    match output {
        Some(output_path) => {
            std::fs::write(&output_path, json)
                .wrap_err_with(|| format!("Cannot write {}", output_path.display()))?;
            eprintln!("Exported to {}", output_path.display());
        }
        None => {
            println!("{json}");
        }
    }

    Ok(())
}

/// Print a node and everything below it.
fn print_node(playlist: &Playlist, id: NodeId) {
    for (depth, node) in playlist.tree.walk(id) {
        let indent = "  ".repeat(depth as usize);
        let marker = if node.is_collapsed() {
            "▶ "
        } else if node.is_container() {
            "▼ "
        } else {
            "  "
        };
        let suffix = if node.is_container() { "/" } else { "" };
        println!("{indent}{marker}{}{suffix}", node.name);
    }
}

fn print_warnings(playlist: &Playlist) {
    if playlist.report.has_warnings() {
        eprintln!();
        for warning in &playlist.report.warnings {
            eprintln!("warning: {}", warning.message);
        }
    }
}
