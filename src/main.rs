//! # Rotsample CLI
//!
//! Command-line interface for generating the PCL + HP-GL/2 text rotation
//! sample job.
//!
//! ## Usage
//!
//! ```bash
//! # Letter portrait job to stdout, overlay stored as a macro
//! rotsample generate > rotation.pcl
//!
//! # A4 landscape, duplex, overlay drawn inline
//! rotsample generate --paper a4 --orientation landscape --plex long-edge --no-macro -o out.pcl
//!
//! # Options from a JSON file; flags override it
//! rotsample generate --config job.json --paper legal -o out.pcl
//!
//! # List supported paper sizes and fonts
//! rotsample papers
//! rotsample fonts
//! ```
//!
//! Set `RUST_LOG=debug` (or pass `--verbose`) to trace writer state changes
//! on stderr.

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use rotsample::{
    PclError,
    printer::{FontCatalog, PaperSize, PaperType, StandardPaperTable},
    protocol::page::{Orientation, Plex},
    sample::{SampleComposer, SampleOptions},
    writer::CommandWriter,
};

/// Rotsample - PCL text rotation sample job generator
#[derive(Parser, Debug)]
#[command(name = "rotsample")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log writer state changes to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the rotation sample job
    Generate {
        /// Paper size (letter, a4, legal, ...)
        #[arg(long, value_parser = PaperSize::parse)]
        paper: Option<PaperSize>,

        /// Orientation (portrait, landscape, reverse-portrait, reverse-landscape)
        #[arg(long, value_parser = Orientation::parse)]
        orientation: Option<Orientation>,

        /// Media type (plain, bond, letterhead, ...)
        #[arg(long, value_parser = PaperType::parse)]
        paper_type: Option<PaperType>,

        /// Simplex or duplex (simplex, long-edge, short-edge)
        #[arg(long, value_parser = Plex::parse)]
        plex: Option<Plex>,

        /// Draw the overlay inline instead of storing it as a macro
        #[arg(long)]
        no_macro: bool,

        /// Job name written as a PJL comment
        #[arg(long)]
        name: Option<String>,

        /// JSON options file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List supported paper sizes and their PCL ids
    Papers,

    /// List the font catalog
    Fonts,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PclError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            paper,
            orientation,
            paper_type,
            plex,
            no_macro,
            name,
            config,
            output,
        } => {
            let mut options = match config {
                Some(path) => {
                    let json = std::fs::read_to_string(&path).map_err(|e| {
                        PclError::Config(format!("cannot read {}: {}", path.display(), e))
                    })?;
                    SampleOptions::from_json(&json)?
                }
                None => SampleOptions::default(),
            };

            if let Some(paper) = paper {
                options.paper_size = paper;
            }
            if let Some(orientation) = orientation {
                options.orientation = orientation;
            }
            if let Some(paper_type) = paper_type {
                options.paper_type = paper_type;
            }
            if let Some(plex) = plex {
                options.plex = plex;
            }
            if no_macro {
                options.macro_backed = false;
            }
            if let Some(name) = name {
                options.job_name = name;
            }

            let catalog = FontCatalog::standard();
            let composer = SampleComposer::new(&catalog, &StandardPaperTable);
            let mut writer = CommandWriter::new(Vec::new());
            composer.generate_job(&mut writer, &options)?;
            let job = writer.into_inner();

            match output {
                Some(path) => {
                    std::fs::write(&path, &job)?;
                    eprintln!("Wrote {} bytes to {}", job.len(), path.display());
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&job)?;
                    stdout.flush()?;
                }
            }
            Ok(())
        }

        Commands::Papers => {
            println!("{:<12} {:>4}  {:>6} x {:<6}", "NAME", "ID", "WIDTH", "HEIGHT");
            for paper in PaperSize::ALL {
                let g = StandardPaperTable::geometry(paper, Orientation::Portrait);
                println!(
                    "{:<12} {:>4}  {:>6} x {:<6}",
                    paper.name(),
                    paper.pcl_id(),
                    g.paper_width,
                    g.paper_height
                );
            }
            Ok(())
        }

        Commands::Fonts => {
            let catalog = FontCatalog::standard();
            for (index, entry) in catalog.entries().iter().enumerate() {
                let marker = if index == catalog.default_index() { " (default)" } else { "" };
                println!(
                    "{:<16} {:>6}  {:?}{}",
                    entry.name, entry.typeface, entry.spacing, marker
                );
            }
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
