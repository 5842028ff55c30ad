//! # Folio CLI
//!
//! Command-line interface for inspecting and previewing JSON documents.
//!
//! ## Usage
//!
//! ```bash
//! # Print the structure tree as JSON
//! folio structure invoice.json
//!
//! # Print per-page structure trees instead
//! folio structure --pages invoice.json
//!
//! # List every drawing call with its resolved cell
//! folio layout invoice.json
//!
//! # Render PNG previews
//! folio preview invoice.json --out previews --dpi 150
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`
//! (e.g. `RUST_LOG=folio=debug`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::{
    FolioError, json_api,
    provider::{PreviewProvider, RecordingProvider},
};

/// Folio - declarative document layout
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the structure tree of a document as JSON
    Structure {
        /// JSON document
        document: PathBuf,

        /// One tree per page, with row positions
        #[arg(long)]
        pages: bool,

        /// Print an indented outline instead of JSON
        #[arg(long)]
        outline: bool,
    },

    /// Print every provider call of a render pass
    Layout {
        /// JSON document
        document: PathBuf,
    },

    /// Render the document to PNG files, one per page
    Preview {
        /// JSON document
        document: PathBuf,

        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Resolution in dots per inch
        #[arg(long, default_value = "96")]
        dpi: f64,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), FolioError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Structure {
            document,
            pages,
            outline,
        } => {
            let doc = json_api::load(&document)?.seal();
            let trees = if pages {
                doc.page_structures()?
            } else {
                vec![doc.structure()?]
            };
            if outline {
                for tree in &trees {
                    print!("{}", tree);
                }
            } else if pages {
                println!("{}", serde_json::to_string_pretty(&trees)?);
            } else {
                for tree in &trees {
                    println!("{}", tree.to_json_pretty()?);
                }
            }
        }

        Commands::Layout { document } => {
            let doc = json_api::load(&document)?.seal();
            let mut provider = RecordingProvider::new();
            let report = doc.render(&mut provider)?;
            for call in provider.calls() {
                println!("{}", call);
            }
            eprintln!("{} page(s), {} row(s)", report.pages, report.rows);
        }

        Commands::Preview { document, out, dpi } => {
            let doc = json_api::load(&document)?.seal();
            let mut provider = PreviewProvider::new(doc.config().page_size, dpi);
            let report = doc.render(&mut provider)?;

            std::fs::create_dir_all(&out)?;
            for (index, png) in provider.to_png_pages()?.into_iter().enumerate() {
                let path = out.join(format!("page-{}.png", index + 1));
                std::fs::write(&path, png)?;
                println!("Saved {}", path.display());
            }
            tracing::info!(pages = report.pages, rows = report.rows, "preview written");
        }
    }

    Ok(())
}
