//! The kml2sql command-line front end: convert one KML file or a whole
//! directory of them into SQL INSERT scripts.

#[macro_use]
extern crate log;

use std::path::PathBuf;

use anyhow::{bail, Result};
use structopt::StructOpt;

use kml2sql::RunStatistics;

#[derive(StructOpt)]
#[structopt(
    name = "kml2sql",
    about = "Converts KML zone exports into SQL INSERT scripts"
)]
enum Command {
    /// Convert a single .kml file
    File {
        /// The path to a .kml file
        #[structopt()]
        path: String,
        /// Write the generated .sql file here instead of the working directory
        #[structopt(long)]
        out_dir: Option<PathBuf>,
    },
    /// Convert every .kml file in a directory
    Dir {
        /// The path to a directory containing .kml files
        #[structopt()]
        path: String,
        /// Write the generated .sql files here instead of the working directory
        #[structopt(long)]
        out_dir: Option<PathBuf>,
        /// Also concatenate everything generated into this one script
        #[structopt(long)]
        consolidate: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    setup_logger();

    match Command::from_args() {
        Command::File { path, out_dir } => {
            if !kml2sql::process_single_file(&path, out_dir.as_deref())? {
                bail!("{} didn't contain any convertible placemarks", path);
            }
        }
        Command::Dir {
            path,
            out_dir,
            consolidate,
        } => {
            let stats = kml2sql::process_directory(&path, out_dir.as_deref())?;
            print_summary(&stats);
            if let Some(out_path) = consolidate {
                let dir = out_dir.unwrap_or_else(|| PathBuf::from("."));
                kml2sql::consolidate_outputs(&dir, &out_path)?;
            }
            if stats.errors > 0 {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

/// Intercept messages from the `log` crate and print them to STDOUT.
fn setup_logger() {
    use env_logger::{Builder, Env};
    Builder::from_env(Env::default().default_filter_or("info")).init();
}

fn print_summary(stats: &RunStatistics) {
    info!("{}", stats);
    if stats.total > 0 {
        info!(
            "Success rate: {:.1}%",
            100.0 * (stats.success as f64) / (stats.total as f64)
        );
    }
}
