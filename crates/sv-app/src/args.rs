//! Command line arguments

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default, PartialEq)]
#[command(name = "stackview")]
#[command(about = "Page through an image stack slice by slice")]
pub struct Args {
    /// JSON viewer configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Use the dark theme
    #[arg(long)]
    pub dark: bool,

    /// Directory of CSV slices, one file per slice; the demo stack when absent
    pub stack_dir: Option<PathBuf>,
}
