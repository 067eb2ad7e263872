use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Screen resumes against job descriptions with an LLM.
#[derive(Debug, Parser)]
#[command(name = "screener", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate every resume against every job description on disk.
    Screen {
        /// Directory of `.txt` job descriptions. Overrides JD_DIR.
        #[arg(long)]
        jd_dir: Option<PathBuf>,

        /// Directory of `.pdf` / `.txt` resumes. Overrides RESUME_DIR.
        #[arg(long)]
        resume_dir: Option<PathBuf>,

        /// Where `result_*.json` files are written. Overrides OUTPUT_DIR.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Serve the screening API over HTTP.
    Serve {
        /// Overrides PORT.
        #[arg(long)]
        port: Option<u16>,
    },
}
