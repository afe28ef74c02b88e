pub mod config;
pub mod paste;

use crate::console::VerbosityLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Increase verbosity (-v verbose, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode - only show errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose", global = true)]
    pub quiet: bool,

    /// Upload gateway base URL (overrides config and BLOGPASTE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert an HTML fragment to Markdown (reads stdin without FILE)
    Convert { file: Option<PathBuf> },

    /// Paste clipboard content into a Markdown document at the caret
    Paste {
        /// Document to edit; created if missing
        #[arg(long)]
        doc: PathBuf,

        /// Caret `S` or selection `S:E` in characters (default: end of document)
        #[arg(long)]
        caret: Option<String>,

        /// File holding the text/html representation
        #[arg(long)]
        html: Option<PathBuf>,

        /// The text/plain representation
        #[arg(long)]
        text: Option<String>,

        /// Image file to paste as raw clipboard data
        #[arg(long)]
        image: Option<PathBuf>,

        /// Read the system clipboard instead of the flags above
        #[arg(long, conflicts_with_all = ["html", "text", "image"])]
        from_clipboard: bool,
    },

    /// Upload an image file; inserts it into --doc, or prints its URL
    Upload {
        file: PathBuf,

        #[arg(long)]
        doc: Option<PathBuf>,

        #[arg(long, requires = "doc")]
        caret: Option<String>,
    },

    /// Re-host a remote image and print its Markdown
    Localize { url: String },

    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    Show,
    Set { key: String, value: String },
}

impl Cli {
    pub fn get_verbosity(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else {
            match self.verbose {
                0 => VerbosityLevel::Normal,
                1 => VerbosityLevel::Verbose,
                _ => VerbosityLevel::Debug,
            }
        }
    }

    pub fn get_effective_verbosity(&self, config_verbosity: VerbosityLevel) -> VerbosityLevel {
        if self.quiet || self.verbose > 0 {
            self.get_verbosity()
        } else {
            config_verbosity
        }
    }
}
