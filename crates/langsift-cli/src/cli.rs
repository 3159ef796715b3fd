use clap::{Parser, Subcommand};
use langsift_classifiers::ModelVariant;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "langsift")]
#[command(author, version, about = "Classify short text as English or Italian")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config/langsift.yaml")]
    pub config: PathBuf,

    /// Model variant to serve (overrides the config file)
    #[arg(long, global = true, env = "LANGSIFT_VARIANT", value_parser = parse_variant)]
    pub variant: Option<ModelVariant>,

    /// Directory holding the model artifacts (overrides the config file)
    #[arg(long, global = true, env = "LANGSIFT_MODELS_DIR")]
    pub models_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict the language of one text
    Predict {
        /// Text to classify
        text: String,
    },

    /// Predict one text per line, from a file or stdin
    Batch {
        /// Input file (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Maximum predictions in flight
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Load the model artifacts and describe them
    Inspect,
}

fn parse_variant(s: &str) -> Result<ModelVariant, String> {
    s.parse()
}
