use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments, one run per task.
#[derive(Parser, Debug)]
#[command(name = "textnet", about = "Sequence, mention and co-occurrence analysis of a sentence corpus")]
pub struct Args {
    /// Task number (1 to 8)
    #[arg(short = 't', long = "task")]
    pub task: String,

    /// Sentences CSV file
    #[arg(short = 's', long = "sentences")]
    pub sentences: Option<PathBuf>,

    /// Names CSV file
    #[arg(short = 'n', long = "names")]
    pub names: Option<PathBuf>,

    /// Stop-words CSV file
    #[arg(short = 'r', long = "removewords")]
    pub remove_words: Option<PathBuf>,

    /// JSON file with preprocessed data
    #[arg(short = 'p', long = "preprocessed")]
    pub preprocessed: Option<PathBuf>,

    /// Maximal n-gram length
    #[arg(long = "maxk")]
    pub max_k: Option<usize>,

    /// Path length (in persons) to look for
    #[arg(long = "fixed_length")]
    pub fixed_length: Option<usize>,

    /// Number of consecutive sentences per window
    #[arg(long = "windowsize")]
    pub window_size: Option<usize>,

    /// JSON file with the list of person pairs
    #[arg(long = "pairs")]
    pub pairs: Option<PathBuf>,

    /// Minimal number of shared windows to connect two persons
    #[arg(long = "threshold")]
    pub threshold: Option<usize>,

    /// Maximal path length (in persons) between two connected persons
    #[arg(long = "maximal_distance")]
    pub maximal_distance: Option<usize>,

    /// JSON file with the sequences to search
    #[arg(long = "qsek_query_path")]
    pub query_path: Option<PathBuf>,

    /// Write the result to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}
