use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Export a project's source tree, with file contents, as JSON"
)]
pub struct Cli {
    /// Root directory to scan
    #[arg(long, default_value = ".")]
    pub src: PathBuf,

    /// JSON file to write, or '-' for stdout
    #[arg(long, default_value = "directory_structure.json")]
    pub output: PathBuf,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Top-level directories to descend into (e.g., 'app' 'lib')
    #[arg(long = "allow-dir", num_args = 1..)]
    pub allow_dirs: Option<Vec<String>>,

    /// Extensions whose content is embedded (e.g., '.ts' 'tsx')
    #[arg(long = "ext", num_args = 1..)]
    pub extensions: Option<Vec<String>>,

    /// Patterns for files or directories to exclude
    #[arg(long, num_args = 1..)]
    pub exclude: Option<Vec<String>>,
}

impl Cli {
    pub fn writes_to_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }
}
