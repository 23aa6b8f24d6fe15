pub mod app;

pub use app::formatter::OutputGenerator;
pub use app::models::{DirectoryNode, FileEntry, RuntimeConfig, FILES_KEY};
pub use app::scanner::{build_tree, Scanner};
