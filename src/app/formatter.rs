use crate::app::models::DirectoryNode;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

pub struct OutputGenerator;

impl OutputGenerator {
    /// Pretty JSON with four-space indentation. Non-ASCII text is kept as is.
    pub fn to_json(tree: &DirectoryNode) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        tree.serialize(&mut serializer)
            .context("Failed to serialize directory tree")?;
        buf.push(b'\n');

        Ok(String::from_utf8(buf)?)
    }

    pub fn write_json(tree: &DirectoryNode, output: &Path) -> Result<()> {
        let json = Self::to_json(tree)?;
        fs::write(output, json).context(format!("Failed to write {:?}", output))
    }

    pub fn print_json(tree: &DirectoryNode) -> Result<()> {
        let json = Self::to_json(tree)?;
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(json.as_bytes())
            .context("Failed to write to stdout")
    }
}
