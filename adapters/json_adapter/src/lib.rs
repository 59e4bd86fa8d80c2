use scenario_core::ports::{Result, ScenarioWriter};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// JSON file writer adapter: serializes scenario documents with 4-space
/// indentation and overwrites them in place.
#[derive(Default)]
pub struct JsonScenarioWriter;

impl JsonScenarioWriter {
    pub fn new() -> Self {
        Self
    }

    /// Renders a document with 4-space indentation, key order preserved.
    pub fn to_pretty_string(document: &Value) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        document.serialize(&mut serializer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Replaces `dir` wholesale, then writes each named document into it.
    /// Missing parent directories are created; stale files from a previous
    /// generation are removed. Returns the paths in write order.
    pub fn write_folder(&self, dir: &Path, documents: &[(String, Value)]) -> Result<Vec<PathBuf>> {
        if dir.exists() {
            fs::remove_dir_all(dir)?;
        }
        fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(documents.len());
        for (filename, document) in documents {
            let path = dir.join(filename);
            self.write(&path, document)?;
            written.push(path);
        }
        Ok(written)
    }
}

impl ScenarioWriter for JsonScenarioWriter {
    fn write(&self, path: &Path, document: &Value) -> Result<()> {
        let rendered = Self::to_pretty_string(document)?;
        // Truncates whatever was there before; no temp-file-then-rename
        fs::write(path, rendered)?;
        Ok(())
    }
}
