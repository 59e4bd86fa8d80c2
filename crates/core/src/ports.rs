use serde_json::Value;
use std::error::Error;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

pub trait ScenarioRepository {
    // Walks the scenario tree and lists every .json fixture path
    fn discover(&self) -> Result<Vec<PathBuf>>;

    // Reads and parses one scenario document
    fn load(&self, path: &Path) -> Result<Value>;
}

/// Trait for writing scenario documents back to disk
/// This is a port (interface) that defines how the core communicates with output adapters
pub trait ScenarioWriter: Send + Sync {
    fn write(&self, path: &Path, document: &Value) -> Result<()>;
}
