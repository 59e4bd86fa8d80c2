use scenario_core::ports::{Result, ScenarioRepository};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Filesystem implementation of the ScenarioRepository trait
pub struct WalkdirScenarioRepository {
    base_dir: PathBuf,
}

impl WalkdirScenarioRepository {
    /// Creates a new repository rooted at the given scenarios directory
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl ScenarioRepository for WalkdirScenarioRepository {
    /// Recursively walks the scenario tree and collects every regular file
    /// whose name ends with `.json`. The suffix match is case-sensitive.
    /// A missing or unreadable base directory surfaces as an error here.
    fn discover(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.base_dir) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let is_scenario = entry
                .file_name()
                .to_str()
                .map(|name| name.ends_with(".json"))
                .unwrap_or(false);
            if is_scenario {
                paths.push(entry.into_path());
            }
        }
        Ok(paths)
    }

    fn load(&self, path: &Path) -> Result<Value> {
        let raw = fs::read_to_string(path)?;
        let document = serde_json::from_str(&raw)
            .map_err(|e| format!("invalid JSON in {}: {}", path.display(), e))?;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_discover_finds_nested_json_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("top.json"), "{}").unwrap();
        let nested = dir.path().join("a").join("b").join("c");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("deep.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a scenario").unwrap();
        fs::write(dir.path().join("upper.JSON"), "{}").unwrap();

        let repository = WalkdirScenarioRepository::new(dir.path());
        let paths = repository.discover().unwrap();

        let names: HashSet<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains("top.json"));
        assert!(names.contains("deep.json"));
    }

    #[test]
    fn test_discover_fails_when_base_dir_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let repository = WalkdirScenarioRepository::new(dir.path().join("missing"));
        assert!(repository.discover().is_err());
    }

    #[test]
    fn test_load_parses_a_scenario_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.json");
        fs::write(&path, r#"{"items": [{"name": "sub1"}]}"#).unwrap();

        let repository = WalkdirScenarioRepository::new(dir.path());
        let document = repository.load(&path).unwrap();
        assert_eq!(document["items"][0]["name"], "sub1");
    }

    #[test]
    fn test_load_rejects_invalid_json_and_leaves_file_intact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "not json").unwrap();

        let repository = WalkdirScenarioRepository::new(dir.path());
        let error = repository.load(&path).unwrap_err();
        assert!(error.to_string().contains("broken.json"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    }
}
