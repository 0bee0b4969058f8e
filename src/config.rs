use crate::error::{MigratorError, Result};
use crate::types::{MappingConfig, MappingRule};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_EXCLUDE_MARKER: &str = "TPL webs";
pub const DEFAULT_UNSORTED_DIR: &str = "99-Unsorted";

/// Built-in folder table. Order matters: "Blogs" and "Books" share a
/// document, and a folder named "Blogs & Books" resolves through "Blogs".
const DEFAULT_RULES: &[(&str, &str)] = &[
    ("References", "tools/JavaScript_Backups.md"),
    ("Web Scraping", "04-Web-Scraping/Web_Miners.md"),
    ("Blogs", "07-bOOks/bOOks.md"),
    ("Books", "07-bOOks/bOOks.md"),
    ("Red Team", "01-Red-Team/Web-App-Pentest.md"),
    ("Threat Intel", "03-Threat-Intel/Feeds.md"),
    ("Networking", "05-Networking/New_Twerking.md"),
    ("Repo Refs", "06-Repo-Refs/Legend_Repos.md"),
];

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            exclude_marker: DEFAULT_EXCLUDE_MARKER.to_string(),
            unsorted_dir: PathBuf::from(DEFAULT_UNSORTED_DIR),
            rules: DEFAULT_RULES
                .iter()
                .map(|(pattern, path)| MappingRule::new(*pattern, *path))
                .collect(),
        }
    }
}

impl MappingConfig {
    /// Load a mapping from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MigratorError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        info!(
            "Loaded {} mapping rules from {}",
            config.rules.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject tables that would match every folder or escape the repository.
    pub fn validate(&self) -> Result<()> {
        if self.exclude_marker.trim().is_empty() {
            return Err(MigratorError::Config {
                reason: "exclude_marker must not be empty".to_string(),
            });
        }

        Self::check_relative(&self.unsorted_dir, "unsorted_dir")?;

        for (idx, rule) in self.rules.iter().enumerate() {
            if rule.pattern.is_empty() {
                return Err(MigratorError::Config {
                    reason: format!("rule {} has an empty pattern", idx + 1),
                });
            }
            Self::check_relative(&rule.path, &format!("rule '{}'", rule.pattern))?;
        }

        Ok(())
    }

    fn check_relative(path: &Path, what: &str) -> Result<()> {
        if path.is_absolute() {
            return Err(MigratorError::Config {
                reason: format!("{} must be relative to the repository root", what),
            });
        }
        Ok(())
    }
}
