use crate::types::{Classification, MappingConfig};
use std::path::PathBuf;

pub struct FolderClassifier {
    config: MappingConfig,
    // Lowercased copies, compared against the lowercased folder name.
    exclude_marker: String,
    patterns: Vec<String>,
}

impl FolderClassifier {
    pub fn new(config: MappingConfig) -> Self {
        let exclude_marker = config.exclude_marker.to_lowercase();
        let patterns = config
            .rules
            .iter()
            .map(|rule| rule.pattern.to_lowercase())
            .collect();

        Self {
            config,
            exclude_marker,
            patterns,
        }
    }

    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    /// Exclusion first, then the first matching rule, then the unsorted area.
    pub fn classify(&self, folder_name: &str) -> Classification {
        let name = folder_name.to_lowercase();

        if name.contains(&self.exclude_marker) {
            return Classification::Skip;
        }

        for (rule, pattern) in self.config.rules.iter().zip(&self.patterns) {
            if name.contains(pattern.as_str()) {
                return Classification::Mapped {
                    path: rule.path.clone(),
                    pattern: rule.pattern.clone(),
                };
            }
        }

        Classification::Unsorted {
            path: self.unsorted_path(folder_name),
        }
    }

    fn unsorted_path(&self, folder_name: &str) -> PathBuf {
        self.config
            .unsorted_dir
            .join(format!("{}.md", Self::clean_name(folder_name)))
    }

    /// Keep alphanumerics, spaces, hyphens and underscores; drop the rest.
    pub fn clean_name(folder_name: &str) -> String {
        folder_name
            .chars()
            .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
            .collect()
    }
}

impl Default for FolderClassifier {
    fn default() -> Self {
        Self::new(MappingConfig::default())
    }
}
