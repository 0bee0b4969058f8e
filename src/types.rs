use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A bookmark folder, identified by its position in the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,
    pub index: usize,
}

/// A raw bookmark entry as found in the markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: Option<String>,
    pub href: Option<String>,
}

impl Link {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            href: Some(href.into()),
        }
    }
}

/// The entries belonging to a folder, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkList {
    pub links: Vec<Link>,
}

impl LinkList {
    pub fn new(links: Vec<Link>) -> Self {
        Self { links }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRule {
    pub pattern: String,
    pub path: PathBuf,
}

impl MappingRule {
    pub fn new(pattern: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            pattern: pattern.into(),
            path: path.into(),
        }
    }
}

/// Folder-to-document mapping. `rules` is ordered: the first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    pub exclude_marker: String,
    pub unsorted_dir: PathBuf,
    pub rules: Vec<MappingRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Classification {
    Skip,
    Mapped { path: PathBuf, pattern: String },
    Unsorted { path: PathBuf },
}

impl Classification {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Classification::Skip => None,
            Classification::Mapped { path, .. } | Classification::Unsorted { path } => Some(path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FolderStatus {
    Saved {
        path: PathBuf,
        links: usize,
        dropped: usize,
    },
    Skipped,
    NoLinkList {
        path: PathBuf,
    },
    Empty {
        path: PathBuf,
        dropped: usize,
    },
    Failed {
        path: PathBuf,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderOutcome {
    pub folder: String,
    #[serde(flatten)]
    pub status: FolderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationReport {
    pub source: String,
    pub repo_root: PathBuf,
    pub started_at: String,
    pub dry_run: bool,
    pub outcomes: Vec<FolderOutcome>,
}

impl MigrationReport {
    pub fn folders_found(&self) -> usize {
        self.outcomes.len()
    }

    pub fn saved_count(&self) -> usize {
        self.count(|s| matches!(s, FolderStatus::Saved { .. }))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|s| matches!(s, FolderStatus::Skipped))
    }

    pub fn empty_count(&self) -> usize {
        self.count(|s| matches!(s, FolderStatus::Empty { .. } | FolderStatus::NoLinkList { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|s| matches!(s, FolderStatus::Failed { .. }))
    }

    pub fn links_written(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o.status {
                FolderStatus::Saved { links, .. } => links,
                _ => 0,
            })
            .sum()
    }

    fn count(&self, pred: impl Fn(&FolderStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}
