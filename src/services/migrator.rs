use crate::services::classifier::FolderClassifier;
use crate::services::extractor::LinkExtractor;
use crate::services::loader::BookmarkSource;
use crate::services::writer::DocumentWriter;
use crate::types::{Classification, Folder, FolderOutcome, FolderStatus, MigrationReport};
use tracing::{debug, error, info, warn};

/// Runs every folder of a bookmark source through classification,
/// extraction and writing. Per-folder problems end up in the report; they
/// never stop the run.
pub struct Migrator {
    classifier: FolderClassifier,
    writer: DocumentWriter,
    dry_run: bool,
}

impl Migrator {
    pub fn new(classifier: FolderClassifier, writer: DocumentWriter) -> Self {
        Self {
            classifier,
            writer,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn run<S: BookmarkSource + ?Sized>(&self, source: &S, source_name: &str) -> MigrationReport {
        let started_at = chrono::Utc::now().to_rfc3339();
        let folders = source.list_folders();
        info!("Found {} folders in {}", folders.len(), source_name);

        let mut outcomes = Vec::with_capacity(folders.len());
        for folder in &folders {
            let outcome = self.process_folder(source, folder);
            Self::log_outcome(&outcome);
            outcomes.push(outcome);
        }

        MigrationReport {
            source: source_name.to_string(),
            repo_root: self.writer.repo_root().to_path_buf(),
            started_at,
            dry_run: self.dry_run,
            outcomes,
        }
    }

    pub fn process_folder<S: BookmarkSource + ?Sized>(&self, source: &S, folder: &Folder) -> FolderOutcome {
        let status = self.folder_status(source, folder);
        FolderOutcome {
            folder: folder.name.clone(),
            status,
        }
    }

    fn folder_status<S: BookmarkSource + ?Sized>(&self, source: &S, folder: &Folder) -> FolderStatus {
        let classification = self.classifier.classify(&folder.name);
        let path = match classification {
            Classification::Skip => return FolderStatus::Skipped,
            Classification::Mapped { path, pattern } => {
                debug!("'{}' matched rule '{}'", folder.name, pattern);
                path
            }
            Classification::Unsorted { path } => {
                debug!("'{}' matched no rule", folder.name);
                path
            }
        };

        let Some(list) = source.links_for(folder) else {
            return FolderStatus::NoLinkList { path };
        };

        let extracted = LinkExtractor::extract(&list);
        if extracted.rows.is_empty() {
            return FolderStatus::Empty {
                path,
                dropped: extracted.dropped,
            };
        }

        if !self.dry_run {
            if let Err(e) = self.writer.append(&path, &extracted.rows, &folder.name) {
                return FolderStatus::Failed {
                    path,
                    reason: e.to_string(),
                };
            }
        }

        FolderStatus::Saved {
            path,
            links: extracted.rows.len(),
            dropped: extracted.dropped,
        }
    }

    fn log_outcome(outcome: &FolderOutcome) {
        let name = &outcome.folder;
        match &outcome.status {
            FolderStatus::Saved { path, links, dropped } => {
                info!("'{}' -> {}: saved {} links", name, path.display(), links);
                if *dropped > 0 {
                    debug!("'{}': dropped {} entries", name, dropped);
                }
            }
            FolderStatus::Skipped => info!("Skipping private folder '{}'", name),
            FolderStatus::NoLinkList { path } => {
                warn!("'{}' -> {}: no link list found", name, path.display())
            }
            FolderStatus::Empty { path, dropped } => warn!(
                "'{}' -> {}: folder empty (0 valid links, {} dropped)",
                name,
                path.display(),
                dropped
            ),
            FolderStatus::Failed { path, reason } => {
                error!("'{}' -> {}: {}", name, path.display(), reason)
            }
        }
    }
}
