//! # Bookmark Migrator Library
//!
//! Turns a browser bookmark export (Netscape bookmark HTML) into categorized
//! markdown reference documents inside a repository. Each folder is mapped to
//! a document through an ordered rule table and its links are appended as a
//! markdown table.
//!
//! ## Example Usage
//!
//! ```no_run
//! use bookmark_migrator::{BookmarkLoader, DocumentWriter, FolderClassifier, MappingConfig, Migrator};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load and parse the export
//!     let source = BookmarkLoader::load(Path::new("bookmarks.html"))?;
//!
//!     // Configure the folder table and the target repository
//!     let classifier = FolderClassifier::new(MappingConfig::default());
//!     let writer = DocumentWriter::new("./notes");
//!
//!     // Migrate every folder
//!     let report = Migrator::new(classifier, writer).run(&source, "bookmarks.html");
//!
//!     println!("Saved {} links", report.links_written());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod services;
pub mod types;

// Re-export main types and services for easier usage
pub use error::{MigratorError, Result};
pub use services::{
    BookmarkLoader, BookmarkSource, DocumentWriter, FolderClassifier, HtmlBookmarkSource,
    LinkExtractor, Migrator,
};
pub use types::{
    Classification, Folder, FolderOutcome, FolderStatus, Link, LinkList, MappingConfig,
    MappingRule, MigrationReport,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
