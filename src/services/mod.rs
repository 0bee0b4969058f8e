pub mod classifier;
pub mod extractor;
pub mod loader;
pub mod migrator;
pub mod writer;

pub use classifier::FolderClassifier;
pub use extractor::{ExtractedLinks, LinkExtractor, LinkKind};
pub use loader::{BookmarkLoader, BookmarkSource, HtmlBookmarkSource};
pub use migrator::Migrator;
pub use writer::DocumentWriter;
