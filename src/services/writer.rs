use crate::error::{MigratorError, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const TABLE_HEADER: &str = "| Tool / Resource | Link |\n|---|---|\n";

/// Appends link tables to markdown documents under a repository root.
///
/// Nothing is cached between calls: each append reopens the document and
/// checks its size on disk, so folders that share a document, and repeated
/// runs, stack one section after another.
pub struct DocumentWriter {
    repo_root: PathBuf,
}

impl DocumentWriter {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    pub fn resolve(&self, relative_path: &Path) -> PathBuf {
        self.repo_root.join(relative_path)
    }

    /// Append one `# heading` section with its table and rows.
    pub fn append(&self, relative_path: &Path, rows: &[String], heading: &str) -> Result<PathBuf> {
        let full_path = self.resolve(relative_path);
        let wrap = |source: std::io::Error| MigratorError::Write {
            path: full_path.clone(),
            source,
        };

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(wrap)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&full_path)
            .map_err(wrap)?;

        let existing = file.metadata().map_err(wrap)?.len();
        let section = Self::render_section(heading, rows, existing > 0);

        file.write_all(section.as_bytes()).map_err(wrap)?;

        debug!(
            "Appended {} rows to {} ({} bytes before)",
            rows.len(),
            full_path.display(),
            existing
        );

        Ok(full_path)
    }

    pub fn render_section(heading: &str, rows: &[String], separate: bool) -> String {
        let mut content = String::new();

        if separate {
            content.push('\n');
        }
        content.push_str(&format!("# {}\n\n", heading));
        content.push_str(TABLE_HEADER);
        content.push_str(&rows.join("\n"));
        content.push('\n');

        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rows(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_write_creates_directories_and_preamble() {
        let temp_dir = TempDir::new().unwrap();
        let writer = DocumentWriter::new(temp_dir.path());

        let path = writer
            .append(
                Path::new("05-Networking/New_Twerking.md"),
                &rows(&["| Nmap | https://nmap.org |"]),
                "Networking",
            )
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "# Networking\n\n| Tool / Resource | Link |\n|---|---|\n| Nmap | https://nmap.org |\n"
        );
    }

    #[test]
    fn test_second_append_adds_separated_section() {
        let temp_dir = TempDir::new().unwrap();
        let writer = DocumentWriter::new(temp_dir.path());
        let target = Path::new("07-bOOks/bOOks.md");

        writer.append(target, &rows(&["| A | https://a.example |"]), "Blogs").unwrap();
        writer
            .append(
                target,
                &rows(&["| B | https://b.example |", "| C | https://c.example |"]),
                "Books",
            )
            .unwrap();

        let content = fs::read_to_string(writer.resolve(target)).unwrap();
        assert_eq!(
            content,
            "# Blogs\n\n| Tool / Resource | Link |\n|---|---|\n| A | https://a.example |\n\
             \n# Books\n\n| Tool / Resource | Link |\n|---|---|\n| B | https://b.example |\n| C | https://c.example |\n"
        );
    }

    #[test]
    fn test_existing_empty_file_gets_no_leading_blank_line() {
        let temp_dir = TempDir::new().unwrap();
        let writer = DocumentWriter::new(temp_dir.path());
        let target = Path::new("empty.md");
        fs::write(writer.resolve(target), "").unwrap();

        writer.append(target, &rows(&["| X | https://x.example |"]), "X").unwrap();

        let content = fs::read_to_string(writer.resolve(target)).unwrap();
        assert!(content.starts_with("# X\n"));
    }

    #[test]
    fn test_unwritable_target_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("blocker"), "file, not a directory").unwrap();
        let writer = DocumentWriter::new(temp_dir.path());

        let result = writer.append(Path::new("blocker/doc.md"), &rows(&["| a | b |"]), "A");
        match result {
            Err(MigratorError::Write { path, .. }) => assert!(path.ends_with("blocker/doc.md")),
            other => panic!("expected write error, got {:?}", other),
        }
    }
}
