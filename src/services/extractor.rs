use crate::types::{Link, LinkList};
use url::Url;

pub const UNTITLED: &str = "Untitled";
pub const SCRIPT_MARKER: &str = "⚡";
pub const SCRIPT_PLACEHOLDER: &str = "`JavaScript Code (See Raw File)`";

/// How a bookmark target is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Bookmarklet: listed, but its body stays out of the table.
    Script,
    /// Browser-internal query such as `place:type=6`.
    Internal,
    Navigable,
}

impl LinkKind {
    pub fn of(href: &str) -> Self {
        let scheme = match Url::parse(href) {
            Ok(url) => url.scheme().to_string(),
            // Relative or otherwise unparsable targets still count as links
            Err(_) => href
                .split_once(':')
                .map(|(scheme, _)| scheme.to_ascii_lowercase())
                .unwrap_or_default(),
        };

        match scheme.as_str() {
            "javascript" => LinkKind::Script,
            "place" => LinkKind::Internal,
            _ => LinkKind::Navigable,
        }
    }
}

/// Rows rendered for one folder plus the number of entries left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedLinks {
    pub rows: Vec<String>,
    pub dropped: usize,
}

pub struct LinkExtractor;

impl LinkExtractor {
    pub fn extract(list: &LinkList) -> ExtractedLinks {
        let mut extracted = ExtractedLinks::default();

        for link in &list.links {
            match Self::render_row(link) {
                Some(row) => extracted.rows.push(row),
                None => extracted.dropped += 1,
            }
        }

        extracted
    }

    pub fn render_row(link: &Link) -> Option<String> {
        let name = Self::sanitize_text(link.text.as_deref());
        let href = link.href.as_deref()?;

        match LinkKind::of(href) {
            LinkKind::Script => Some(format!("| {} {} | {} |", SCRIPT_MARKER, name, SCRIPT_PLACEHOLDER)),
            LinkKind::Internal => None,
            LinkKind::Navigable => Some(format!("| {} | {} |", name, href)),
        }
    }

    /// Make link text safe for a single markdown table cell.
    pub fn sanitize_text(text: Option<&str>) -> String {
        match text.map(str::trim) {
            Some(trimmed) if !trimmed.is_empty() => trimmed.replace('|', "-").replace('\n', " "),
            _ => UNTITLED.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_text() {
        assert_eq!(LinkExtractor::sanitize_text(Some("Re|ad\nMe")), "Re-ad Me");
        assert_eq!(LinkExtractor::sanitize_text(Some("  padded  ")), "padded");
        assert_eq!(LinkExtractor::sanitize_text(Some("")), UNTITLED);
        assert_eq!(LinkExtractor::sanitize_text(Some(" \n ")), UNTITLED);
        assert_eq!(LinkExtractor::sanitize_text(None), UNTITLED);
    }

    #[test]
    fn test_link_kinds() {
        assert_eq!(LinkKind::of("javascript:alert(1)"), LinkKind::Script);
        assert_eq!(LinkKind::of("JavaScript:void(0)"), LinkKind::Script);
        assert_eq!(LinkKind::of("place:type=6&sort=14"), LinkKind::Internal);
        assert_eq!(LinkKind::of("https://example.com"), LinkKind::Navigable);
        assert_eq!(LinkKind::of("docs/readme.html"), LinkKind::Navigable);
    }

    #[test]
    fn test_script_row_uses_placeholder() {
        let row = LinkExtractor::render_row(&Link::new("Miner", "javascript:alert(1)")).unwrap();

        assert_eq!(row, "| ⚡ Miner | `JavaScript Code (See Raw File)` |");
        assert!(!row.contains("alert"));
    }

    #[test]
    fn test_plain_and_dropped_rows() {
        let plain = LinkExtractor::render_row(&Link::new("Example", "https://example.com"));
        assert_eq!(plain.as_deref(), Some("| Example | https://example.com |"));

        assert_eq!(LinkExtractor::render_row(&Link::new("Recent", "place:type=6")), None);

        let hrefless = Link {
            text: Some("Nowhere".to_string()),
            href: None,
        };
        assert_eq!(LinkExtractor::render_row(&hrefless), None);
    }

    #[test]
    fn test_extract_keeps_source_order_without_dedup() {
        let list = LinkList::new(vec![
            Link::new("B", "https://b.example"),
            Link::new("Tags", "place:folder=TAGS"),
            Link::new("A", "https://a.example"),
            Link::new("B", "https://b.example"),
        ]);

        let extracted = LinkExtractor::extract(&list);
        assert_eq!(
            extracted.rows,
            vec![
                "| B | https://b.example |",
                "| A | https://a.example |",
                "| B | https://b.example |",
            ]
        );
        assert_eq!(extracted.dropped, 1);
    }

    #[test]
    fn test_only_invalid_entries_yield_no_rows() {
        let list = LinkList::new(vec![
            Link::new("Recent", "place:type=6"),
            Link {
                text: Some("Anchor".to_string()),
                href: None,
            },
        ]);

        let extracted = LinkExtractor::extract(&list);
        assert!(extracted.rows.is_empty());
        assert_eq!(extracted.dropped, 2);
    }
}
