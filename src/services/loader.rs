use crate::error::{MigratorError, Result};
use crate::types::{Folder, Link, LinkList};
use encoding_rs::Encoding;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::borrow::Cow;
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Read access to a parsed bookmark export.
///
/// Folders come back in document order. A folder's links normally live in
/// the list that directly follows its header; when the export nests them
/// differently, `next_links` finds the first list after the header anywhere
/// in the document.
pub trait BookmarkSource {
    fn list_folders(&self) -> Vec<Folder>;

    fn sibling_links(&self, folder: &Folder) -> Option<LinkList>;

    fn next_links(&self, folder: &Folder) -> Option<LinkList>;

    fn links_for(&self, folder: &Folder) -> Option<LinkList> {
        self.sibling_links(folder)
            .or_else(|| self.next_links(folder))
    }
}

pub struct BookmarkLoader;

impl BookmarkLoader {
    pub fn load(path: &Path) -> Result<HtmlBookmarkSource> {
        info!("Reading bookmarks: {}", path.display());

        if !path.exists() {
            return Err(MigratorError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let bytes = std::fs::read(path)?;
        let (text, encoding) = Self::decode_text(&bytes);
        if encoding != encoding_rs::UTF_8 {
            warn!("UTF-8 decoding failed, read {} as {}", path.display(), encoding.name());
        }

        Ok(HtmlBookmarkSource::parse(&text))
    }

    /// Strict UTF-8 first, then Latin-1, which accepts any byte sequence.
    pub fn decode_text(bytes: &[u8]) -> (Cow<'_, str>, &'static Encoding) {
        let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
        if !had_errors {
            return (text, encoding_rs::UTF_8);
        }

        // The WHATWG "latin1" label resolves to windows-1252.
        let (text, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes);
        (text, encoding_rs::WINDOWS_1252)
    }
}

/// Bookmark export parsed with html5ever.
pub struct HtmlBookmarkSource {
    // Keeps the tree alive for the handles below.
    _dom: RcDom,
    elements: Vec<Handle>,
    headers: Vec<usize>,
}

impl HtmlBookmarkSource {
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), ParseOpts::default())
            .from_utf8()
            .one(html.as_bytes());

        let mut elements = Vec::new();
        collect_elements(&dom.document, &mut elements);

        let headers: Vec<usize> = elements
            .iter()
            .enumerate()
            .filter(|(_, node)| is_element(node, "h3"))
            .map(|(idx, _)| idx)
            .collect();

        debug!("Parsed {} elements, {} folder headers", elements.len(), headers.len());

        Self {
            _dom: dom,
            elements,
            headers,
        }
    }

    fn header(&self, folder: &Folder) -> Option<(usize, &Handle)> {
        let position = *self.headers.get(folder.index)?;
        Some((position, &self.elements[position]))
    }
}

impl BookmarkSource for HtmlBookmarkSource {
    fn list_folders(&self) -> Vec<Folder> {
        self.headers
            .iter()
            .enumerate()
            .map(|(index, &position)| Folder {
                name: text_content(&self.elements[position]).trim().to_string(),
                index,
            })
            .collect()
    }

    fn sibling_links(&self, folder: &Folder) -> Option<LinkList> {
        let (_, header) = self.header(folder)?;
        let parent = parent_of(header)?;
        let children = parent.children.borrow();

        let list = children
            .iter()
            .skip_while(|child| !Rc::ptr_eq(*child, header))
            .skip(1)
            .find(|child| is_element(child, "dl"))
            .map(collect_links);
        list
    }

    fn next_links(&self, folder: &Folder) -> Option<LinkList> {
        let (position, _) = self.header(folder)?;

        self.elements[position + 1..]
            .iter()
            .find(|node| is_element(node, "dl"))
            .map(collect_links)
    }
}

fn collect_elements(handle: &Handle, out: &mut Vec<Handle>) {
    if matches!(handle.data, NodeData::Element { .. }) {
        out.push(handle.clone());
    }
    for child in handle.children.borrow().iter() {
        collect_elements(child, out);
    }
}

fn is_element(handle: &Handle, local: &str) -> bool {
    match handle.data {
        NodeData::Element { ref name, .. } => name.local.as_ref() == local,
        _ => false,
    }
}

fn parent_of(handle: &Handle) -> Option<Handle> {
    let weak = handle.parent.take()?;
    let parent = weak.upgrade();
    handle.parent.set(Some(weak));
    parent
}

fn attribute(handle: &Handle, attr_name: &str) -> Option<String> {
    match handle.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| attr.name.local.as_ref() == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

fn text_content(handle: &Handle) -> String {
    let mut text = String::new();
    push_text(handle, &mut text);
    text
}

fn push_text(handle: &Handle, out: &mut String) {
    if let NodeData::Text { ref contents } = handle.data {
        out.push_str(&contents.borrow());
    }
    for child in handle.children.borrow().iter() {
        push_text(child, out);
    }
}

fn collect_links(list: &Handle) -> LinkList {
    let mut anchors = Vec::new();
    collect_elements(list, &mut anchors);

    let links = anchors
        .iter()
        .filter(|node| is_element(node, "a"))
        .map(|anchor| Link {
            text: Some(text_content(anchor)),
            href: attribute(anchor, "href"),
        })
        .collect();

    LinkList::new(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks</H1>
<DL><p>
    <DT><H3 ADD_DATE="1700000000">  Networking  </H3>
    <DL><p>
        <DT><A HREF="https://example.com/nmap">Nmap</A>
        <DT><A HREF="place:type=6&sort=14">Recent Tags</A>
        <DT><A>No target</A>
    </DL><p>
    <DT><H3>Red Team</H3>
    <DL><p>
        <DT><A HREF="https://example.com/burp">Burp</A>
        <DT><H3>Payloads</H3>
        <DL><p>
            <DT><A HREF="https://example.com/xss">XSS</A>
        </DL><p>
    </DL><p>
</DL><p>
"#;

    #[test]
    fn test_lists_folders_in_document_order() {
        let source = HtmlBookmarkSource::parse(EXPORT);
        let names: Vec<String> = source.list_folders().into_iter().map(|f| f.name).collect();

        assert_eq!(names, vec!["Networking", "Red Team", "Payloads"]);
    }

    #[test]
    fn test_sibling_links_keep_order_and_missing_href() {
        let source = HtmlBookmarkSource::parse(EXPORT);
        let folders = source.list_folders();
        let links = source.sibling_links(&folders[0]).unwrap();

        assert_eq!(links.len(), 3);
        assert_eq!(links.links[0].href.as_deref(), Some("https://example.com/nmap"));
        assert_eq!(links.links[1].href.as_deref(), Some("place:type=6&sort=14"));
        assert_eq!(links.links[2].href, None);
        assert_eq!(links.links[2].text.as_deref(), Some("No target"));
    }

    #[test]
    fn test_parent_list_includes_nested_folder_links() {
        let source = HtmlBookmarkSource::parse(EXPORT);
        let folders = source.list_folders();

        let red_team = source.links_for(&folders[1]).unwrap();
        assert_eq!(red_team.len(), 2);

        let payloads = source.links_for(&folders[2]).unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads.links[0].text.as_deref(), Some("XSS"));
    }

    #[test]
    fn test_next_links_when_list_is_not_a_sibling() {
        let html = r#"<DL><p>
            <DT><DIV><H3>Wrapped</H3></DIV>
            <DL><p><DT><A HREF="https://example.com">Example</A></DL><p>
        </DL>"#;
        let source = HtmlBookmarkSource::parse(html);
        let folders = source.list_folders();

        assert_eq!(folders.len(), 1);
        assert!(source.sibling_links(&folders[0]).is_none());

        let links = source.links_for(&folders[0]).unwrap();
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_folder_without_any_list() {
        let source = HtmlBookmarkSource::parse("<DL><DT><H3>Lonely</H3></DL>");
        let folders = source.list_folders();

        assert_eq!(folders.len(), 1);
        assert!(source.links_for(&folders[0]).is_none());
    }

    #[test]
    fn test_decode_utf8() {
        let (text, encoding) = BookmarkLoader::decode_text("Café ⚡".as_bytes());
        assert_eq!(text, "Café ⚡");
        assert_eq!(encoding, encoding_rs::UTF_8);
    }

    #[test]
    fn test_decode_latin1_fallback() {
        let bytes = b"Caf\xe9";
        let (text, encoding) = BookmarkLoader::decode_text(bytes);
        assert_eq!(text, "Café");
        assert_eq!(encoding, encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let result = BookmarkLoader::load(Path::new("/no/such/bookmarks.html"));
        assert!(matches!(result, Err(MigratorError::FileNotFound { .. })));
    }
}
