//! Reads HTML files into the owned [`Document`] tree.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::dom::{Document, NodeId, NodeKind};
use crate::error::{Error, Result};

/// Loads and parses `path`. Missing files map to [`Error::FileNotFound`] and
/// non-UTF-8 content to [`Error::Parse`].
pub fn load(path: &Path) -> Result<Document> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })?;
    let html = String::from_utf8(bytes).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse(&html))
}

/// Parses HTML text. html5ever recovers from malformed markup, so this never
/// fails.
pub fn parse(html: &str) -> Document {
    let dom = parse_document(RcDom::default(), Default::default()).one(html);
    let mut doc = Document::new();
    let root = doc.root();
    let mut stack: Vec<(Handle, NodeId)> = dom
        .document
        .children
        .borrow()
        .iter()
        .rev()
        .map(|c| (c.clone(), root))
        .collect();
    while let Some((node, parent)) = stack.pop() {
        if let Some(id) = lower(&node, parent, &mut doc) {
            stack.extend(node.children.borrow().iter().rev().map(|c| (c.clone(), id)));
        }
    }
    doc
}

/// Appends `node` under `parent`; returns the new id when its children
/// should be lowered too.
fn lower(node: &Handle, parent: NodeId, doc: &mut Document) -> Option<NodeId> {
    match &node.data {
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.to_string().to_ascii_lowercase();
            let classes = attrs
                .borrow()
                .iter()
                .find(|a| &*a.name.local == "class")
                .map(|a| a.value.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default();
            Some(doc.append(parent, NodeKind::Element { tag, classes }))
        }
        NodeData::Text { contents } => {
            doc.append(parent, NodeKind::Text(contents.borrow().to_string()));
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("nope.html")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&[0x3c, 0x70, 0x3e, 0xff, 0xfe]).unwrap();
        let err = load(f.path()).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn loads_file_contents() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all("<title>Résumé</title><h1>Intro</h1>".as_bytes())
            .unwrap();
        let doc = load(f.path()).unwrap();
        assert_eq!(doc.title().as_deref(), Some("Résumé"));
        assert!(doc.find_tag(doc.root(), &["h1"]).is_some());
    }

    #[test]
    fn class_attribute_is_split() {
        let doc = parse(r#"<div class=" a  b ">x</div><div id="c">y</div>"#);
        let divs = doc.find_all_tags(doc.root(), &["div"]);
        assert!(doc.has_class(divs[0], "a") && doc.has_class(divs[0], "b"));
        assert!(!doc.has_any_class(divs[1], &["c"]));
    }

    #[test]
    fn deep_nesting_is_lowered_without_recursion() {
        let depth = 100_000;
        let html = format!("<h1>Deep</h1>{}<p>bottom</p>", "<span>".repeat(depth));
        let handle = std::thread::Builder::new()
            .stack_size(64 * 1024 * 1024)
            .spawn(move || {
                let doc = parse(&html);
                let p = doc.find_tag(doc.root(), &["p"]).unwrap();
                (doc.ancestors(p).count(), doc.text(doc.root()))
            })
            .unwrap();
        let (ancestors, text) = handle.join().unwrap();
        assert!(ancestors > depth);
        assert_eq!(text, "Deepbottom");
    }

    #[test]
    fn comments_are_dropped() {
        let doc = parse("<p>a<!-- hidden -->b</p>");
        let p = doc.find_tag(doc.root(), &["p"]).unwrap();
        assert_eq!(doc.text(p), "ab");
    }
}
