//! Owned, read-only HTML tree addressed by stable node ids.

use crate::text::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element { tag: String, classes: Vec<String> },
    Text(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Arena of nodes; index 0 is the document root.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn is_tag(&self, id: NodeId, tags: &[&str]) -> bool {
        self.tag(id).is_some_and(|t| tags.contains(&t))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.has_any_class(id, &[class])
    }

    pub fn has_any_class(&self, id: NodeId, wanted: &[&str]) -> bool {
        match &self.node(id).kind {
            NodeKind::Element { classes, .. } => {
                classes.iter().any(|c| wanted.contains(&c.as_str()))
            }
            _ => false,
        }
    }

    /// Pre-order walk over everything below `id`, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.node(id).children.clone();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// Element descendants of `id`, in document order.
    pub fn elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(id).filter(|&n| self.tag(n).is_some())
    }

    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.node(id).parent,
        }
    }

    pub fn find_tag(&self, id: NodeId, tags: &[&str]) -> Option<NodeId> {
        self.elements(id).find(|&n| self.is_tag(n, tags))
    }

    pub fn find_all_tags(&self, id: NodeId, tags: &[&str]) -> Vec<NodeId> {
        self.elements(id).filter(|&n| self.is_tag(n, tags)).collect()
    }

    pub fn find_class(&self, id: NodeId, classes: &[&str]) -> Option<NodeId> {
        self.elements(id).find(|&n| self.has_any_class(n, classes))
    }

    pub fn find_all_class(&self, id: NodeId, classes: &[&str]) -> Vec<NodeId> {
        self.elements(id)
            .filter(|&n| self.has_any_class(n, classes))
            .collect()
    }

    /// Direct element children carrying `tag`.
    pub fn child_elements(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        self.node(id)
            .children
            .iter()
            .copied()
            .filter(|&c| self.tag(c) == Some(tag))
            .collect()
    }

    /// Concatenated raw text below `id`; script and style bodies are skipped.
    pub fn text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            match &self.node(n).kind {
                NodeKind::Text(t) => out.push_str(t),
                NodeKind::Element { tag, .. } if tag == "script" || tag == "style" => {}
                _ => stack.extend(self.node(n).children.iter().rev().copied()),
            }
        }
    }

    /// Whitespace-normalized text below `id`.
    pub fn clean_text(&self, id: NodeId) -> String {
        normalize(&self.text(id))
    }

    /// Cleaned text of the first `<title>` element.
    pub fn title(&self) -> Option<String> {
        self.find_tag(self.root(), &["title"])
            .map(|t| self.clean_text(t))
    }
}

pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.node(id).children.iter().rev().copied());
        Some(id)
    }
}

pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.doc.node(id).parent;
        Some(id)
    }
}
