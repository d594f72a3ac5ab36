//! Sections and their content items.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentItem {
    Text(String),
    Subtitle(String),
    Bullet(String),
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub content: Vec<ContentItem>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: Vec::new(),
        }
    }

    /// The last table item, if any.
    pub fn table(&self) -> Option<(&[String], &[Vec<String>])> {
        self.content.iter().rev().find_map(|item| match item {
            ContentItem::Table { headers, rows } => Some((headers.as_slice(), rows.as_slice())),
            _ => None,
        })
    }
}

/// Accumulates sections while walking a document. A section is kept only if
/// it received at least one item before the next one opened.
#[derive(Debug, Default)]
pub(crate) struct SectionBuilder {
    done: Vec<Section>,
    current: Option<Section>,
}

impl SectionBuilder {
    pub fn open(&mut self, title: String) {
        self.close();
        self.current = Some(Section::new(title));
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Items pushed while no section is open are dropped.
    pub fn push(&mut self, item: ContentItem) {
        if let Some(section) = self.current.as_mut() {
            section.content.push(item);
        }
    }

    fn close(&mut self) {
        if let Some(section) = self.current.take() {
            if !section.content.is_empty() {
                self.done.push(section);
            }
        }
    }

    pub fn finish(mut self) -> Vec<Section> {
        self.close();
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sections_are_dropped() {
        let mut b = SectionBuilder::default();
        b.push(ContentItem::Text("orphan".into()));
        b.open("Empty".into());
        b.open("Full".into());
        b.push(ContentItem::Bullet("x".into()));
        b.open("Trailing".into());
        let sections = b.finish();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Full");
        assert_eq!(sections[0].content, vec![ContentItem::Bullet("x".into())]);
    }

    #[test]
    fn last_table_is_selected() {
        let mut s = Section::new("T");
        for h in ["first", "second"] {
            s.content.push(ContentItem::Table {
                headers: vec![h.into()],
                rows: vec![vec!["1".into()]],
            });
        }
        let (headers, _) = s.table().unwrap();
        assert_eq!(headers, ["second".to_string()]);
    }
}
