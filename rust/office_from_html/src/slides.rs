//! Plans the slide deck for a document: a title slide, content slides per
//! section, and a closing slide.

use crate::config::SlideLimits;
use crate::dom::Document;
use crate::section::{ContentItem, Section};
use crate::text::{display_lines, truncate_chars};

pub const META_CLASSES: &[&str] = &["meta-info", "author-info", "document-header"];
pub const DEFAULT_TITLE: &str = "Presentation";
pub const CLOSING_TITLE: &str = "Thank You";
pub const CLOSING_SUBTITLE: &str = "Questions & Discussion";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slide {
    Title {
        title: String,
        subtitle: Option<String>,
    },
    Bullets {
        title: String,
        items: Vec<String>,
    },
    Table {
        title: String,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl Slide {
    pub fn title(&self) -> &str {
        match self {
            Slide::Title { title, .. } | Slide::Bullets { title, .. } | Slide::Table { title, .. } => {
                title
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    pub title: String,
    pub slides: Vec<Slide>,
}

pub fn build_deck(doc: &Document, sections: &[Section], limits: &SlideLimits) -> Deck {
    let title = doc
        .title()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let subtitle = doc
        .find_class(doc.root(), META_CLASSES)
        .map(|m| truncate_chars(&doc.clean_text(m), limits.subtitle_max_chars))
        .filter(|s| !s.is_empty());

    let mut slides = vec![Slide::Title {
        title: title.clone(),
        subtitle,
    }];
    for section in sections.iter().take(limits.max_sections) {
        slides.extend(section_slides(section, limits));
    }
    slides.push(Slide::Title {
        title: CLOSING_TITLE.to_string(),
        subtitle: Some(CLOSING_SUBTITLE.to_string()),
    });
    Deck { title, slides }
}

/// A section with a table becomes exactly one table slide and its other
/// content is not shown. Otherwise its items are wrapped and chunked.
pub fn section_slides(section: &Section, limits: &SlideLimits) -> Vec<Slide> {
    if let Some((headers, rows)) = section.table() {
        let rows = rows
            .iter()
            .take(limits.max_table_rows)
            .map(|r| fit_row(r, headers.len()))
            .collect();
        return vec![Slide::Table {
            title: section.title.clone(),
            headers: headers.to_vec(),
            rows,
        }];
    }

    let lines: Vec<String> = section
        .content
        .iter()
        .flat_map(|item| match item {
            ContentItem::Text(t) | ContentItem::Subtitle(t) | ContentItem::Bullet(t) => {
                display_lines(t, limits.wrap_threshold, limits.wrap_width)
            }
            ContentItem::Table { .. } => Vec::new(),
        })
        .collect();

    lines
        .chunks(limits.items_per_slide.max(1))
        .enumerate()
        .map(|(i, chunk)| Slide::Bullets {
            title: if i == 0 {
                section.title.clone()
            } else {
                format!("{} (cont.)", section.title)
            },
            items: chunk.to_vec(),
        })
        .collect()
}

fn fit_row(row: &[String], width: usize) -> Vec<String> {
    let mut row: Vec<String> = row.iter().take(width).cloned().collect();
    row.resize(width, String::new());
    row
}
