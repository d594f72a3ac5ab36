//! Splits a document into titled sections.
//!
//! Two strategies exist. Structured extraction understands the paper-summary
//! markup (`paper-summary`/`paper-entry` blocks with `section-box` children).
//! Simple extraction handles any document with headings, paragraphs, lists
//! and tables. [`segment`] prefers the structured result unless it found too
//! few sections.

use tracing::debug;

use crate::config::SegmentOptions;
use crate::dom::{Document, NodeId};
use crate::section::{ContentItem, Section, SectionBuilder};
use crate::text::char_len;

pub const PAPER_CLASSES: &[&str] = &["paper-summary", "paper-entry"];
pub const BOX_CLASSES: &[&str] = &["section-box", "key-findings", "results-box"];
pub const BULLET_GLYPH: &str = "•";

/// Paragraphs with this many characters or fewer are treated as noise.
pub const MIN_PARAGRAPH_CHARS: usize = 10;

pub fn segment(doc: &Document, opts: &SegmentOptions) -> Vec<Section> {
    let structured = extract_structured(doc);
    if structured.len() >= opts.fallback_min_sections {
        return structured;
    }
    debug!(
        found = structured.len(),
        min = opts.fallback_min_sections,
        "structured extraction found too few sections, using simple extraction"
    );
    extract_simple(doc)
}

pub fn extract_structured(doc: &Document) -> Vec<Section> {
    let mut sections = SectionBuilder::default();
    for el in doc.elements(doc.root()) {
        match doc.tag(el) {
            Some("h1" | "h2") => sections.open(doc.clean_text(el)),
            Some("h3") if sections.is_open() => {
                sections.push(ContentItem::Subtitle(doc.clean_text(el)));
            }
            Some("div") if sections.is_open() && doc.has_any_class(el, PAPER_CLASSES) => {
                push_paper(doc, el, &mut sections);
            }
            _ => {}
        }
    }
    sections.finish()
}

fn push_paper(doc: &Document, paper: NodeId, sections: &mut SectionBuilder) {
    if let Some(title) = doc.find_class(paper, &["paper-title"]) {
        sections.push(ContentItem::Text(doc.clean_text(title)));
    }
    for b in doc.find_all_class(paper, BOX_CLASSES) {
        if let Some(title) = doc.find_class(b, &["section-title"]) {
            sections.push(ContentItem::Subtitle(doc.clean_text(title)));
        }
        for li in doc.find_all_tags(b, &["li"]) {
            sections.push(ContentItem::Bullet(doc.clean_text(li)));
        }
    }
}

pub fn extract_simple(doc: &Document) -> Vec<Section> {
    let mut sections = SectionBuilder::default();
    for el in doc.elements(doc.root()) {
        let Some(tag) = doc.tag(el) else { continue };
        if matches!(tag, "h1" | "h2") {
            sections.open(doc.clean_text(el));
            continue;
        }
        if !sections.is_open() {
            continue;
        }
        match tag {
            "h3" => sections.push(ContentItem::Text(doc.clean_text(el))),
            "p" => {
                let text = doc.clean_text(el);
                if char_len(&text) > MIN_PARAGRAPH_CHARS {
                    sections.push(ContentItem::Text(text));
                }
            }
            "ul" | "ol" => {
                for li in doc.child_elements(el, "li") {
                    let text = doc.clean_text(li);
                    if !text.is_empty() {
                        sections.push(ContentItem::Text(format!("{BULLET_GLYPH} {text}")));
                    }
                }
            }
            "table" => {
                if let Some((headers, rows)) = extract_table(doc, el) {
                    sections.push(ContentItem::Table { headers, rows });
                }
            }
            _ => {}
        }
    }
    sections.finish()
}

/// Header cells are every `th`; data rows are every `tr` after the first.
/// Returns `None` when either is empty.
pub fn extract_table(doc: &Document, table: NodeId) -> Option<(Vec<String>, Vec<Vec<String>>)> {
    let headers: Vec<String> = doc
        .find_all_tags(table, &["th"])
        .into_iter()
        .map(|th| doc.clean_text(th))
        .collect();
    let rows: Vec<Vec<String>> = doc
        .find_all_tags(table, &["tr"])
        .into_iter()
        .skip(1)
        .map(|tr| {
            doc.find_all_tags(tr, &["td"])
                .into_iter()
                .map(|td| doc.clean_text(td))
                .collect::<Vec<_>>()
        })
        .filter(|row| !row.is_empty())
        .collect();
    if headers.is_empty() || rows.is_empty() {
        return None;
    }
    Some((headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse;

    fn paper(title: &str) -> String {
        format!(
            r#"<h2>{title}</h2>
            <div class="paper-summary">
              <div class="paper-title">Paper {title}</div>
              <div class="section-box">
                <div class="section-title">Findings</div>
                <ul><li>one</li><li>two</li><li>three</li></ul>
              </div>
            </div>"#
        )
    }

    #[test]
    fn paper_summary_yields_text_subtitle_then_bullets() {
        let doc = parse(&paper("A"));
        let sections = extract_structured(&doc);
        assert_eq!(sections.len(), 1);
        assert_eq!(
            sections[0].content,
            vec![
                ContentItem::Text("Paper A".into()),
                ContentItem::Subtitle("Findings".into()),
                ContentItem::Bullet("one".into()),
                ContentItem::Bullet("two".into()),
                ContentItem::Bullet("three".into()),
            ]
        );
    }

    #[test]
    fn three_structured_sections_are_kept() {
        let html = format!("{}{}{}<p>A paragraph that is long.</p>", paper("A"), paper("B"), paper("C"));
        let doc = parse(&html);
        let sections = segment(&doc, &SegmentOptions::default());
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[2].title, "C");
        assert!(matches!(sections[0].content[0], ContentItem::Text(ref t) if t == "Paper A"));
    }

    #[test]
    fn two_headings_fall_back_to_simple_extraction() {
        let html = r#"
            <h1>Intro</h1><h3>Background</h3><p>This paragraph is long enough.</p>
            <h2>Method</h2><h3>Steps</h3><ul><li>step one</li><li> </li></ul><p>Too short</p>"#;
        let doc = parse(html);
        assert_eq!(extract_structured(&doc).len(), 2);
        let sections = segment(&doc, &SegmentOptions::default());
        assert_eq!(sections, extract_simple(&doc));
        assert_eq!(
            sections[0].content,
            vec![
                ContentItem::Text("Background".into()),
                ContentItem::Text("This paragraph is long enough.".into()),
            ]
        );
        assert_eq!(
            sections[1].content,
            vec![
                ContentItem::Text("Steps".into()),
                ContentItem::Text("• step one".into()),
            ]
        );
    }

    #[test]
    fn threshold_is_configurable() {
        let doc = parse("<h1>A</h1><h3>sub</h3><p>ignored by structured pass</p>");
        let opts = SegmentOptions {
            fallback_min_sections: 1,
        };
        assert_eq!(
            segment(&doc, &opts)[0].content,
            vec![ContentItem::Subtitle("sub".into())]
        );
    }

    #[test]
    fn content_before_first_heading_is_ignored() {
        let doc = parse("<p>Preamble that is quite long.</p><h1>A</h1><p>Body text that is long.</p>");
        let sections = extract_simple(&doc);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content.len(), 1);
    }

    #[test]
    fn table_headers_and_rows() {
        let doc = parse("<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>");
        let table = doc.find_tag(doc.root(), &["table"]).unwrap();
        let (headers, rows) = extract_table(&doc, table).unwrap();
        assert_eq!(headers, vec!["A", "B"]);
        assert_eq!(rows, vec![vec!["1".to_string(), "2".to_string()]]);
    }

    #[test]
    fn tables_without_headers_or_rows_are_dropped() {
        let doc = parse(
            "<h1>T</h1><table><tr><td>1</td></tr><tr><td>2</td></tr></table>\
             <table><tr><th>only header</th></tr></table>",
        );
        for table in doc.find_all_tags(doc.root(), &["table"]) {
            assert!(extract_table(&doc, table).is_none());
        }
        assert!(extract_simple(&doc).is_empty());
    }
}
