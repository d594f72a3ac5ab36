//! Renders the HTML tree as a WordprocessingML (.docx) document.
//!
//! Unlike the slide path this works on the tree directly. Nested elements
//! are handled once: each element that produces output is recorded in a
//! [`Consumed`] set, and anything below a consumed element is skipped.

use std::collections::HashSet;
use std::path::Path;

use crate::config::{HeadingStyle, HEADING_STYLES};
use crate::dom::{Document, NodeId};
use crate::error::Result;
use crate::ooxml::{
    content_types_xml, core_properties_xml, package_rels_xml, save_package, xml_escape_text,
    Part, Relationships, CT_CORE, NS_R,
};
use crate::segment::{extract_table, MIN_PARAGRAPH_CHARS, PAPER_CLASSES};
use crate::slides::META_CLASSES;
use crate::text::char_len;

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CT_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
const CT_NUMBERING: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml";
const CT_FOOTER: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml";

const REL_STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_NUMBERING: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
const REL_FOOTER: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer";

pub const ABSTRACT_CLASSES: &[&str] = &["abstract", "executive-summary"];
const PAPER_META_CLASSES: &[&str] = &["paper-authors", "paper-meta"];

const BULLET_NUM_ID: u32 = 1;
/// Ordered lists get numbering instances from here upward, one per list.
const FIRST_ORDERED_NUM_ID: u32 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    /// Points; `None` inherits from the paragraph style.
    pub size_pt: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphStyle {
    Normal,
    /// Index into [`HEADING_STYLES`]: 0 is the title, 1-3 section headings.
    Heading(usize),
    ListBullet,
    ListNumber,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Justify,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub style: ParagraphStyle,
    pub align: Align,
    pub num_id: Option<u32>,
    pub text: String,
    pub run: RunStyle,
}

impl Paragraph {
    fn new(style: ParagraphStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            align: Align::Left,
            num_id: None,
            text: text.into(),
            run: RunStyle::default(),
        }
    }

    fn normal(text: impl Into<String>) -> Self {
        Self::new(ParagraphStyle::Normal, text)
    }

    fn heading(level: usize, text: impl Into<String>) -> Self {
        Self::new(ParagraphStyle::Heading(level), text)
    }

    fn justified(text: impl Into<String>) -> Self {
        Self {
            align: Align::Justify,
            ..Self::normal(text)
        }
    }

    fn spacer() -> Self {
        Self::normal("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    PageBreak,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordDocument {
    pub title: Option<String>,
    pub blocks: Vec<Block>,
    pub ordered_lists: u32,
}

impl WordDocument {
    /// Body paragraphs, page breaks included.
    pub fn paragraph_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| !matches!(b, Block::Table(_)))
            .count()
    }

    fn push(&mut self, p: Paragraph) {
        self.blocks.push(Block::Paragraph(p));
    }

    fn next_ordered_list(&mut self) -> u32 {
        let id = FIRST_ORDERED_NUM_ID + self.ordered_lists;
        self.ordered_lists += 1;
        id
    }
}

/// Element ids already emitted.
#[derive(Debug, Default)]
pub struct Consumed(HashSet<NodeId>);

impl Consumed {
    pub fn insert(&mut self, id: NodeId) {
        self.0.insert(id);
    }

    /// True if `id` or any of its ancestors was consumed.
    pub fn covers(&self, doc: &Document, id: NodeId) -> bool {
        self.0.contains(&id) || doc.ancestors(id).any(|a| self.0.contains(&a))
    }
}

const WALKED_TAGS: &[&str] = &["h1", "h2", "h3", "p", "ul", "ol", "table", "div"];

pub fn compose(doc: &Document) -> WordDocument {
    let mut out = WordDocument {
        title: doc.title(),
        ..WordDocument::default()
    };
    let mut consumed = Consumed::default();
    let root = doc.root();

    if let Some(title) = out.title.clone() {
        let mut p = Paragraph::heading(0, title);
        p.align = Align::Center;
        out.push(p);
    }

    if let Some(meta) = doc.find_class(root, META_CLASSES) {
        consumed.insert(meta);
        let text = doc.clean_text(meta);
        if !text.is_empty() {
            let mut p = Paragraph::normal(text);
            p.align = Align::Center;
            p.run = RunStyle {
                italic: true,
                size_pt: Some(11),
                ..RunStyle::default()
            };
            out.push(p);
            out.push(Paragraph::spacer());
        }
    }

    if let Some(abs) = doc.find_class(root, ABSTRACT_CLASSES) {
        consumed.insert(abs);
        if let Some(h) = doc.find_tag(abs, &["h2", "h3"]) {
            out.push(Paragraph::heading(2, doc.clean_text(h)));
        }
        for p in doc.find_all_tags(abs, &["p"]) {
            let text = doc.clean_text(p);
            if !text.is_empty() {
                out.push(Paragraph::justified(text));
            }
        }
        out.push(Paragraph::spacer());
    }

    for el in doc.elements(root) {
        if !doc.is_tag(el, WALKED_TAGS) || consumed.covers(doc, el) {
            continue;
        }
        if doc.ancestors(el).any(|a| doc.is_tag(a, &["style", "script"])) {
            continue;
        }
        if emit_element(doc, el, &mut out) {
            consumed.insert(el);
        }
    }
    out
}

/// Emits one element; returns whether it was handled.
fn emit_element(doc: &Document, el: NodeId, out: &mut WordDocument) -> bool {
    let Some(tag) = doc.tag(el) else { return false };
    match tag {
        "h1" | "h2" | "h3" => {
            let text = doc.clean_text(el);
            if text.is_empty() {
                return false;
            }
            if tag == "h1" && out.title.as_deref() == Some(text.as_str()) {
                return false;
            }
            let level = match tag {
                "h1" => 1,
                "h2" => 2,
                _ => 3,
            };
            out.push(Paragraph::heading(level, text));
            true
        }
        "p" => {
            let text = doc.clean_text(el);
            if char_len(&text) <= MIN_PARAGRAPH_CHARS {
                return false;
            }
            let mut p = Paragraph::justified(text);
            p.run.bold = doc.find_tag(el, &["strong", "b"]).is_some();
            p.run.italic = doc.find_tag(el, &["em", "i"]).is_some();
            out.push(p);
            true
        }
        "ul" | "ol" => {
            let (style, num_id) = if tag == "ul" {
                (ParagraphStyle::ListBullet, BULLET_NUM_ID)
            } else {
                (ParagraphStyle::ListNumber, out.next_ordered_list())
            };
            push_list_items(doc, el, style, num_id, out);
            true
        }
        "table" => {
            if let Some((headers, rows)) = extract_table(doc, el) {
                out.blocks.push(Block::Table(Table { headers, rows }));
                out.push(Paragraph::spacer());
            }
            true
        }
        "div" if doc.has_any_class(el, PAPER_CLASSES) => {
            emit_paper(doc, el, out);
            true
        }
        _ => false,
    }
}

fn push_list_items(
    doc: &Document,
    list: NodeId,
    style: ParagraphStyle,
    num_id: u32,
    out: &mut WordDocument,
) {
    for li in doc.child_elements(list, "li") {
        let text = doc.clean_text(li);
        if !text.is_empty() {
            let mut p = Paragraph::new(style, text);
            p.num_id = Some(num_id);
            out.push(p);
        }
    }
}

fn emit_paper(doc: &Document, paper: NodeId, out: &mut WordDocument) {
    out.blocks.push(Block::PageBreak);

    if let Some(title) = doc.find_class(paper, &["paper-title"]) {
        let text = doc.clean_text(title);
        if !text.is_empty() {
            out.push(Paragraph::heading(2, text));
        }
    }
    if let Some(meta) = doc.find_class(paper, PAPER_META_CLASSES) {
        let text = doc.clean_text(meta);
        if !text.is_empty() {
            let mut p = Paragraph::normal(text);
            p.run = RunStyle {
                italic: true,
                size_pt: Some(10),
                ..RunStyle::default()
            };
            out.push(p);
        }
    }

    for b in doc.find_all_class(paper, &["section-box"]) {
        if let Some(title) = doc.find_class(b, &["section-title"]) {
            let text = doc.clean_text(title);
            if !text.is_empty() {
                out.push(Paragraph::heading(3, text));
            }
        }
        for p in doc.find_all_tags(b, &["p"]) {
            let text = doc.clean_text(p);
            if !text.is_empty() {
                out.push(Paragraph::justified(text));
            }
        }
        for list in doc.find_all_tags(b, &["ul", "ol"]) {
            push_list_items(doc, list, ParagraphStyle::ListBullet, BULLET_NUM_ID, out);
        }
    }
}

fn run_xml(text: &str, style: RunStyle) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    out.push_str("<w:r>");
    if style.bold || style.italic || style.size_pt.is_some() {
        out.push_str("<w:rPr>");
        if style.bold {
            out.push_str("<w:b/>");
        }
        if style.italic {
            out.push_str("<w:i/>");
        }
        if let Some(pt) = style.size_pt {
            out.push_str(&format!(r#"<w:sz w:val="{}"/>"#, pt * 2));
        }
        out.push_str("</w:rPr>");
    }
    out.push_str("<w:t xml:space=\"preserve\">");
    out.push_str(&xml_escape_text(text));
    out.push_str("</w:t></w:r>");
    out
}

fn paragraph_xml(p: &Paragraph) -> String {
    let mut out = String::new();
    out.push_str("<w:p>");

    let style_id = match p.style {
        ParagraphStyle::Normal => None,
        ParagraphStyle::Heading(level) => {
            Some(HEADING_STYLES[level.min(HEADING_STYLES.len() - 1)].style_id)
        }
        ParagraphStyle::ListBullet => Some("ListBullet"),
        ParagraphStyle::ListNumber => Some("ListNumber"),
    };
    if style_id.is_some() || p.num_id.is_some() || p.align != Align::Left {
        out.push_str("<w:pPr>");
        if let Some(id) = style_id {
            out.push_str(&format!(r#"<w:pStyle w:val="{id}"/>"#));
        }
        if let Some(num_id) = p.num_id {
            out.push_str("<w:numPr>");
            out.push_str(r#"<w:ilvl w:val="0"/>"#);
            out.push_str(&format!(r#"<w:numId w:val="{num_id}"/>"#));
            out.push_str("</w:numPr>");
        }
        match p.align {
            Align::Left => {}
            Align::Center => out.push_str(r#"<w:jc w:val="center"/>"#),
            Align::Justify => out.push_str(r#"<w:jc w:val="both"/>"#),
        }
        out.push_str("</w:pPr>");
    }

    out.push_str(&run_xml(&p.text, p.run));
    out.push_str("</w:p>");
    out
}

fn table_cell_xml(text: &str, run: RunStyle) -> String {
    let mut out = String::from("<w:tc><w:tcPr><w:tcW w:w=\"0\" w:type=\"auto\"/></w:tcPr>");
    out.push_str(&paragraph_xml(&Paragraph {
        run,
        ..Paragraph::normal(text)
    }));
    out.push_str("</w:tc>");
    out
}

fn table_xml(t: &Table) -> String {
    let cols = t.headers.len();
    let header_run = RunStyle {
        bold: true,
        size_pt: Some(11),
        ..RunStyle::default()
    };
    let data_run = RunStyle {
        size_pt: Some(10),
        ..RunStyle::default()
    };

    let mut out = String::new();
    out.push_str("<w:tbl>");
    out.push_str("<w:tblPr>");
    out.push_str(r#"<w:tblStyle w:val="GridTable"/>"#);
    out.push_str(r#"<w:tblW w:w="0" w:type="auto"/>"#);
    out.push_str(r#"<w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/>"#);
    out.push_str("</w:tblPr>");
    out.push_str("<w:tblGrid>");
    for _ in 0..cols {
        out.push_str("<w:gridCol/>");
    }
    out.push_str("</w:tblGrid>");

    out.push_str("<w:tr><w:trPr><w:tblHeader/></w:trPr>");
    for h in &t.headers {
        out.push_str(&table_cell_xml(h, header_run));
    }
    out.push_str("</w:tr>");

    for row in &t.rows {
        out.push_str("<w:tr>");
        for i in 0..cols {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            out.push_str(&table_cell_xml(cell, data_run));
        }
        out.push_str("</w:tr>");
    }

    out.push_str("</w:tbl>");
    out
}

fn document_xml(doc: &WordDocument, footer_rid: &str) -> String {
    let mut body = String::new();
    for b in &doc.blocks {
        match b {
            Block::Paragraph(p) => body.push_str(&paragraph_xml(p)),
            Block::Table(t) => body.push_str(&table_xml(t)),
            Block::PageBreak => body.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#),
        }
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{NS_W}" xmlns:r="{NS_R}">
  <w:body>
    {body}
    <w:sectPr>
      <w:footerReference w:type="default" r:id="{footer_rid}"/>
      <w:pgSz w:w="12240" w:h="15840"/>
      <w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>
      <w:cols w:space="708"/>
      <w:docGrid w:linePitch="360"/>
    </w:sectPr>
  </w:body>
</w:document>"#
    )
}

fn footer_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:ftr xmlns:w="{NS_W}">
  <w:p><w:pPr><w:pStyle w:val="Footer"/><w:jc w:val="center"/></w:pPr><w:r><w:t xml:space="preserve">Page </w:t></w:r></w:p>
</w:ftr>"#
    )
}

fn heading_style_xml(h: &HeadingStyle) -> String {
    let mut out = format!(
        r#"  <w:style w:type="paragraph" w:styleId="{}">
    <w:name w:val="{}"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:uiPriority w:val="9"/>
    <w:qFormat/>
    <w:pPr>
      <w:keepNext/>
      <w:spacing w:before="240" w:after="120"/>
"#,
        h.style_id, h.name
    );
    if let Some(level) = h.outline_level {
        out.push_str(&format!("      <w:outlineLvl w:val=\"{level}\"/>\n"));
    }
    out.push_str(&format!(
        r#"    </w:pPr>
    <w:rPr>
      <w:b/>
      <w:color w:val="{}"/>
      <w:sz w:val="{}"/>
    </w:rPr>
  </w:style>
"#,
        h.color,
        h.size_pt * 2
    ));
    out
}

fn styles_xml() -> String {
    let mut out = String::new();
    out.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{NS_W}">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:spacing w:after="120"/></w:pPr>
    <w:rPr><w:sz w:val="22"/></w:rPr>
  </w:style>
"#
    ));
    for h in &HEADING_STYLES {
        out.push_str(&heading_style_xml(h));
    }
    out.push_str(
        r#"  <w:style w:type="paragraph" w:styleId="ListBullet">
    <w:name w:val="List Bullet"/>
    <w:basedOn w:val="Normal"/>
    <w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="ListNumber">
    <w:name w:val="List Number"/>
    <w:basedOn w:val="Normal"/>
    <w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Footer">
    <w:name w:val="footer"/>
    <w:basedOn w:val="Normal"/>
    <w:rPr><w:sz w:val="18"/></w:rPr>
  </w:style>
  <w:style w:type="table" w:styleId="GridTable">
    <w:name w:val="Grid Table"/>
    <w:tblPr>
      <w:tblBorders>
        <w:top w:val="single" w:sz="4" w:space="0" w:color="95B3D7"/>
        <w:left w:val="single" w:sz="4" w:space="0" w:color="95B3D7"/>
        <w:bottom w:val="single" w:sz="4" w:space="0" w:color="95B3D7"/>
        <w:right w:val="single" w:sz="4" w:space="0" w:color="95B3D7"/>
        <w:insideH w:val="single" w:sz="4" w:space="0" w:color="95B3D7"/>
        <w:insideV w:val="single" w:sz="4" w:space="0" w:color="95B3D7"/>
      </w:tblBorders>
    </w:tblPr>
    <w:tblStylePr w:type="firstRow">
      <w:rPr><w:b/></w:rPr>
      <w:tcPr><w:shd w:val="clear" w:color="auto" w:fill="DBE5F1"/></w:tcPr>
    </w:tblStylePr>
  </w:style>
</w:styles>"#,
    );
    out
}

fn numbering_xml(ordered_lists: u32) -> String {
    let mut out = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="{NS_W}">
  <w:abstractNum w:abstractNumId="1">
    <w:multiLevelType w:val="singleLevel"/>
    <w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl>
  </w:abstractNum>
  <w:abstractNum w:abstractNumId="2">
    <w:multiLevelType w:val="singleLevel"/>
    <w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="decimal"/><w:lvlText w:val="%1."/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl>
  </w:abstractNum>
  <w:num w:numId="{BULLET_NUM_ID}"><w:abstractNumId w:val="1"/></w:num>
"#
    );
    for i in 0..ordered_lists {
        out.push_str(&format!(
            r#"  <w:num w:numId="{}"><w:abstractNumId w:val="2"/><w:lvlOverride w:ilvl="0"><w:startOverride w:val="1"/></w:lvlOverride></w:num>
"#,
            FIRST_ORDERED_NUM_ID + i
        ));
    }
    out.push_str("</w:numbering>");
    out
}

pub fn package(doc: &WordDocument) -> Vec<Part> {
    let mut rels = Relationships::default();
    rels.add(REL_STYLES, "styles.xml");
    rels.add(REL_NUMBERING, "numbering.xml");
    let footer_rid = rels.add(REL_FOOTER, "footer1.xml");

    let overrides = vec![
        ("word/document.xml".to_string(), CT_DOCUMENT),
        ("word/styles.xml".to_string(), CT_STYLES),
        ("word/numbering.xml".to_string(), CT_NUMBERING),
        ("word/footer1.xml".to_string(), CT_FOOTER),
        ("docProps/core.xml".to_string(), CT_CORE),
    ];

    vec![
        Part::new("[Content_Types].xml", content_types_xml(&overrides)),
        Part::new("_rels/.rels", package_rels_xml("word/document.xml")),
        Part::new(
            "docProps/core.xml",
            core_properties_xml(doc.title.as_deref().unwrap_or("")),
        ),
        Part::new("word/document.xml", document_xml(doc, &footer_rid)),
        Part::new("word/_rels/document.xml.rels", rels.to_xml()),
        Part::new("word/styles.xml", styles_xml()),
        Part::new("word/numbering.xml", numbering_xml(doc.ordered_lists)),
        Part::new("word/footer1.xml", footer_xml()),
    ]
}

pub fn write_docx(path: &Path, doc: &WordDocument) -> Result<()> {
    save_package(path, &package(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse;
    use crate::ooxml::test_util::unzip;

    fn paragraphs(doc: &WordDocument) -> Vec<&Paragraph> {
        doc.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph(p) if !p.text.is_empty() => Some(p),
                _ => None,
            })
            .collect()
    }

    fn texts(doc: &WordDocument) -> Vec<&str> {
        paragraphs(doc).into_iter().map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn short_paragraphs_are_dropped() {
        let out = compose(&parse("<p>Hi.</p><p>This is long enough.</p><p>0123456789</p>"));
        assert_eq!(texts(&out), vec!["This is long enough."]);
        assert_eq!(paragraphs(&out)[0].align, Align::Justify);
    }

    #[test]
    fn duplicate_title_heading_is_suppressed() {
        let html = "<title>Crop Study</title><h1>Crop Study</h1><h1>Other</h1><h2>Sub</h2><h3> </h3>";
        let out = compose(&parse(html));
        let styles: Vec<(ParagraphStyle, &str)> = paragraphs(&out)
            .into_iter()
            .map(|p| (p.style, p.text.as_str()))
            .collect();
        assert_eq!(
            styles,
            vec![
                (ParagraphStyle::Heading(0), "Crop Study"),
                (ParagraphStyle::Heading(1), "Other"),
                (ParagraphStyle::Heading(2), "Sub"),
            ]
        );
        assert_eq!(paragraphs(&out)[0].align, Align::Center);
    }

    #[test]
    fn meta_and_abstract_are_emitted_once() {
        let html = r#"
            <div class="meta-info">By A. Author, 2024</div>
            <div class="abstract"><h2>Abstract</h2><p>We study crops in depth.</p><p>x</p></div>
            <p>Body paragraph goes here.</p>"#;
        let out = compose(&parse(html));
        assert_eq!(
            texts(&out),
            vec![
                "By A. Author, 2024",
                "Abstract",
                "We study crops in depth.",
                "x",
                "Body paragraph goes here.",
            ]
        );
        let meta = paragraphs(&out)[0];
        assert!(meta.run.italic);
        assert_eq!(meta.align, Align::Center);
    }

    #[test]
    fn emphasis_applies_to_whole_paragraph() {
        let out = compose(&parse("<p>Mostly plain but <strong>partly</strong> bold.</p>"));
        let p = paragraphs(&out)[0];
        assert!(p.run.bold);
        assert!(!p.run.italic);
    }

    #[test]
    fn lists_are_not_reprocessed() {
        let html = "<ul><li><p>Nested paragraph text</p></li><li>two</li></ul>\
                    <ol><li>first</li></ol><ol><li>again</li></ol>";
        let out = compose(&parse(html));
        let items: Vec<(ParagraphStyle, Option<u32>, &str)> = paragraphs(&out)
            .into_iter()
            .map(|p| (p.style, p.num_id, p.text.as_str()))
            .collect();
        assert_eq!(
            items,
            vec![
                (ParagraphStyle::ListBullet, Some(1), "Nested paragraph text"),
                (ParagraphStyle::ListBullet, Some(1), "two"),
                (ParagraphStyle::ListNumber, Some(2), "first"),
                (ParagraphStyle::ListNumber, Some(3), "again"),
            ]
        );
        assert_eq!(out.ordered_lists, 2);
    }

    #[test]
    fn paper_summary_starts_on_new_page() {
        let html = r#"
            <div class="paper-summary">
              <div class="paper-title">Deep Crop Models</div>
              <div class="paper-authors">Doe et al.</div>
              <div class="section-box">
                <div class="section-title">Method</div>
                <p>Uses soil data.</p>
                <ul><li>a</li><li>b</li></ul>
              </div>
            </div>"#;
        let out = compose(&parse(html));
        assert_eq!(out.blocks[0], Block::PageBreak);
        assert_eq!(
            texts(&out),
            vec!["Deep Crop Models", "Doe et al.", "Method", "Uses soil data.", "a", "b"]
        );
        let p = paragraphs(&out);
        assert_eq!(p[0].style, ParagraphStyle::Heading(2));
        assert_eq!(p[1].run.size_pt, Some(10));
        assert_eq!(p[2].style, ParagraphStyle::Heading(3));
        assert_eq!(p[4].style, ParagraphStyle::ListBullet);
    }

    #[test]
    fn tables_become_grids() {
        let html = "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td></tr></table>";
        let out = compose(&parse(html));
        assert_eq!(
            out.blocks[0],
            Block::Table(Table {
                headers: vec!["A".into(), "B".into()],
                rows: vec![vec!["1".into()]],
            })
        );
        let xml = table_xml(match &out.blocks[0] {
            Block::Table(t) => t,
            _ => unreachable!(),
        });
        assert_eq!(xml.matches("<w:tc>").count(), 4);
        assert!(xml.contains("<w:b/>"));
    }

    #[test]
    fn consumed_set_checks_ancestors() {
        let doc = parse("<div><p><b>x</b></p></div>");
        let div = doc.find_tag(doc.root(), &["div"]).unwrap();
        let b = doc.find_tag(doc.root(), &["b"]).unwrap();
        let mut consumed = Consumed::default();
        assert!(!consumed.covers(&doc, b));
        consumed.insert(div);
        assert!(consumed.covers(&doc, div));
        assert!(consumed.covers(&doc, b));
    }

    #[test]
    fn package_contains_styles_numbering_and_footer() {
        let out = compose(&parse("<title>T &amp; U</title><ol><li>one</li></ol>"));
        let files = unzip(&package(&out));
        let rels = &files["word/_rels/document.xml.rels"];
        assert!(rels.contains("styles.xml"));
        assert!(rels.contains("footer1.xml"));
        assert!(files["word/document.xml"].contains(r#"<w:footerReference w:type="default" r:id="rId3"/>"#));
        assert!(files["word/footer1.xml"].contains(">Page </w:t>"));
        assert!(files["word/numbering.xml"].contains(r#"<w:num w:numId="2">"#));
        assert!(files["word/styles.xml"].contains(r#"<w:color w:val="2C3E50"/>"#));
        assert!(files["word/document.xml"].contains("T &amp; U"));
    }

    #[test]
    fn writes_readable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");
        let out = compose(&parse("<h1>Heading</h1><p>Some body text here.</p>"));
        write_docx(&path, &out).unwrap();
        let archive = zip::ZipArchive::new(std::fs::File::open(&path).unwrap()).unwrap();
        assert_eq!(archive.len(), 8);
        assert_eq!(out.paragraph_count(), 2);
    }
}
