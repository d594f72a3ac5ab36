//! Shared Open Packaging Conventions plumbing for the .pptx and .docx writers.

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::Result;

pub const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
pub const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
pub const CT_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";
pub const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";

pub const EMU_PER_INCH: i64 = 914_400;

pub fn inches(v: f64) -> i64 {
    (v * EMU_PER_INCH as f64).round() as i64
}

pub fn xml_escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Control characters other than tab/newline are not legal XML 1.0.
            c if (c as u32) < 0x20 && c != '\t' && c != '\n' && c != '\r' => {}
            _ => out.push(ch),
        }
    }
    out
}

/// One named part of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub xml: String,
}

impl Part {
    pub fn new(name: impl Into<String>, xml: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            xml: xml.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Relationships {
    entries: Vec<(String, &'static str, String)>,
}

impl Relationships {
    /// Adds a relationship and returns its id (`rId1`, `rId2`, ...).
    pub fn add(&mut self, rel_type: &'static str, target: impl Into<String>) -> String {
        let id = format!("rId{}", self.entries.len() + 1);
        self.entries.push((id.clone(), rel_type, target.into()));
        id
    }

    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        out.push('\n');
        out.push_str(&format!(r#"<Relationships xmlns="{NS_RELS}">"#));
        out.push('\n');
        for (id, rel_type, target) in &self.entries {
            out.push_str(&format!(
                r#"  <Relationship Id="{id}" Type="{rel_type}" Target="{}"/>"#,
                xml_escape_text(target)
            ));
            out.push('\n');
        }
        out.push_str("</Relationships>");
        out
    }
}

/// `[Content_Types].xml` with the two defaults plus one override per part.
pub fn content_types_xml(overrides: &[(String, &'static str)]) -> String {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    out.push('\n');
    out.push_str(&format!(
        r#"  <Default Extension="rels" ContentType="{CT_RELS}"/>"#
    ));
    out.push('\n');
    out.push_str(r#"  <Default Extension="xml" ContentType="application/xml"/>"#);
    out.push('\n');
    for (part, content_type) in overrides {
        out.push_str(&format!(
            r#"  <Override PartName="/{part}" ContentType="{content_type}"/>"#
        ));
        out.push('\n');
    }
    out.push_str("</Types>");
    out
}

/// Root `_rels/.rels`: the main document part plus core properties.
pub fn package_rels_xml(main_part: &str) -> String {
    let mut rels = Relationships::default();
    rels.add(REL_OFFICE_DOCUMENT, main_part);
    rels.add(REL_CORE_PROPERTIES, "docProps/core.xml");
    rels.to_xml()
}

pub fn core_properties_xml(title: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties"
 xmlns:dc="http://purl.org/dc/elements/1.1/"
 xmlns:dcterms="http://purl.org/dc/terms/"
 xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>{}</dc:title>
  <dc:creator>office_from_html</dc:creator>
</cp:coreProperties>"#,
        xml_escape_text(title)
    )
}

/// Writes `parts` as a ZIP package and hands the writer back.
pub fn write_package<W: Write + Seek>(writer: W, parts: &[Part]) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let opts = SimpleFileOptions::default();
    for part in parts {
        zip.start_file(part.name.as_str(), opts)?;
        zip.write_all(part.xml.as_bytes())?;
    }
    Ok(zip.finish()?)
}

pub fn save_package(path: &Path, parts: &[Part]) -> Result<()> {
    let f = File::create(path)?;
    write_package(f, parts)?;
    Ok(())
}
