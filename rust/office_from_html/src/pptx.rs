//! Serializes a planned [`Deck`] as a PresentationML (.pptx) package.
//!
//! Every slide uses a single blank layout; titles, bodies and tables are
//! explicit shapes positioned in inches on a 10 x 7.5 in canvas.

use std::path::Path;

use crate::error::Result;
use crate::ooxml::{
    content_types_xml, core_properties_xml, inches, package_rels_xml, save_package,
    xml_escape_text, Part, Relationships, CT_CORE,
};
use crate::segment::BULLET_GLYPH;
use crate::slides::{Deck, Slide};

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";

const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

pub const SLIDE_WIDTH_IN: f64 = 10.0;
pub const SLIDE_HEIGHT_IN: f64 = 7.5;

const TABLE_HEADER_FILL: &str = "34495E";

/// Position and size in inches.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl Frame {
    const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    fn off_ext(&self, prefix: &str) -> String {
        format!(
            r#"<{prefix}:off x="{}" y="{}"/><{prefix}:ext cx="{}" cy="{}"/>"#,
            inches(self.x),
            inches(self.y),
            inches(self.w),
            inches(self.h)
        )
    }
}

const TITLE_SLIDE_TITLE: Frame = Frame::new(0.5, 2.3, 9.0, 1.5);
const TITLE_SLIDE_SUBTITLE: Frame = Frame::new(0.5, 4.0, 9.0, 1.5);
const CONTENT_TITLE: Frame = Frame::new(0.5, 0.3, 9.0, 1.0);
const CONTENT_BODY: Frame = Frame::new(0.5, 1.5, 9.0, 5.5);
const TABLE_TITLE: Frame = Frame::new(0.5, 0.3, 9.0, 0.8);
const TABLE_FRAME: Frame = Frame::new(0.5, 1.5, 9.0, 4.5);

#[derive(Debug, Clone, Copy, Default)]
struct TextStyle {
    size_pt: u32,
    bold: bool,
    centered: bool,
    bullet: bool,
    color: Option<&'static str>,
}

fn run_xml(text: &str, style: TextStyle) -> String {
    let mut out = format!(r#"<a:r><a:rPr lang="en-US" sz="{}""#, style.size_pt * 100);
    if style.bold {
        out.push_str(r#" b="1""#);
    }
    out.push_str(r#" dirty="0">"#);
    if let Some(color) = style.color {
        out.push_str(&format!(
            r#"<a:solidFill><a:srgbClr val="{color}"/></a:solidFill>"#
        ));
    }
    out.push_str("</a:rPr><a:t>");
    out.push_str(&xml_escape_text(text));
    out.push_str("</a:t></a:r>");
    out
}

fn paragraph_xml(text: &str, style: TextStyle) -> String {
    let mut out = String::from("<a:p>");
    if style.centered {
        out.push_str(r#"<a:pPr algn="ctr"/>"#);
    } else if style.bullet && text.starts_with(BULLET_GLYPH) {
        out.push_str(r#"<a:pPr marL="0" indent="0"><a:buNone/></a:pPr>"#);
    } else if style.bullet {
        out.push_str(
            r#"<a:pPr marL="342900" indent="-342900"><a:buFont typeface="Arial"/><a:buChar char="•"/></a:pPr>"#,
        );
    }
    if text.is_empty() {
        out.push_str(&format!(
            r#"<a:endParaRPr lang="en-US" sz="{}" dirty="0"/>"#,
            style.size_pt * 100
        ));
    } else {
        out.push_str(&run_xml(text, style));
    }
    out.push_str("</a:p>");
    out
}

fn text_box_xml(id: u32, name: &str, frame: Frame, paragraphs: &[String]) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm>{}</a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr><p:txBody><a:bodyPr wrap="square" rtlCol="0"><a:normAutofit/></a:bodyPr><a:lstStyle/>{}</p:txBody></p:sp>"#,
        frame.off_ext("a"),
        paragraphs.concat()
    )
}

fn table_cell_xml(text: &str, style: TextStyle, fill: Option<&str>) -> String {
    let mut out = String::from("<a:tc><a:txBody><a:bodyPr/><a:lstStyle/>");
    out.push_str(&paragraph_xml(text, style));
    out.push_str("</a:txBody><a:tcPr>");
    if let Some(fill) = fill {
        out.push_str(&format!(
            r#"<a:solidFill><a:srgbClr val="{fill}"/></a:solidFill>"#
        ));
    }
    out.push_str("</a:tcPr></a:tc>");
    out
}

fn table_xml(id: u32, headers: &[String], rows: &[Vec<String>]) -> String {
    let cols = headers.len().max(1);
    let col_width = inches(TABLE_FRAME.w) / cols as i64;
    let row_height = inches(TABLE_FRAME.h) / (rows.len() + 1) as i64;

    let header_style = TextStyle {
        size_pt: 12,
        bold: true,
        color: Some("FFFFFF"),
        ..TextStyle::default()
    };
    let data_style = TextStyle {
        size_pt: 10,
        ..TextStyle::default()
    };

    let mut out = format!(
        r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="{id}" name="Table {id}"/><p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr/></p:nvGraphicFramePr><p:xfrm>{}</p:xfrm><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl><a:tblPr firstRow="1" bandRow="1"/><a:tblGrid>"#,
        TABLE_FRAME.off_ext("a")
    );
    for _ in 0..cols {
        out.push_str(&format!(r#"<a:gridCol w="{col_width}"/>"#));
    }
    out.push_str("</a:tblGrid>");

    out.push_str(&format!(r#"<a:tr h="{row_height}">"#));
    for h in headers {
        out.push_str(&table_cell_xml(h, header_style, Some(TABLE_HEADER_FILL)));
    }
    out.push_str("</a:tr>");
    for row in rows {
        out.push_str(&format!(r#"<a:tr h="{row_height}">"#));
        for cell in row {
            out.push_str(&table_cell_xml(cell, data_style, None));
        }
        out.push_str("</a:tr>");
    }
    out.push_str("</a:tbl></a:graphicData></a:graphic></p:graphicFrame>");
    out
}

fn slide_shapes(slide: &Slide) -> String {
    match slide {
        Slide::Title { title, subtitle } => {
            let title_style = TextStyle {
                size_pt: 40,
                bold: true,
                centered: true,
                ..TextStyle::default()
            };
            let mut shapes = text_box_xml(
                2,
                "Title 1",
                TITLE_SLIDE_TITLE,
                &[paragraph_xml(title, title_style)],
            );
            if let Some(subtitle) = subtitle {
                let style = TextStyle {
                    size_pt: 20,
                    centered: true,
                    ..TextStyle::default()
                };
                shapes.push_str(&text_box_xml(
                    3,
                    "Subtitle 2",
                    TITLE_SLIDE_SUBTITLE,
                    &[paragraph_xml(subtitle, style)],
                ));
            }
            shapes
        }
        Slide::Bullets { title, items } => {
            let title_style = TextStyle {
                size_pt: 32,
                bold: true,
                ..TextStyle::default()
            };
            let body_style = TextStyle {
                size_pt: 18,
                bullet: true,
                ..TextStyle::default()
            };
            let body: Vec<String> = items.iter().map(|i| paragraph_xml(i, body_style)).collect();
            let mut shapes = text_box_xml(
                2,
                "Title 1",
                CONTENT_TITLE,
                &[paragraph_xml(title, title_style)],
            );
            shapes.push_str(&text_box_xml(3, "Content 2", CONTENT_BODY, &body));
            shapes
        }
        Slide::Table {
            title,
            headers,
            rows,
        } => {
            let title_style = TextStyle {
                size_pt: 28,
                bold: true,
                ..TextStyle::default()
            };
            let mut shapes = text_box_xml(
                2,
                "Title 1",
                TABLE_TITLE,
                &[paragraph_xml(title, title_style)],
            );
            shapes.push_str(&table_xml(3, headers, rows));
            shapes
        }
    }
}

const GROUP_PROPS: &str = r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#;

fn slide_xml(slide: &Slide) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="{NS_A}" xmlns:r="{}" xmlns:p="{NS_P}"><p:cSld><p:spTree>{GROUP_PROPS}{}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
        crate::ooxml::NS_R,
        slide_shapes(slide)
    )
}

fn presentation_xml(slide_rids: &[String]) -> String {
    let mut ids = String::new();
    for (i, rid) in slide_rids.iter().enumerate() {
        ids.push_str(&format!(r#"<p:sldId id="{}" r:id="{rid}"/>"#, 256 + i));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="{NS_A}" xmlns:r="{}" xmlns:p="{NS_P}" saveSubsetFonts="1"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst>{ids}</p:sldIdLst><p:sldSz cx="{}" cy="{}"/><p:notesSz cx="{}" cy="{}"/></p:presentation>"#,
        crate::ooxml::NS_R,
        inches(SLIDE_WIDTH_IN),
        inches(SLIDE_HEIGHT_IN),
        inches(SLIDE_HEIGHT_IN),
        inches(SLIDE_WIDTH_IN),
    )
}

fn slide_master_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="{NS_A}" xmlns:r="{}" xmlns:p="{NS_P}"><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>{GROUP_PROPS}</p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst></p:sldMaster>"#,
        crate::ooxml::NS_R
    )
}

fn slide_layout_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="{NS_A}" xmlns:r="{}" xmlns:p="{NS_P}" type="blank" preserve="1"><p:cSld name="Blank"><p:spTree>{GROUP_PROPS}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
        crate::ooxml::NS_R
    )
}

fn theme_xml() -> String {
    let colors = [
        ("dk1", "000000"),
        ("lt1", "FFFFFF"),
        ("dk2", "2C3E50"),
        ("lt2", "ECF0F1"),
        ("accent1", "34495E"),
        ("accent2", "2980B9"),
        ("accent3", "27AE60"),
        ("accent4", "F39C12"),
        ("accent5", "8E44AD"),
        ("accent6", "C0392B"),
        ("hlink", "2980B9"),
        ("folHlink", "8E44AD"),
    ];
    let mut scheme = String::new();
    for (name, rgb) in colors {
        scheme.push_str(&format!(r#"<a:{name}><a:srgbClr val="{rgb}"/></a:{name}>"#));
    }
    let fill = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    let line = r#"<a:ln w="9525"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#;
    let effect = "<a:effectStyle><a:effectLst/></a:effectStyle>";
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="{NS_A}" name="Office from HTML"><a:themeElements><a:clrScheme name="Slate">{scheme}</a:clrScheme><a:fontScheme name="Calibri"><a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Plain"><a:fillStyleLst>{fill}{fill}{fill}</a:fillStyleLst><a:lnStyleLst>{line}{line}{line}</a:lnStyleLst><a:effectStyleLst>{effect}{effect}{effect}</a:effectStyleLst><a:bgFillStyleLst>{fill}{fill}{fill}</a:bgFillStyleLst></a:fmtScheme></a:themeElements></a:theme>"#
    )
}

/// All parts of the package, in write order.
pub fn package(deck: &Deck) -> Vec<Part> {
    let mut pres_rels = Relationships::default();
    pres_rels.add(REL_MASTER, "slideMasters/slideMaster1.xml");
    pres_rels.add(REL_THEME, "theme/theme1.xml");

    let mut overrides = vec![
        ("ppt/presentation.xml".to_string(), CT_PRESENTATION),
        ("ppt/slideMasters/slideMaster1.xml".to_string(), CT_MASTER),
        ("ppt/slideLayouts/slideLayout1.xml".to_string(), CT_LAYOUT),
        ("ppt/theme/theme1.xml".to_string(), CT_THEME),
        ("docProps/core.xml".to_string(), CT_CORE),
    ];

    let mut slide_parts = Vec::with_capacity(deck.slides.len() * 2);
    let mut slide_rids = Vec::with_capacity(deck.slides.len());
    for (i, slide) in deck.slides.iter().enumerate() {
        let n = i + 1;
        slide_rids.push(pres_rels.add(REL_SLIDE, format!("slides/slide{n}.xml")));
        overrides.push((format!("ppt/slides/slide{n}.xml"), CT_SLIDE));

        let mut rels = Relationships::default();
        rels.add(REL_LAYOUT, "../slideLayouts/slideLayout1.xml");
        slide_parts.push(Part::new(format!("ppt/slides/slide{n}.xml"), slide_xml(slide)));
        slide_parts.push(Part::new(
            format!("ppt/slides/_rels/slide{n}.xml.rels"),
            rels.to_xml(),
        ));
    }

    let mut master_rels = Relationships::default();
    master_rels.add(REL_LAYOUT, "../slideLayouts/slideLayout1.xml");
    master_rels.add(REL_THEME, "../theme/theme1.xml");
    let mut layout_rels = Relationships::default();
    layout_rels.add(REL_MASTER, "../slideMasters/slideMaster1.xml");

    let mut parts = vec![
        Part::new("[Content_Types].xml", content_types_xml(&overrides)),
        Part::new("_rels/.rels", package_rels_xml("ppt/presentation.xml")),
        Part::new("docProps/core.xml", core_properties_xml(&deck.title)),
        Part::new("ppt/presentation.xml", presentation_xml(&slide_rids)),
        Part::new("ppt/_rels/presentation.xml.rels", pres_rels.to_xml()),
        Part::new("ppt/slideMasters/slideMaster1.xml", slide_master_xml()),
        Part::new(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            master_rels.to_xml(),
        ),
        Part::new("ppt/slideLayouts/slideLayout1.xml", slide_layout_xml()),
        Part::new(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            layout_rels.to_xml(),
        ),
        Part::new("ppt/theme/theme1.xml", theme_xml()),
    ];
    parts.extend(slide_parts);
    parts
}

pub fn write_pptx(path: &Path, deck: &Deck) -> Result<()> {
    save_package(path, &package(deck))
}
