//! Compiled-in configuration: the batch table, extraction thresholds, slide
//! limits and the Word heading theme.

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// PowerPoint presentation (.pptx).
    Pptx,
    /// Word document (.docx).
    Docx,
}

/// One entry of the batch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    pub input: &'static str,
    pub output: &'static str,
    pub format: Format,
}

impl Job {
    const fn new(input: &'static str, output: &'static str, format: Format) -> Self {
        Self {
            input,
            output,
            format,
        }
    }
}

pub const JOBS: &[Job] = &[
    Job::new("RESEARCH_PAPER.html", "RESEARCH_PAPER.pptx", Format::Pptx),
    Job::new("LITERATURE_SURVEY.html", "LITERATURE_SURVEY.pptx", Format::Pptx),
    Job::new(
        "RESEARCH_PAPERS_SUMMARY.html",
        "RESEARCH_PAPERS_SUMMARY.pptx",
        Format::Pptx,
    ),
    Job::new(
        "CROP_RECOMMENDER_PRESENTATION.html",
        "CROP_RECOMMENDER_PRESENTATION.pptx",
        Format::Pptx,
    ),
    Job::new("RESEARCH_PAPER.html", "RESEARCH_PAPER.docx", Format::Docx),
    Job::new("LITERATURE_SURVEY.html", "LITERATURE_SURVEY.docx", Format::Docx),
    Job::new(
        "RESEARCH_PAPERS_SUMMARY.html",
        "RESEARCH_PAPERS_SUMMARY.docx",
        Format::Docx,
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentOptions {
    /// Structured extraction yielding fewer sections than this is discarded
    /// in favour of simple extraction. A heuristic, not a validated constant.
    pub fallback_min_sections: usize,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            fallback_min_sections: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideLimits {
    pub max_sections: usize,
    pub items_per_slide: usize,
    pub max_table_rows: usize,
    /// Items longer than this many characters are re-wrapped.
    pub wrap_threshold: usize,
    pub wrap_width: usize,
    pub subtitle_max_chars: usize,
}

impl Default for SlideLimits {
    fn default() -> Self {
        Self {
            max_sections: 30,
            items_per_slide: 7,
            max_table_rows: 10,
            wrap_threshold: 150,
            wrap_width: 120,
            subtitle_max_chars: 200,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub segment: SegmentOptions,
    pub slides: SlideLimits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingStyle {
    pub style_id: &'static str,
    pub name: &'static str,
    pub size_pt: u32,
    /// RGB hex, no leading '#'.
    pub color: &'static str,
    /// `None` for the document title, which is not part of the outline.
    pub outline_level: Option<u8>,
}

/// Level 0 is the document title; levels 1-3 are section headings.
pub const HEADING_STYLES: [HeadingStyle; 4] = [
    HeadingStyle {
        style_id: "Title",
        name: "Title",
        size_pt: 26,
        color: "17365D",
        outline_level: None,
    },
    HeadingStyle {
        style_id: "Heading1",
        name: "heading 1",
        size_pt: 18,
        color: "1A1A1A",
        outline_level: Some(0),
    },
    HeadingStyle {
        style_id: "Heading2",
        name: "heading 2",
        size_pt: 14,
        color: "2C3E50",
        outline_level: Some(1),
    },
    HeadingStyle {
        style_id: "Heading3",
        name: "heading 3",
        size_pt: 12,
        color: "34495E",
        outline_level: Some(2),
    },
];
