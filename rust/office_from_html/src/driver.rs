//! Runs the conversion table: load, segment, emit, save, one file at a time.

use std::fmt;
use std::path::Path;

use tracing::{error, info, warn};

use crate::config::{ConvertOptions, Format, Job};
use crate::error::Result;
use crate::{docx, loader, pptx, segment, slides};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Summary {
    Slides(usize),
    Paragraphs(usize),
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::Slides(n) => write!(f, "{n} slides"),
            Summary::Paragraphs(n) => write!(f, "{n} paragraphs"),
        }
    }
}

/// Converts a single file.
pub fn convert(input: &Path, output: &Path, format: Format, opts: &ConvertOptions) -> Result<Summary> {
    let doc = loader::load(input)?;
    match format {
        Format::Pptx => {
            let sections = segment::segment(&doc, &opts.segment);
            let deck = slides::build_deck(&doc, &sections, &opts.slides);
            pptx::write_pptx(output, &deck)?;
            Ok(Summary::Slides(deck.slides.len()))
        }
        Format::Docx => {
            let word = docx::compose(&doc);
            docx::write_docx(output, &word)?;
            Ok(Summary::Paragraphs(word.paragraph_count()))
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub converted: usize,
    pub missing: usize,
    pub failed: usize,
}

/// Runs every job. Failures are logged and counted; they never stop the batch.
pub fn run_batch(input_dir: &Path, output_dir: &Path, jobs: &[Job], opts: &ConvertOptions) -> BatchReport {
    let mut report = BatchReport::default();
    for job in jobs {
        let input = input_dir.join(job.input);
        let output = output_dir.join(job.output);
        info!("converting {} to {}", input.display(), output.display());
        match convert(&input, &output, job.format, opts) {
            Ok(summary) => {
                info!("created {} ({summary})", output.display());
                report.converted += 1;
            }
            Err(e) if e.is_not_found() => {
                warn!("file not found: {}", input.display());
                report.missing += 1;
            }
            Err(e) => {
                error!("error converting {}: {e}", input.display());
                report.failed += 1;
            }
        }
    }
    info!(
        converted = report.converted,
        missing = report.missing,
        failed = report.failed,
        "conversion complete"
    );
    report
}
