//! Converts structured HTML documents (papers, surveys, summaries) into
//! PowerPoint and Word files.
//!
//! The slide path segments the HTML into titled [`section::Section`]s and
//! plans a deck from them; the Word path walks the HTML tree directly.

pub mod config;
pub mod docx;
pub mod dom;
pub mod driver;
pub mod error;
pub mod loader;
pub mod ooxml;
pub mod pptx;
pub mod section;
pub mod segment;
pub mod slides;
pub mod text;

pub use config::{ConvertOptions, Format, Job, JOBS};
pub use driver::{convert, run_batch, BatchReport, Summary};
pub use error::{Error, Result};
