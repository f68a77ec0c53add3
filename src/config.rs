// src/config.rs
use std::path::PathBuf;
use std::time::Duration;
use clap::ValueEnum;
use crate::extractors::ExtractionMode;
use crate::useragents::{Category, EMBEDDED_CATEGORIES, TABLE_CATEGORIES};

/// Which rendition of the scrape to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Ten HTML tables, full records.
    Tables,
    /// Ten HTML tables, unique bare user agent strings.
    UniqueTables,
    /// Two embedded JSON payloads, full records.
    EmbeddedJson,
}

impl Variant {
    pub fn mode(self) -> ExtractionMode {
        match self {
            Variant::Tables | Variant::EmbeddedJson => ExtractionMode::RICH,
            Variant::UniqueTables => ExtractionMode::UNIQUE_BARE,
        }
    }

    pub fn categories(self) -> &'static [Category] {
        match self {
            Variant::Tables | Variant::UniqueTables => &TABLE_CATEGORIES,
            Variant::EmbeddedJson => &EMBEDDED_CATEGORIES,
        }
    }
}

/// Everything one run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub source_url: String,
    pub output_dir: PathBuf,
    pub variant: Variant,
    /// Pause after each category.
    pub delay: Duration,
    /// Deadline for the page fetch.
    pub timeout: Duration,
    pub debug: bool,
}
