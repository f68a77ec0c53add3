// src/pipeline.rs
use chrono::Utc;
use scraper::Html;

use crate::config::ScrapeConfig;
use crate::extractors::{embedded, table, ResultSet, UserAgentRecord};
use crate::storage::StorageManager;
use crate::useragents::{client, Category, CategorySource};
use crate::utils::{html_debug, AppError};

/// Tally of one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub written: usize,
    pub empty: usize,
    pub failed_writes: usize,
    pub records: usize,
}

/// Fetches the page once and extracts every category of the configured variant.
pub async fn run(config: &ScrapeConfig) -> Result<RunSummary, AppError> {
    let storage = StorageManager::new(&config.output_dir)?;

    let body = client::fetch_page(&config.source_url, config.timeout).await?;
    tracing::info!("Successfully downloaded page ({} bytes)", body.len());

    if config.debug {
        let anchors: Vec<&str> = config.variant.categories().iter().map(|c| c.anchor).collect();
        let debug_dir = storage.base_dir().join("debug");
        if let Err(e) = html_debug::save_debug_capture(&body, &debug_dir, &anchors) {
            tracing::warn!("Failed to save debug capture: {}", e);
        }
    }

    extract_and_store(&body, config, &storage).await
}

/// Pulls the records for one category. Only a malformed embedded payload is an error.
fn extract_category(document: &Html, category: &Category) -> Result<Vec<UserAgentRecord>, AppError> {
    match category.source {
        CategorySource::Table(kind) => Ok(table::extract_section(document, category.anchor, kind)),
        CategorySource::Embedded => match embedded::extract_embedded(document, category.anchor) {
            Ok(records) => Ok(records),
            Err(e) if e.is_absence() => {
                tracing::warn!("{} left empty: {}", category.label, e);
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        },
    }
}

/// Extracts each category in order and writes the non-empty ones.
///
/// Files written before a hard failure stay on disk.
pub async fn extract_and_store(
    body: &str,
    config: &ScrapeConfig,
    storage: &StorageManager,
) -> Result<RunSummary, AppError> {
    let document = Html::parse_document(body);
    let scraped_at = Utc::now();
    let mode = config.variant.mode();
    let mut summary = RunSummary::default();

    for category in config.variant.categories() {
        tracing::info!("Extracting {} from '{}'", category.label, category.anchor);

        let entries = mode.shape(extract_category(&document, category)?);

        if entries.is_empty() {
            tracing::warn!("No user agents found for {}, skipping {}", category.label, category.file);
            summary.empty += 1;
        } else {
            let set = ResultSet {
                label: category.label.to_string(),
                source_url: config.source_url.clone(),
                scraped_at,
                entries,
                include_count: mode.rich_fields,
            };
            match storage.save_result_set(&set, category.file) {
                Ok(_) => {
                    summary.written += 1;
                    summary.records += set.entries.len();
                }
                Err(e) => {
                    tracing::error!("Failed to save {}: {}", category.file, e);
                    summary.failed_writes += 1;
                }
            }
        }

        tokio::time::sleep(config.delay).await;
    }

    Ok(summary)
}
