// src/extractors/embedded.rs
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::extractors::locator;
use crate::extractors::record::UserAgentRecord;
use crate::extractors::table::{parse_share, TEXTAREA_SELECTOR};
use crate::utils::error::ExtractError;

// First content column of a JSON/CSV container; the JSON textarea lives here.
static CONTENT_COLUMN_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.col-lg-6").expect("Failed to compile CONTENT_COLUMN_SELECTOR")
});

/// Coerces a `pct` value to a share: numbers and numeric strings parse, anything else is 0.
fn coerce_share(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(number)) => number
            .as_f64()
            .filter(|share| share.is_finite() && *share >= 0.0)
            .unwrap_or(0.0),
        Some(Value::String(text)) => parse_share(text),
        _ => 0.0,
    }
}

/// Turns one array element into a record. Elements without a string `ua` are dropped.
fn record_from_element(element: &Value) -> Option<UserAgentRecord> {
    let user_agent = element
        .get("ua")
        .or_else(|| element.get("user_agent"))
        .and_then(Value::as_str)?
        .trim();
    if user_agent.is_empty() {
        return None;
    }

    let share = element.get("pct").or_else(|| element.get("share_percentage"));
    Some(UserAgentRecord {
        share_percentage: Some(coerce_share(share)),
        ..UserAgentRecord::new(user_agent)
    })
}

/// Extracts the JSON array embedded in the container with id `container_id`.
///
/// A missing container, column or textarea is `ExtractError::SectionNotFound`.
/// A payload that is not a JSON array is `ExtractError::MalformedPayload`.
/// Elements of the array that carry no usable user agent are skipped.
pub fn extract_embedded(document: &Html, container_id: &str) -> Result<Vec<UserAgentRecord>, ExtractError> {
    let container = locator::find_by_id(document, container_id).ok_or_else(|| {
        ExtractError::SectionNotFound(format!("no element with id '{}'", container_id))
    })?;

    let column = container.select(&CONTENT_COLUMN_SELECTOR).next().ok_or_else(|| {
        ExtractError::SectionNotFound(format!("'{}' has no content column", container_id))
    })?;

    let textarea = column.select(&TEXTAREA_SELECTOR).next().ok_or_else(|| {
        ExtractError::SectionNotFound(format!("content column of '{}' has no textarea", container_id))
    })?;

    let payload = textarea.text().collect::<String>();
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(ExtractError::SectionNotFound(format!("textarea in '{}' is empty", container_id)));
    }
    tracing::debug!("Found {} byte payload in '{}'", payload.len(), container_id);

    let elements: Vec<Value> = serde_json::from_str(payload).map_err(|source| {
        ExtractError::MalformedPayload { container: container_id.to_string(), source }
    })?;

    let records: Vec<UserAgentRecord> = elements.iter().filter_map(record_from_element).collect();
    if records.len() < elements.len() {
        tracing::debug!("Dropped {} elements without a user agent in '{}'", elements.len() - records.len(), container_id);
    }
    Ok(records)
}
