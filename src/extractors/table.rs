// src/extractors/table.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::extractors::locator;
use crate::extractors::record::UserAgentRecord;

// --- CSS Selectors (Lazy Static) ---
static TBODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("tbody").expect("Failed to compile TBODY_SELECTOR")
});

static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("tr").expect("Failed to compile ROW_SELECTOR")
});

/// Free-text input region holding the literal user agent or JSON payload.
pub(crate) static TEXTAREA_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("textarea").expect("Failed to compile TEXTAREA_SELECTOR")
});

static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("td").expect("Failed to compile CELL_SELECTOR")
});

// Plain non-negative decimal: "34", "34.2", "34.", ".2"
static SHARE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d+\.?\d*|\.\d+)$").expect("Failed to compile SHARE_RE")
});

/// Which family of table a category points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    CommonDesktop,
    CommonMobile,
    Latest,
}

/// Column layout of a single row, decided from the table kind and the row's cell count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLayout {
    /// share | browser info | user agent
    CommonDesktop,
    /// share | device | browser info | user agent
    CommonMobile,
    /// browser info | user agent
    LatestDesktop,
    /// device | browser info | user agent
    LatestMobile,
}

impl RowLayout {
    pub fn classify(kind: TableKind, cell_count: usize) -> Option<Self> {
        match (kind, cell_count) {
            (TableKind::CommonDesktop, n) if n >= 3 => Some(RowLayout::CommonDesktop),
            (TableKind::CommonMobile, n) if n >= 4 => Some(RowLayout::CommonMobile),
            (TableKind::Latest, 2) => Some(RowLayout::LatestDesktop),
            (TableKind::Latest, 3) => Some(RowLayout::LatestMobile),
            _ => None,
        }
    }

    fn identifier_index(self) -> usize {
        match self {
            RowLayout::CommonDesktop => 2,
            RowLayout::CommonMobile => 3,
            RowLayout::LatestDesktop => 1,
            RowLayout::LatestMobile => 2,
        }
    }
}

/// Parses a share cell. Anything that is not a plain, finite, non-negative decimal becomes 0.
pub fn parse_share(text: &str) -> f64 {
    let text = text.trim();
    if !SHARE_RE.is_match(text) {
        return 0.0;
    }
    text.parse::<f64>()
        .ok()
        .filter(|share| share.is_finite())
        .unwrap_or(0.0)
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Literal text of the textarea inside `cell`, trimmed. `None` if the cell has no textarea.
fn identifier_in(cell: ElementRef) -> Option<String> {
    cell.select(&TEXTAREA_SELECTOR)
        .next()
        .map(|textarea| textarea.text().collect::<String>().trim().to_string())
}

fn extract_row(layout: RowLayout, cells: &[ElementRef]) -> Option<UserAgentRecord> {
    let user_agent = identifier_in(cells[layout.identifier_index()])?;
    if user_agent.is_empty() {
        return None;
    }

    let record = match layout {
        RowLayout::CommonDesktop => UserAgentRecord {
            user_agent,
            share_percentage: Some(parse_share(&cell_text(cells[0]))),
            device: None,
            browser_info: Some(cell_text(cells[1])),
        },
        RowLayout::CommonMobile => UserAgentRecord {
            user_agent,
            share_percentage: Some(parse_share(&cell_text(cells[0]))),
            device: Some(cell_text(cells[1])),
            browser_info: Some(cell_text(cells[2])),
        },
        RowLayout::LatestDesktop => UserAgentRecord {
            user_agent,
            share_percentage: None,
            device: None,
            browser_info: Some(cell_text(cells[0])),
        },
        RowLayout::LatestMobile => UserAgentRecord {
            user_agent,
            share_percentage: None,
            device: Some(cell_text(cells[0])).filter(|device| !device.is_empty()),
            browser_info: Some(cell_text(cells[1])),
        },
    };
    Some(record)
}

/// Walks the body rows of `table`, in document order, keeping rows that yield a user agent.
pub fn extract_rows(table: ElementRef, kind: TableKind) -> Vec<UserAgentRecord> {
    let Some(tbody) = table.select(&TBODY_SELECTOR).next() else {
        tracing::warn!("Table has no body, nothing to extract");
        return Vec::new();
    };

    let mut records = Vec::new();
    for (index, row) in tbody.select(&ROW_SELECTOR).enumerate() {
        let cells: Vec<ElementRef> = row.select(&CELL_SELECTOR).collect();
        let Some(layout) = RowLayout::classify(kind, cells.len()) else {
            tracing::debug!("Skipping row {}: {} cells do not fit a {:?} layout", index, cells.len(), kind);
            continue;
        };
        match extract_row(layout, &cells) {
            Some(record) => records.push(record),
            None => tracing::debug!("Skipping row {}: no user agent in its {:?} identifier cell", index, layout),
        }
    }
    records
}

/// Locates the table following `anchor` and extracts its rows. Absence yields an empty list.
pub fn extract_section(document: &Html, anchor: &str, kind: TableKind) -> Vec<UserAgentRecord> {
    match locator::locate_table(document, anchor) {
        Some(table) => {
            let records = extract_rows(table, kind);
            tracing::debug!("Extracted {} rows for '{}'", records.len(), anchor);
            records
        }
        None => Vec::new(),
    }
}
