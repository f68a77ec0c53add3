// src/utils/html_debug.rs
use std::fs;
use std::path::Path;
use regex::Regex;
use crate::utils::error::AppError;

/// Kind of highlight applied to a matched span of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Anchor,
    Table,
    Payload,
}

impl Highlight {
    fn css_class(self) -> &'static str {
        match self {
            Highlight::Anchor => "highlight-anchor",
            Highlight::Table => "highlight-table",
            Highlight::Payload => "highlight-payload",
        }
    }
}

/// Inserts a styled marker span in front of each highlighted opening tag.
/// The tags themselves are left intact. Ranges overlapping an earlier one are skipped.
pub fn annotate_html(html: &str, highlights: &[(usize, usize, Highlight)]) -> String {
    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");
    debug_html.push_str(".highlight-anchor { background-color: #90EE90; }\n");
    debug_html.push_str(".highlight-table { background-color: #ADD8E6; }\n");
    debug_html.push_str(".highlight-payload { background-color: #FFFF00; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n");

    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| h.0);

    let mut last_pos = 0;
    for (start, end, kind) in sorted_highlights {
        if start < last_pos || end > html.len() {
            continue;
        }
        debug_html.push_str(&html[last_pos..start]);
        debug_html.push_str(&format!(
            "<span class=\"{}\" title=\"Position: {}-{}, Type: {:?}\">[{:?}]</span>",
            kind.css_class(), start, end, kind, kind
        ));
        debug_html.push_str(&html[start..end]);
        last_pos = end;
    }
    debug_html.push_str(&html[last_pos..]);

    debug_html.push_str("\n</body>\n</html>");
    debug_html
}

/// Locates the opening tag of every anchor element, table and textarea in the page.
pub fn find_highlights(html: &str, anchors: &[&str]) -> Result<Vec<(usize, usize, Highlight)>, AppError> {
    let mut patterns: Vec<(String, Highlight)> = anchors
        .iter()
        .map(|anchor| {
            let pattern = format!(r#"<[a-zA-Z][^>]*\bid\s*=\s*["']{}["'][^>]*>"#, regex::escape(anchor));
            (pattern, Highlight::Anchor)
        })
        .collect();
    patterns.push((r"(?i)<table\b[^>]*>".to_string(), Highlight::Table));
    patterns.push((r"(?i)<textarea\b[^>]*>".to_string(), Highlight::Payload));

    let mut highlights = Vec::new();
    for (pattern, kind) in &patterns {
        let re = Regex::new(pattern).map_err(|e| {
            AppError::Config(format!("Invalid regex pattern '{}': {}", pattern, e))
        })?;
        for mat in re.find_iter(html) {
            highlights.push((mat.start(), mat.end(), *kind));
        }
    }
    Ok(highlights)
}

/// Saves the raw page and an annotated copy into `debug_dir`.
pub fn save_debug_capture(html: &str, debug_dir: &Path, anchors: &[&str]) -> Result<(), AppError> {
    fs::create_dir_all(debug_dir)?;

    let raw_path = debug_dir.join("raw_page.html");
    fs::write(&raw_path, html)?;
    tracing::info!("Saved raw page to {}", raw_path.display());

    let highlights = find_highlights(html, anchors)?;
    let annotated_path = debug_dir.join("page_annotated.html");
    fs::write(&annotated_path, annotate_html(html, &highlights))?;
    tracing::info!("Saved annotated page ({} highlights) to {}", highlights.len(), annotated_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlights_anchor_and_payload() {
        let html = r#"<h2 id="latest-ipad-useragents">iPad</h2><table><tr><td><textarea>UA</textarea></td></tr></table>"#;
        let highlights = find_highlights(html, &["latest-ipad-useragents", "missing-anchor"]).unwrap();

        let kinds: Vec<Highlight> = highlights.iter().map(|h| h.2).collect();
        assert_eq!(kinds.iter().filter(|k| **k == Highlight::Anchor).count(), 1);
        assert!(kinds.contains(&Highlight::Table));
        assert!(kinds.contains(&Highlight::Payload));

        let annotated = annotate_html(html, &highlights);
        assert!(annotated.contains(r#"[Anchor]</span><h2 id="latest-ipad-useragents">iPad</h2>"#));
        assert!(annotated.contains("[Table]</span><table><tr>"));
        assert!(annotated.contains("[Payload]</span><textarea>UA</textarea>"));
    }

    #[test]
    fn test_tags_with_attributes_stay_intact() {
        let html = r#"<textarea class="form-control" rows="3">UA</textarea>"#;
        let highlights = find_highlights(html, &[]).unwrap();
        assert_eq!(highlights, vec![(0, 40, Highlight::Payload)]);

        let annotated = annotate_html(html, &highlights);
        assert!(annotated.contains(r#"</span><textarea class="form-control" rows="3">UA</textarea>"#));
    }

    #[test]
    fn test_overlapping_highlights_are_skipped() {
        let html = "abcdef";
        let annotated = annotate_html(html, &[(0, 4, Highlight::Table), (2, 5, Highlight::Anchor)]);
        assert_eq!(annotated.matches("<span").count(), 1);
        assert!(annotated.contains("</span>abcdef"));
    }

    #[test]
    fn test_save_debug_capture_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let debug_dir = dir.path().join("debug");
        save_debug_capture("<p id=\"a\">x</p>", &debug_dir, &["a"]).unwrap();

        assert!(debug_dir.join("raw_page.html").exists());
        let annotated = fs::read_to_string(debug_dir.join("page_annotated.html")).unwrap();
        assert!(annotated.contains("highlight-anchor"));
    }
}
