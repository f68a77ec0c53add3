// src/extractors/locator.rs
use scraper::{ElementRef, Html};

/// Returns the first element whose `id` attribute equals `id`, in document order.
pub fn find_by_id<'a>(document: &'a Html, id: &str) -> Option<ElementRef<'a>> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().id() == Some(id))
}

/// Finds the anchor element, then the first `<table>` after it in document order.
///
/// The walk is a forward pre-order traversal starting just after the anchor's
/// opening tag, so a table nested inside the anchor counts as well as one in
/// any following content. Returns `None` when either piece is missing.
pub fn locate_table<'a>(document: &'a Html, anchor: &str) -> Option<ElementRef<'a>> {
    let Some(anchor_element) = find_by_id(document, anchor) else {
        tracing::warn!("Anchor '{}' not found in document", anchor);
        return None;
    };
    tracing::trace!("Found anchor '{}' on <{}>", anchor, anchor_element.value().name());

    let table = document
        .root_element()
        .descendants()
        .skip_while(|node| node.id() != anchor_element.id())
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == "table");

    if table.is_none() {
        tracing::warn!("No table follows anchor '{}'", anchor);
    }
    table
}
