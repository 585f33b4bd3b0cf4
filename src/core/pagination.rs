/// Page counts at or below this are shown in full.
pub const MAX_UNCOMPRESSED_PAGES: usize = 9;

/// Pages kept on either side of the current page.
const WINDOW_RADIUS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Page controls for a pager: every page when there are few, otherwise the
/// first and last page plus a window around `current_page`, with an ellipsis
/// wherever pages are skipped.
pub fn page_window(page_count: usize, current_page: usize) -> Vec<PageItem> {
    if page_count <= MAX_UNCOMPRESSED_PAGES {
        return (0..page_count).map(PageItem::Page).collect();
    }

    let last = page_count - 1;
    let current = current_page.min(last);

    let mut kept = vec![0, last];
    let start = current.saturating_sub(WINDOW_RADIUS);
    let end = (current + WINDOW_RADIUS).min(last);
    kept.extend(start..=end);
    kept.sort_unstable();
    kept.dedup();

    let mut items = Vec::with_capacity(kept.len() * 2);
    let mut previous: Option<usize> = None;
    for page in kept {
        if let Some(prev) = previous {
            if page - prev > 1 {
                items.push(PageItem::Ellipsis);
            }
        }
        items.push(PageItem::Page(page));
        previous = Some(page);
    }
    items
}
