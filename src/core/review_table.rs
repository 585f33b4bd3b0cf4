use std::cmp::Ordering;

use super::VocabularyEntry;

pub const DEFAULT_PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Word,
    Frequency,
    Context,
}

impl SortColumn {
    pub fn default_direction(self) -> SortDirection {
        match self {
            SortColumn::Frequency => SortDirection::Descending,
            SortColumn::Word | SortColumn::Context => SortDirection::Ascending,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SortColumn::Word => "Word",
            SortColumn::Frequency => "Frequency",
            SortColumn::Context => "Context",
        }
    }

    fn compare(self, left: &VocabularyEntry, right: &VocabularyEntry) -> Ordering {
        match self {
            SortColumn::Word => left.word.cmp(&right.word),
            SortColumn::Frequency => left.frequency.cmp(&right.frequency),
            SortColumn::Context => left.context.cmp(&right.context),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "⬆",
            SortDirection::Descending => "⬇",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }
}

/// Sort, filter and pagination inputs of the review table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableViewState {
    sort: Vec<SortKey>,
    filter: String,
    page_index: usize,
    page_size: usize,
}

impl Default for TableViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableViewState {
    pub fn new(page_size: usize) -> Self {
        Self { sort: Vec::new(), filter: String::new(), page_index: 0, page_size: page_size.max(1) }
    }

    pub fn sort(&self) -> &[SortKey] {
        &self.sort
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn with_sort(mut self, sort: Vec<SortKey>) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_page(mut self, page_index: usize) -> Self {
        self.page_index = page_index;
        self
    }

    pub fn sort_direction(&self, column: SortColumn) -> Option<SortDirection> {
        self.sort.iter().find(|key| key.column == column).map(|key| key.direction)
    }

    /// Position of `column` among the active sort keys, 0 being the primary key.
    pub fn sort_priority(&self, column: SortColumn) -> Option<usize> {
        self.sort.iter().position(|key| key.column == column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRow<'a> {
    pub entry_index: usize,
    /// 1-based position across the whole filtered view; never an identifier.
    pub display_index: usize,
    pub entry: &'a VocabularyEntry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePage<'a> {
    pub rows: Vec<TableRow<'a>>,
    pub page_index: usize,
    pub page_count: usize,
    pub filtered_count: usize,
}

impl<'a> TablePage<'a> {
    pub fn words(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.rows.iter().map(|row| row.entry.word.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn page_count(filtered_count: usize, page_size: usize) -> usize {
    filtered_count.div_ceil(page_size.max(1))
}

pub fn clamp_page(page_index: usize, page_count: usize) -> usize {
    page_index.min(page_count.max(1) - 1)
}

/// Indices of the entries that pass `filter`, in display order.
///
/// The filter is a case-sensitive substring match on the word only. With no
/// sort keys the original order is kept; otherwise the sort is stable so equal
/// rows stay in their original relative order.
pub fn filtered_order(entries: &[VocabularyEntry], sort: &[SortKey], filter: &str) -> Vec<usize> {
    let mut order: Vec<usize> = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| filter.is_empty() || entry.word.contains(filter))
        .map(|(idx, _)| idx)
        .collect();

    if !sort.is_empty() {
        order.sort_by(|&lhs, &rhs| {
            let left = &entries[lhs];
            let right = &entries[rhs];
            for key in sort {
                let ordering = match key.direction {
                    SortDirection::Ascending => key.column.compare(left, right),
                    SortDirection::Descending => key.column.compare(left, right).reverse(),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });
    }

    order
}

fn slice_page<'a>(
    entries: &'a [VocabularyEntry],
    order: &[usize],
    page_index: usize,
    page_size: usize,
) -> TablePage<'a> {
    let page_size = page_size.max(1);
    let filtered_count = order.len();
    let page_count = page_count(filtered_count, page_size);
    let page_index = clamp_page(page_index, page_count);

    let start = (page_index * page_size).min(filtered_count);
    let end = (start + page_size).min(filtered_count);

    let rows = order[start..end]
        .iter()
        .enumerate()
        .filter_map(|(offset, &entry_index)| {
            entries.get(entry_index).map(|entry| TableRow {
                entry_index,
                display_index: page_index * page_size + offset + 1,
                entry,
            })
        })
        .collect();

    TablePage { rows, page_index, page_count, filtered_count }
}

/// Filter, sort and paginate in one pass without touching any cached state.
pub fn visible_page<'a>(entries: &'a [VocabularyEntry], view: &TableViewState) -> TablePage<'a> {
    let order = filtered_order(entries, &view.sort, &view.filter);
    slice_page(entries, &order, view.page_index, view.page_size)
}

/// Review table with its view state and a cached display order.
///
/// The order is rebuilt only when the view inputs change or the entry list
/// revision moves, so rendering the same frame twice does no work.
#[derive(Debug, Clone)]
pub struct ReviewTable {
    view: TableViewState,
    order: Vec<usize>,
    revision: Option<u64>,
    dirty: bool,
}

impl Default for ReviewTable {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ReviewTable {
    pub fn new(page_size: usize) -> Self {
        Self { view: TableViewState::new(page_size), order: Vec::new(), revision: None, dirty: true }
    }

    pub fn view(&self) -> &TableViewState {
        &self.view
    }

    pub fn reset(&mut self) {
        self.view.page_index = 0;
        self.order.clear();
        self.revision = None;
        self.dirty = true;
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        let filter = filter.into();
        if self.view.filter != filter {
            self.view.filter = filter;
            self.view.page_index = 0;
            self.dirty = true;
        }
    }

    pub fn set_sort(&mut self, sort: Vec<SortKey>) {
        if self.view.sort != sort {
            self.view.sort = sort;
            self.dirty = true;
        }
    }

    pub fn clear_sort(&mut self) {
        self.set_sort(Vec::new());
    }

    /// Header click: default direction, then reversed, then unsorted.
    /// Without `additive` the other sort keys are dropped first.
    pub fn cycle_sort(&mut self, column: SortColumn, additive: bool) {
        let mut sort = self.view.sort.clone();
        if !additive {
            sort.retain(|key| key.column == column);
        }

        match sort.iter().position(|key| key.column == column) {
            Some(pos) if sort[pos].direction == column.default_direction() => {
                sort[pos].direction = sort[pos].direction.reversed();
            }
            Some(pos) => {
                sort.remove(pos);
            }
            None => sort.push(SortKey::new(column, column.default_direction())),
        }

        self.set_sort(sort);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        let page_size = page_size.max(1);
        if self.view.page_size != page_size {
            let first_visible = self.view.page_index.saturating_mul(self.view.page_size);
            self.view.page_size = page_size;
            self.view.page_index = first_visible / page_size;
            self.clamp();
        }
    }

    pub fn set_page(&mut self, page_index: usize) {
        self.view.page_index = page_index;
        self.clamp();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.view.page_index.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.view.page_index.saturating_sub(1));
    }

    pub fn page_count(&self) -> usize {
        page_count(self.order.len(), self.view.page_size)
    }

    pub fn filtered_count(&self) -> usize {
        self.order.len()
    }

    /// Rebuilds the cached order when needed and clamps the page index to the
    /// (possibly smaller) result.
    pub fn refresh(&mut self, entries: &[VocabularyEntry], revision: u64) {
        let stale = self.dirty
            || self.revision != Some(revision)
            || self.order.iter().any(|&idx| idx >= entries.len());

        if stale {
            self.order = filtered_order(entries, &self.view.sort, &self.view.filter);
            self.revision = Some(revision);
            self.dirty = false;
        }
        self.clamp();
    }

    /// Rows of the current page. Call `refresh` first whenever the entries
    /// may have changed.
    pub fn page<'a>(&self, entries: &'a [VocabularyEntry]) -> TablePage<'a> {
        slice_page(entries, &self.order, self.view.page_index, self.view.page_size)
    }

    fn clamp(&mut self) {
        if !self.dirty {
            self.view.page_index = clamp_page(self.view.page_index, self.page_count());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(word: &str, frequency: u32) -> VocabularyEntry {
        VocabularyEntry::new(word, frequency, format!("{word}の文"))
    }

    fn words<'a>(page: &TablePage<'a>) -> Vec<&'a str> {
        page.words().collect()
    }

    fn numbered(count: usize) -> Vec<VocabularyEntry> {
        (0..count)
            .map(|i| {
                let word = if i % 5 < 3 { format!("猫{i:02}") } else { format!("犬{i:02}") };
                entry(&word, (count - i) as u32)
            })
            .collect()
    }

    #[test]
    fn filter_then_paginate() {
        let entries = numbered(25);
        let view = TableViewState::new(10).with_filter("猫");

        let page = visible_page(&entries, &view);
        assert_eq!(page.filtered_count, 15);
        assert_eq!(page.page_count, 2);
        assert_eq!(page.rows.len(), 10);

        let expected: Vec<usize> =
            (0..25).filter(|i| i % 5 < 3).take(10).collect();
        let actual: Vec<usize> = page.rows.iter().map(|row| row.entry_index).collect();
        assert_eq!(actual, expected);

        let second = visible_page(&entries, &view.clone().with_page(1));
        assert_eq!(second.rows.len(), 5);
        assert_eq!(second.rows[0].display_index, 11);
    }

    #[test]
    fn filter_is_case_sensitive_and_word_only() {
        let entries = vec![
            VocabularyEntry::new("Tokyo", 3, "in tokyo"),
            VocabularyEntry::new("tokyo", 2, "x"),
            VocabularyEntry::new("京都", 1, "Tokyo"),
        ];
        let page = visible_page(&entries, &TableViewState::new(10).with_filter("Tokyo"));
        assert_eq!(words(&page), vec!["Tokyo"]);
    }

    #[test]
    fn empty_sort_keeps_original_order() {
        let entries = vec![entry("b", 1), entry("a", 9), entry("c", 5)];
        let page = visible_page(&entries, &TableViewState::new(10));
        assert_eq!(words(&page), vec!["b", "a", "c"]);
    }

    #[test]
    fn frequency_sort_is_stable() {
        let entries = vec![
            entry("一", 5),
            entry("二", 7),
            entry("三", 5),
            entry("四", 7),
            entry("五", 5),
        ];
        let descending = TableViewState::new(10)
            .with_sort(vec![SortKey::new(SortColumn::Frequency, SortDirection::Descending)]);
        assert_eq!(words(&visible_page(&entries, &descending)), vec!["二", "四", "一", "三", "五"]);

        let ascending = TableViewState::new(10)
            .with_sort(vec![SortKey::new(SortColumn::Frequency, SortDirection::Ascending)]);
        assert_eq!(words(&visible_page(&entries, &ascending)), vec!["一", "三", "五", "二", "四"]);
    }

    #[test]
    fn secondary_key_breaks_ties() {
        let entries = vec![entry("c", 1), entry("a", 2), entry("b", 1)];
        let view = TableViewState::new(10).with_sort(vec![
            SortKey::new(SortColumn::Frequency, SortDirection::Ascending),
            SortKey::new(SortColumn::Word, SortDirection::Descending),
        ]);
        assert_eq!(words(&visible_page(&entries, &view)), vec!["c", "b", "a"]);
    }

    #[test]
    fn rendering_is_idempotent() {
        let entries = numbered(40);
        let view = TableViewState::new(7)
            .with_filter("犬")
            .with_sort(vec![SortKey::new(SortColumn::Word, SortDirection::Ascending)])
            .with_page(1);
        assert_eq!(visible_page(&entries, &view), visible_page(&entries, &view));

        let mut table = ReviewTable::new(7);
        table.set_filter("犬");
        table.set_sort(view.sort().to_vec());
        table.refresh(&entries, 1);
        table.set_page(1);
        let first = table.page(&entries);
        table.refresh(&entries, 1);
        assert_eq!(first, table.page(&entries));
        assert_eq!(first, visible_page(&entries, &view));
    }

    #[test]
    fn page_index_is_clamped() {
        let entries = numbered(12);
        let page = visible_page(&entries, &TableViewState::new(5).with_page(99));
        assert_eq!(page.page_index, 2);
        assert_eq!(page.rows.len(), 2);

        let empty: Vec<VocabularyEntry> = Vec::new();
        let page = visible_page(&empty, &TableViewState::new(5).with_page(3));
        assert_eq!(page.page_index, 0);
        assert_eq!(page.page_count, 0);
        assert!(page.is_empty());
    }

    #[test]
    fn zero_page_size_is_clamped_to_one() {
        let entries = numbered(3);
        let mut table = ReviewTable::new(0);
        assert_eq!(table.view().page_size(), 1);
        table.set_page_size(0);
        table.refresh(&entries, 0);
        assert_eq!(table.page_count(), 3);
        assert_eq!(table.page(&entries).rows.len(), 1);
    }

    #[test]
    fn shrinking_list_clamps_page_down() {
        let mut entries = numbered(30);
        let mut table = ReviewTable::new(10);
        table.refresh(&entries, 0);
        table.set_page(2);
        assert_eq!(table.view().page_index(), 2);

        entries.truncate(15);
        table.refresh(&entries, 1);
        assert_eq!(table.view().page_index(), 1);
        assert_eq!(table.page(&entries).rows.len(), 5);
    }

    #[test]
    fn filter_change_returns_to_first_page() {
        let entries = numbered(30);
        let mut table = ReviewTable::new(5);
        table.refresh(&entries, 0);
        table.set_page(3);
        table.set_filter("猫");
        table.refresh(&entries, 0);
        assert_eq!(table.view().page_index(), 0);
        assert_eq!(table.filtered_count(), 18);
    }

    #[test]
    fn cycle_sort_walks_default_reversed_unsorted() {
        let mut table = ReviewTable::new(10);
        table.cycle_sort(SortColumn::Frequency, false);
        assert_eq!(table.view().sort_direction(SortColumn::Frequency), Some(SortDirection::Descending));
        table.cycle_sort(SortColumn::Frequency, false);
        assert_eq!(table.view().sort_direction(SortColumn::Frequency), Some(SortDirection::Ascending));
        table.cycle_sort(SortColumn::Frequency, false);
        assert!(table.view().sort().is_empty());
    }

    #[test]
    fn additive_cycle_keeps_primary_key() {
        let mut table = ReviewTable::new(10);
        table.cycle_sort(SortColumn::Frequency, false);
        table.cycle_sort(SortColumn::Word, true);
        assert_eq!(table.view().sort_priority(SortColumn::Frequency), Some(0));
        assert_eq!(table.view().sort_priority(SortColumn::Word), Some(1));

        table.cycle_sort(SortColumn::Word, false);
        assert_eq!(table.view().sort_priority(SortColumn::Frequency), None);
        assert_eq!(table.view().sort_direction(SortColumn::Word), Some(SortDirection::Descending));
    }

    #[test]
    fn page_size_change_keeps_first_row_visible() {
        let entries = numbered(50);
        let mut table = ReviewTable::new(10);
        table.refresh(&entries, 0);
        table.set_page(3);
        table.set_page_size(25);
        assert_eq!(table.view().page_index(), 1);
    }

    #[test]
    fn huge_page_index_before_refresh_does_not_overflow() {
        let entries = numbered(50);
        let mut table = ReviewTable::new(10);
        table.refresh(&entries, 0);
        table.set_filter("猫");
        table.set_page(usize::MAX);
        table.next_page();
        table.set_page_size(7);
        table.refresh(&entries, 0);
        assert_eq!(table.view().page_index(), 4);
    }
}
