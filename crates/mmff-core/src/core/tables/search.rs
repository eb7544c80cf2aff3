//! Binary search over integer-keyed tables sorted by their key columns.
//!
//! Tables may hold several rows with the same key prefix, so every search yields a
//! *range* per column: the lowest and the highest row matching that column. The range
//! found for column `i` becomes the search window for column `i + 1`, which narrows the
//! candidates hierarchically until all key columns are matched. When more than one row
//! matches every searched column, the lowest index wins.

/// Read access to a table whose rows are sorted lexicographically by key columns.
pub trait Searchable {
    fn row_count(&self) -> usize;
    fn key(&self, row: usize, column: usize) -> i32;
}

/// Searches `column` for `value` within the inclusive row window `[low, high]`.
///
/// Returns the lowest matching row when `find_low` is set, otherwise the highest.
/// The window must already be sorted on `column`, which holds whenever every column
/// before it is constant across the window.
pub fn binary_search<S: Searchable + ?Sized>(
    table: &S,
    column: usize,
    value: i32,
    low: usize,
    high: usize,
    find_low: bool,
) -> Option<usize> {
    if table.row_count() == 0 || low > high || high >= table.row_count() {
        return None;
    }

    // Half-open [lo, hi) partition search.
    let (mut lo, mut hi) = (low, high + 1);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let key = table.key(mid, column);
        let go_right = if find_low { key < value } else { key <= value };
        if go_right {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }

    let candidate = if find_low {
        lo
    } else {
        lo.checked_sub(1)?
    };
    (candidate >= low && candidate <= high && table.key(candidate, column) == value)
        .then_some(candidate)
}

/// Narrows the row window column by column and returns the surviving `[low, high]`.
pub fn find_range<S: Searchable + ?Sized>(table: &S, keys: &[i32]) -> Option<(usize, usize)> {
    let count = table.row_count();
    if count == 0 {
        return None;
    }
    let (mut low, mut high) = (0, count - 1);
    for (column, &value) in keys.iter().enumerate() {
        let first = binary_search(table, column, value, low, high, true)?;
        let last = binary_search(table, column, value, first, high, false)?;
        low = first;
        high = last;
    }
    Some((low, high))
}

/// Index of the first row matching all `keys`, or `None`.
pub fn find<S: Searchable + ?Sized>(table: &S, keys: &[i32]) -> Option<usize> {
    find_range(table, keys).map(|(low, _)| low)
}
