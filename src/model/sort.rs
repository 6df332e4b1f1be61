//! Sort policy for table columns
//!
//! Numbers compare numerically, everything else compares by its string
//! form using a locale-style collation. The sort itself is a stable
//! bottom-up merge sort over row indices, so ties keep input order in
//! both directions and the rows are never touched.

use super::table::{Row, Value};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Direction of a column sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header indicator shown next to the sorted column
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Compare two cell values in ascending order.
///
/// A missing value on either side compares equal, which keeps a sort on an
/// unknown key inert.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (Some(x), Some(y)) => collate(&x.to_string(), &y.to_string()),
        _ => Ordering::Equal,
    }
}

/// Locale-style string ordering.
///
/// Strings compare first on their base letters, with accents and case
/// folded away, so "Émile" sorts between "Bob" and "Zara". Ties are broken
/// by accents, unaccented first, and then by case, lowercase first.
pub fn collate(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented_letters(a).cmp(accented_letters(b)))
        .then_with(|| compare_case(a, b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn accented_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn compare_case(a: &str, b: &str) -> Ordering {
    for (x, y) in a.nfd().zip(b.nfd()) {
        if x == y {
            continue;
        }
        if x.is_lowercase() && y.is_uppercase() {
            return Ordering::Less;
        }
        if x.is_uppercase() && y.is_lowercase() {
            return Ordering::Greater;
        }
        return x.cmp(&y);
    }
    a.len().cmp(&b.len())
}

/// Indices of `rows` in sorted order for `key`.
pub fn sorted_order(rows: &[Row], key: &str, direction: SortDirection) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    merge_sort_by(&mut order, |&a, &b| {
        direction.apply(compare_values(rows[a].get(key), rows[b].get(key)))
    });
    order
}

/// Stable merge sort.
///
/// Unlike `slice::sort_by` this never panics when the comparator is not a
/// strict total order, which mixed text/number columns can produce.
pub fn merge_sort_by<T, F>(items: &mut [T], mut cmp: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }

    let mut buf = items.to_vec();
    let mut width = 1;
    while width < len {
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            merge(&items[start..mid], &items[mid..end], &mut buf[start..end], &mut cmp);
            start = end;
        }
        items.copy_from_slice(&buf);
        width *= 2;
    }
}

fn merge<T, F>(left: &[T], right: &[T], out: &mut [T], cmp: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        // Left wins ties so equal elements keep their relative order
        let take_left =
            j >= right.len() || (i < left.len() && cmp(&left[i], &right[j]) != Ordering::Greater);
        if take_left {
            *slot = left[i];
            i += 1;
        } else {
            *slot = right[j];
            j += 1;
        }
    }
}
