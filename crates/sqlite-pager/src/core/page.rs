use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Pagination metadata for one `(from, limit, numrows)` triple.
///
/// Built once by [`page_info`] and never mutated afterwards. Offsets are
/// zero-based; `from_row`/`to_row` are the 1-based rows shown to a reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    current: usize,
    num_pages: usize,
    prev: Option<usize>,
    next: Option<usize>,
    remain: usize,
    from_row: usize,
    to_row: usize,
    numrows: usize,
    limit: usize,
}

/// Computes the page descriptor.
///
/// Returns `Ok(None)` when there is nothing to paginate (`numrows` absent or
/// zero). `from` must be the exact start offset of one of the pages.
pub fn page_info(
    from: Option<usize>,
    limit: usize,
    numrows: Option<usize>,
) -> AppResult<Option<PageInfo>> {
    if limit == 0 {
        return Err(AppError::InvalidParameter("limit"));
    }
    let numrows = match numrows {
        Some(n) if n > 0 => n,
        _ => return Ok(None),
    };
    let from = from.unwrap_or(0);

    let num_pages = numrows.div_ceil(limit);

    // from must sit exactly on a page start
    if from % limit != 0 || from / limit >= num_pages {
        return Err(AppError::InvalidParameter("from"));
    }
    let current = from / limit + 1;

    let prev = from.checked_sub(limit);
    let next = from.checked_add(limit).filter(|&n| n < numrows);

    let (remain, to_row) = if current == num_pages {
        (0, numrows)
    } else if current == num_pages - 1 {
        (numrows - limit * (num_pages - 1), current * limit)
    } else {
        (limit, current * limit)
    };

    tracing::debug!(from, limit, numrows, current, num_pages, "page info built");

    Ok(Some(PageInfo {
        current,
        num_pages,
        prev,
        next,
        remain,
        from_row: from + 1,
        to_row,
        numrows,
        limit,
    }))
}

impl PageInfo {
    /// Page number (1-based) containing `from`.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn num_pages(&self) -> usize {
        self.num_pages
    }

    /// `(page, start offset)` for pages `1..=num_pages`, computed lazily.
    pub fn pages(&self) -> impl Iterator<Item = (usize, usize)> {
        let limit = self.limit;
        (1..=self.num_pages).map(move |page| (page, limit * (page - 1)))
    }

    pub fn offset_of(&self, page: usize) -> Option<usize> {
        (1..=self.num_pages)
            .contains(&page)
            .then(|| self.limit * (page - 1))
    }

    /// Offset of the previous page, if any.
    pub fn prev(&self) -> Option<usize> {
        self.prev
    }

    /// Offset of the next page, if any.
    pub fn next(&self) -> Option<usize> {
        self.next
    }

    /// Rows available on the page after this one (0 on the last page).
    pub fn remain(&self) -> usize {
        self.remain
    }

    pub fn from_row(&self) -> usize {
        self.from_row
    }

    pub fn to_row(&self) -> usize {
        self.to_row
    }

    pub fn numrows(&self) -> usize {
        self.numrows
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    pub fn is_last(&self) -> bool {
        self.current == self.num_pages
    }

    /// Number of rows served on the current page.
    pub fn rows_on_page(&self) -> usize {
        self.to_row + 1 - self.from_row
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    fn build(from: usize, limit: usize, numrows: usize) -> PageInfo {
        page_info(Some(from), limit, Some(numrows))
            .unwrap()
            .expect("page info")
    }

    #[test]
    fn middle_page() {
        let p = build(40, 20, 95);
        assert_eq!(p.num_pages(), 5);
        assert_eq!(p.current(), 3);
        assert_eq!(
            p.pages().collect::<Vec<_>>(),
            vec![(1, 0), (2, 20), (3, 40), (4, 60), (5, 80)]
        );
        assert_eq!(p.prev(), Some(20));
        assert_eq!(p.next(), Some(60));
        assert_eq!(p.remain(), 20);
        assert_eq!(p.from_row(), 41);
        assert_eq!(p.to_row(), 60);
        assert_eq!(p.numrows(), 95);
        assert_eq!(p.limit(), 20);
    }

    #[test]
    fn last_page() {
        let p = build(80, 20, 95);
        assert_eq!(p.current(), 5);
        assert_eq!(p.remain(), 0);
        assert_eq!(p.to_row(), 95);
        assert_eq!(p.next(), None);
        assert_eq!(p.prev(), Some(60));
        assert_eq!(p.rows_on_page(), 15);
        assert!(p.is_last());
    }

    #[test]
    fn second_to_last_page_reports_short_remainder() {
        let p = build(60, 20, 95);
        assert_eq!(p.current(), 4);
        assert_eq!(p.remain(), 15);
        assert_eq!(p.to_row(), 80);
    }

    #[test]
    fn first_page_has_no_prev() {
        let p = build(0, 20, 95);
        assert!(p.is_first());
        assert_eq!(p.prev(), None);
        assert_eq!(p.from_row(), 1);
    }

    #[test]
    fn from_defaults_to_zero() {
        let p = page_info(None, 10, Some(5)).unwrap().unwrap();
        assert_eq!(p.current(), 1);
        assert_eq!(p.num_pages(), 1);
        assert_eq!(p.next(), None);
        assert_eq!(p.to_row(), 5);
    }

    #[test_case(None ; "missing")]
    #[test_case(Some(0) ; "zero")]
    fn no_rows_means_no_page_info(numrows: Option<usize>) {
        assert_eq!(page_info(Some(0), 20, numrows).unwrap(), None);
    }

    #[test_case(Some(95) ; "with rows")]
    #[test_case(Some(0) ; "without rows")]
    #[test_case(None ; "unknown rows")]
    fn zero_limit_is_rejected(numrows: Option<usize>) {
        let err = page_info(Some(0), 0, numrows).unwrap_err();
        assert!(matches!(err, AppError::InvalidParameter("limit")));
    }

    #[test_case(5 ; "mid page")]
    #[test_case(100 ; "past the end")]
    #[test_case(95 ; "at numrows")]
    fn misaligned_from_is_rejected(from: usize) {
        let err = page_info(Some(from), 20, Some(95)).unwrap_err();
        assert!(matches!(err, AppError::InvalidParameter("from")));
    }

    #[test]
    fn next_offset_does_not_overflow() {
        let half = usize::MAX / 2 + 1;
        let p = build(half, half, usize::MAX);
        assert_eq!(p.num_pages(), 2);
        assert_eq!(p.current(), 2);
        assert_eq!(p.next(), None);
        assert_eq!(p.prev(), Some(0));
        assert_eq!(p.to_row(), usize::MAX);
    }

    #[test]
    fn huge_row_counts_do_not_materialise_pages() {
        let p = build(0, 1, usize::MAX);
        assert_eq!(p.num_pages(), usize::MAX);
        assert_eq!(p.offset_of(usize::MAX), Some(usize::MAX - 1));
        assert_eq!(p.offset_of(0), None);
        assert_eq!(p.pages().nth(2), Some((3, 2)));

        let p = build(999_999_999_000, 1000, 1_000_000_000_000_000);
        assert_eq!(p.current(), 1_000_000_000);
        assert_eq!(p.next(), Some(1_000_000_000_000));
    }

    #[test]
    fn every_aligned_offset_is_accepted() {
        for numrows in 1..=60usize {
            for limit in 1..=13 {
                let num_pages = numrows.div_ceil(limit);
                for k in 0..num_pages {
                    let from = k * limit;
                    let p = build(from, limit, numrows);
                    assert_eq!(p.current(), k + 1);
                    assert_eq!(p.offset_of(p.current()), Some(from));
                    assert_eq!(p.next().is_none(), p.is_last());
                    assert_eq!(p.prev().is_none(), p.is_first());

                    let served = p.to_row() - (p.from_row() - 1);
                    if p.is_last() {
                        assert_eq!(served, numrows - limit * (num_pages - 1));
                    } else {
                        assert_eq!(served, limit);
                    }
                }
            }
        }
    }
}
