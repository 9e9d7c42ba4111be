use crate::{
    core::{
        page::{page_info, PageInfo},
        types::FetchMode,
    },
    error::{AppError, AppResult},
};

/// A result set the pager reads rows from.
///
/// Indices are zero-based and absolute within the whole result set.
pub trait RowSource {
    type Row;

    fn row_count(&mut self) -> AppResult<usize>;

    fn fetch_row(&mut self, index: usize, mode: FetchMode) -> AppResult<Option<Self::Row>>;

    /// Fetches into `buf`; `Ok(false)` when there is no row at `index`.
    fn fetch_row_into(
        &mut self,
        buf: &mut Self::Row,
        index: usize,
        mode: FetchMode,
    ) -> AppResult<bool>;
}

impl<T: Clone> RowSource for Vec<T> {
    type Row = T;

    fn row_count(&mut self) -> AppResult<usize> {
        Ok(self.len())
    }

    fn fetch_row(&mut self, index: usize, _mode: FetchMode) -> AppResult<Option<T>> {
        Ok(self.get(index).cloned())
    }

    fn fetch_row_into(&mut self, buf: &mut T, index: usize, _mode: FetchMode) -> AppResult<bool> {
        match self.get(index) {
            Some(row) => {
                buf.clone_from(row);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Serves the rows of one page from a borrowed [`RowSource`].
///
/// The source stays owned by the caller; the pager never closes or resets it.
#[derive(Debug)]
pub struct Pager<'a, S: RowSource> {
    source: &'a mut S,
    info: PageInfo,
    // zero-based index of the next row to serve
    cursor: usize,
    top: usize,
}

impl<'a, S: RowSource> Pager<'a, S> {
    /// Builds the page descriptor, asking the source for its row count when
    /// `numrows` is not given.
    pub fn new(
        source: &'a mut S,
        from: Option<usize>,
        limit: usize,
        numrows: Option<usize>,
    ) -> AppResult<Self> {
        let numrows = match numrows {
            Some(n) => n,
            None => {
                let n = source.row_count()?;
                tracing::debug!(numrows = n, "row count looked up from source");
                n
            }
        };
        let info = page_info(from, limit, Some(numrows))?.ok_or(AppError::NoData)?;
        let cursor = info.from_row() - 1;
        let top = info.to_row();
        Ok(Self {
            source,
            info,
            cursor,
            top,
        })
    }

    pub fn page_info(&self) -> &PageInfo {
        &self.info
    }

    /// Zero-based index of the next row to serve.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.top
    }

    /// Next row of the page, or `Ok(None)` once the page end is reached.
    pub fn next_row(&mut self, mode: FetchMode) -> AppResult<Option<S::Row>> {
        let Some(index) = self.advance() else {
            return Ok(None);
        };
        self.source.fetch_row(index, mode)
    }

    /// Like [`Pager::next_row`], writing into `buf`. Returns `Ok(false)` once
    /// the page end is reached.
    pub fn next_row_into(&mut self, buf: &mut S::Row, mode: FetchMode) -> AppResult<bool> {
        let Some(index) = self.advance() else {
            return Ok(false);
        };
        self.source.fetch_row_into(buf, index, mode)
    }

    /// Iterates the rows left on the page.
    pub fn rows(&mut self, mode: FetchMode) -> Rows<'_, 'a, S> {
        Rows { pager: self, mode }
    }

    fn advance(&mut self) -> Option<usize> {
        if self.is_exhausted() {
            tracing::trace!(top = self.top, "page exhausted");
            return None;
        }
        let index = self.cursor;
        self.cursor += 1;
        Some(index)
    }
}

pub struct Rows<'p, 'a, S: RowSource> {
    pager: &'p mut Pager<'a, S>,
    mode: FetchMode,
}

impl<S: RowSource> Iterator for Rows<'_, '_, S> {
    type Item = AppResult<S::Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pager.next_row(self.mode).transpose()
    }
}
