//! Page arithmetic over a linear result set, and a cursor that serves only
//! the rows of the current page.
//!
//! ```
//! use sqlite_pager::{FetchMode, Pager};
//!
//! let mut rows: Vec<u32> = (0..95).collect();
//! let mut pager = Pager::new(&mut rows, Some(40), 20, None).unwrap();
//! assert_eq!(pager.page_info().current(), 3);
//! assert_eq!(pager.page_info().next(), Some(60));
//!
//! let page: Vec<u32> = pager.rows(FetchMode::Default).map(Result::unwrap).collect();
//! assert_eq!(page.first(), Some(&40));
//! assert_eq!(page.len(), 20);
//! ```

pub mod core;
pub mod error;

pub use crate::core::{
    cursor::{Pager, RowSource, Rows},
    page::{page_info, PageInfo},
    sqlite::SqliteRows,
    types::{DbRow, FetchMode},
};
pub use crate::error::{AppError, AppResult};
