use super::types::Limits;
use crate::error::{AppError, AppResult};

/// Page size for a request: the requested one, else the configured default.
///
/// A request above `max_rows` is refused rather than shrunk, since a smaller
/// page size would move the page boundaries the caller's `from` was built on.
pub fn effective_limit(
    requested: Option<usize>,
    page_size: usize,
    max_rows: usize,
) -> AppResult<Limits> {
    let page_size = match requested {
        Some(n) if n > max_rows => {
            return Err(AppError::InvalidRequest(format!(
                "limit {n} exceeds max rows {max_rows}"
            )))
        }
        Some(n) => n,
        None => page_size.min(max_rows),
    };
    Ok(Limits { page_size })
}
