//! Pagination of prepared lines.

use crate::config::LayoutConfig;
use crate::error::{Error, Result};

/// One page worth of lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a, L> {
    /// 1-based page number
    pub number: usize,
    /// Lines on this page, in order
    pub lines: &'a [L],
}

/// Split `lines` into consecutive pages of `lines_per_page` lines; the last
/// page holds the remainder. No lines means no pages.
pub fn paginate<L>(lines: &[L], lines_per_page: usize) -> Result<Vec<Page<'_, L>>> {
    if lines_per_page == 0 {
        return Err(Error::Configuration("lines per page must be at least 1".to_string()));
    }

    Ok(lines
        .chunks(lines_per_page)
        .enumerate()
        .map(|(i, chunk)| Page {
            number: i + 1,
            lines: chunk,
        })
        .collect())
}

/// Paginate using the capacity derived from a layout configuration.
pub fn paginate_with<'a, L>(lines: &'a [L], config: &LayoutConfig) -> Result<Vec<Page<'a, L>>> {
    let per_page = config.lines_per_page()?;
    let pages = paginate(lines, per_page)?;
    log::debug!(
        "Paginated {} lines into {} pages ({} lines per page)",
        lines.len(),
        pages.len(),
        per_page
    );
    Ok(pages)
}
