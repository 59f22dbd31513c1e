use std::ops::Range;

/// Position of one page within a list of `total` items.
///
/// `start` and `end` are 1-based and inclusive; an empty list has
/// `start == end == 0`. `0 <= start <= end <= total` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageInfo {
    pub page: usize,
    pub page_size: usize,
    pub start: usize,
    pub end: usize,
    pub total: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PageInfo {
    /// Number of pages; at least one, even for an empty list.
    pub fn last_page(&self) -> usize {
        last_page(self.page_size, self.total)
    }

    /// 0-based index range of the page's items.
    pub fn range(&self) -> Range<usize> {
        if self.total == 0 {
            0..0
        } else {
            self.start - 1..self.end
        }
    }
}

fn last_page(page_size: usize, total: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Compute the bounds of `page` (1-based). Out-of-range pages are clamped.
pub fn pagination_info(page: usize, page_size: usize, total: usize) -> PageInfo {
    let page_size = page_size.max(1);
    let page = page.clamp(1, last_page(page_size, total));

    let (start, end) = if total == 0 {
        (0, 0)
    } else {
        ((page - 1) * page_size + 1, (page * page_size).min(total))
    };

    PageInfo {
        page,
        page_size,
        start,
        end,
        total,
        has_prev: page > 1,
        has_next: page * page_size < total,
    }
}

/// Slice out the items of one page.
pub fn paginate<'a, T>(items: &'a [T], info: &PageInfo) -> &'a [T] {
    let range = info.range();
    &items[range.start.min(items.len())..range.end.min(items.len())]
}
