use crate::listing::Listing;

// Number of listing cards shown per page
pub const PAGE_SIZE: usize = 8;

// One page of filtered results, ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub visible: Vec<Listing>,
    pub page_count: usize,
    pub total: usize,
    pub page_size: usize,
}

impl PageView {
    // Page selector buttons are only rendered when the result set does not
    // fit on a single page. A zero page count means there is nothing to
    // render at all.
    pub fn selector_pages(&self) -> Option<std::ops::RangeInclusive<usize>> {
        if self.total > self.page_size {
            Some(1..=self.page_count)
        } else {
            None
        }
    }
}

// Cut the 1-based `page` out of the filtered sequence. A page past the end
// yields an empty slice; the cursor is never clamped back into range.
pub fn paginate(filtered: &[Listing], page: usize, page_size: usize) -> PageView {
    let total = filtered.len();
    let page_count = (total + page_size - 1) / page_size;

    let start = page.saturating_sub(1) * page_size;
    let visible = if start >= total {
        Vec::new()
    } else {
        let end = (start + page_size).min(total);
        filtered[start..end].to_vec()
    };

    PageView {
        visible,
        page_count,
        total,
        page_size,
    }
}
