pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: u32,
    page_count: u32,
}

impl<'a, T> Paginator<'a, T> {
    /// `page_size` has to be greater than 0. There is always at least one page.
    pub fn from(items: &'a [T], page_size: u32) -> Self {
        let item_count = items.len() as u32;
        let page_count = item_count.div_ceil(page_size).max(1);

        Paginator {
            items,
            page_size,
            page_count,
        }
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Pages are 1-based. Pages out of range are empty.
    pub fn get_page(&self, page: u32) -> &'a [T] {
        if page == 0 {
            return &[];
        }

        let start = (page as usize - 1).saturating_mul(self.page_size as usize);
        if start >= self.items.len() {
            return &[];
        }
        let end = (start + self.page_size as usize).min(self.items.len());
        &self.items[start..end]
    }
}
