//! Pagination of post listings.

use serde::Serialize;

/// Posts shown per listing page unless configured otherwise.
pub const DEFAULT_PER_PAGE: u64 = 10;

/// A requested page, before it is clamped to the listing size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u64,
    pub per_page: u64,
}

impl PageRequest {
    pub fn new(number: u64, per_page: u64) -> Self {
        Self {
            number: number.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Parse the raw `page` query value. Anything that is not a positive
    /// number falls back to the first page.
    pub fn parse(raw: Option<&str>, per_page: u64) -> Self {
        let number = raw.and_then(|s| s.trim().parse::<u64>().ok()).unwrap_or(1);
        Self::new(number, per_page)
    }

    /// Number of pages needed for `count` items. Never less than one.
    pub fn num_pages(&self, count: u64) -> u64 {
        count.div_ceil(self.per_page).max(1)
    }

    /// Clamp the page number into `1..=num_pages` for the given listing size.
    pub fn clamp(self, count: u64) -> Self {
        Self {
            number: self.number.min(self.num_pages(count)),
            per_page: self.per_page,
        }
    }

    /// Zero-based offset of the first item of this page.
    pub fn offset(&self) -> u64 {
        (self.number - 1) * self.per_page
    }
}

/// A paginated slice of a listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub number: u64,
    pub per_page: u64,
    /// Total items across all pages.
    pub count: u64,
    pub num_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page_number: Option<u64>,
    pub next_page_number: Option<u64>,
    pub object_list: Vec<T>,
}

impl<T> Page<T> {
    /// Build a page from already sliced items. `request` must be clamped.
    pub fn new(object_list: Vec<T>, request: PageRequest, count: u64) -> Self {
        let num_pages = request.num_pages(count);
        let number = request.number;
        Self {
            number,
            per_page: request.per_page,
            count,
            num_pages,
            has_previous: number > 1,
            has_next: number < num_pages,
            previous_page_number: (number > 1).then(|| number - 1),
            next_page_number: (number < num_pages).then(|| number + 1),
            object_list,
        }
    }

    /// Slice a complete, already ordered listing.
    pub fn from_items(items: Vec<T>, request: PageRequest) -> Self {
        let count = items.len() as u64;
        let request = request.clamp(count);
        let object_list = items
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.per_page as usize)
            .collect();
        Self::new(object_list, request, count)
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            number: self.number,
            per_page: self.per_page,
            count: self.count,
            num_pages: self.num_pages,
            has_previous: self.has_previous,
            has_next: self.has_next,
            previous_page_number: self.previous_page_number,
            next_page_number: self.next_page_number,
            object_list: self.object_list.into_iter().map(f).collect(),
        }
    }

    /// Like [`Page::map`], stopping at the first error.
    pub fn try_map<U, E, F>(self, f: F) -> Result<Page<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        let object_list = self
            .object_list
            .into_iter()
            .map(f)
            .collect::<Result<Vec<U>, E>>()?;
        Ok(Page {
            number: self.number,
            per_page: self.per_page,
            count: self.count,
            num_pages: self.num_pages,
            has_previous: self.has_previous,
            has_next: self.has_next,
            previous_page_number: self.previous_page_number,
            next_page_number: self.next_page_number,
            object_list,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.object_list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.object_list.iter()
    }
}
