use serde::Serialize;

pub const DEFAULT_LIMIT: u32 = 10;

/// Page position within a collection of `total` records.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

impl PageWindow {
    /// Pages and limits start at 1.
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            total,
        }
    }

    /// Saturates at `u32::MAX` for absurd totals.
    pub fn total_pages(&self) -> u32 {
        u32::try_from(self.total.div_ceil(self.limit as u64)).unwrap_or(u32::MAX)
    }

    /// Index of the first record on this page, zero based.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }

    /// One-based position of the first record shown.
    pub fn first(&self) -> u64 {
        if self.total == 0 {
            return 0;
        }

        (self.offset() as u64 + 1).min(self.total)
    }

    /// One-based position of the last record shown.
    pub fn last(&self) -> u64 {
        (self.page as u64 * self.limit as u64).min(self.total)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// "21 to 23 of 23"
    pub fn range_label(&self) -> String {
        format!("{} to {} of {}", self.first(), self.last(), self.total)
    }

    /// Slices an in-memory collection the way the API would page it.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .skip(self.offset())
            .take(self.limit as usize)
            .cloned()
            .collect()
    }
}
