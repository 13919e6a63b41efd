/// Offset/limit window requested through `from` and `size`.
///
/// `from` is an element offset, not a page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub from: i64,
    pub size: i64,
}

impl Page {
    pub fn new(from: i64, size: i64) -> Self {
        Self { from, size }
    }

    pub fn offset(&self) -> i64 {
        self.from.max(0)
    }

    pub fn limit(&self) -> i64 {
        self.size.max(1)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, 20)
    }
}
