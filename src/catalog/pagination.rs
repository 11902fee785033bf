/// Fixed number of questions per page.
pub const QUESTIONS_PER_PAGE: i64 = 10;

/// A 1-indexed page of questions.
///
/// Pages below 1 are kept as-is and simply select nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(i64);

impl Page {
    pub fn new(number: i64) -> Self {
        Self(number)
    }

    pub fn number(&self) -> i64 {
        self.0
    }

    /// Whether the page can hold anything at all.
    pub fn in_range(&self) -> bool {
        self.0 >= 1
    }

    /// Index of the first question on the page.
    pub fn offset(&self) -> i64 {
        (self.0 - 1).saturating_mul(QUESTIONS_PER_PAGE)
    }

    pub fn limit(&self) -> i64 {
        QUESTIONS_PER_PAGE
    }

    /// Cuts this page out of an already ordered list.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        if !self.in_range() {
            return &[];
        }
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let end = start.saturating_add(QUESTIONS_PER_PAGE as usize);
        let len = items.len();
        &items[start.min(len)..end.min(len)]
    }
}

impl Default for Page {
    fn default() -> Self {
        Self(1)
    }
}

impl From<Option<i64>> for Page {
    fn from(number: Option<i64>) -> Self {
        number.map(Page::new).unwrap_or_default()
    }
}
