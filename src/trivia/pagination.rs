pub const QUESTIONS_PER_PAGE: usize = 8;

/// A 1-based page over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: usize,
    size: usize,
}

impl Page {
    /// Missing and non-positive page numbers both mean the first page.
    pub fn new(requested: Option<i64>) -> Self {
        Self::with_size(requested, QUESTIONS_PER_PAGE)
    }

    pub fn with_size(requested: Option<i64>, size: usize) -> Self {
        let number = match requested {
            Some(n) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX),
            _ => 1,
        };
        Self { number, size }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn offset(&self) -> usize {
        (self.number - 1).saturating_mul(self.size)
    }

    /// Empty when the page lies past the end of `items`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = start.saturating_add(self.size).min(items.len());
        &items[start..end]
    }

    pub fn paginate<T: Clone>(&self, items: &[T]) -> Vec<T> {
        self.slice(items).to_vec()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None)
    }
}
