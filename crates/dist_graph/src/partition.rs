//! Block partitioning of a 1-D index range across a fixed number of locales.
//!
//! Every distributed array and the construction pipeline's per-locale edge
//! ranges share the same `±1` balancing rule: the first `len % locales`
//! locales get one extra element.

use std::ops::Range;

/// A contiguous block partitioning of `0..len` across `locales` locales.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    len: usize,
    locales: usize,
    base: usize,
    remainder: usize,
}

impl Partition {
    /// Creates a new partitioning of `len` elements across `locales` locales.
    ///
    /// `locales` must be non-zero; a `len` of zero is allowed and yields an
    /// empty block on every locale.
    pub fn new(len: usize, locales: usize) -> Self {
        assert!(locales > 0, "locale count must be non-zero");
        Self {
            len,
            locales,
            base: len / locales,
            remainder: len % locales,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn locales(&self) -> usize {
        self.locales
    }

    /// The number of elements owned by `locale`.
    pub fn block_len(&self, locale: usize) -> usize {
        self.base + usize::from(locale < self.remainder)
    }

    /// The `[lo, hi)` range of global indices owned by `locale`.
    pub fn local_range(&self, locale: usize) -> Range<usize> {
        assert!(locale < self.locales, "locale {locale} out of range");
        let lo = locale * self.base + locale.min(self.remainder);
        let hi = lo + self.block_len(locale);
        lo..hi
    }

    /// The locale owning global index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds for `len`.
    pub fn owner_of(&self, i: usize) -> usize {
        assert!(i < self.len, "index {i} out of bounds for length {}", self.len);
        // The first `remainder` locales hold `base + 1` elements each; after
        // that boundary every locale holds exactly `base` elements.
        let boundary = self.remainder * (self.base + 1);
        if i < boundary {
            i / (self.base + 1)
        } else {
            self.remainder + (i - boundary) / self.base.max(1)
        }
    }

    /// The locale owning global index `i`, or `None` if every locale's block
    /// containing `i` would be empty (only possible when `len == 0`).
    pub fn try_owner_of(&self, i: usize) -> Option<usize> {
        if i >= self.len {
            None
        } else {
            Some(self.owner_of(i))
        }
    }
}
