//! Cache key for range-sum results

use std::fmt;

/// Exact `[left, right]` coordinates of a cached sum (both inclusive)
///
/// Keys match by equality only; `(0, 9)` says nothing about `(0, 8)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RangeKey {
    /// First index of the range
    pub left: usize,
    /// Last index of the range
    pub right: usize,
}

impl RangeKey {
    /// Create a key; callers are expected to have checked `left <= right`
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    /// Whether `index` falls inside the range
    pub fn contains(&self, index: usize) -> bool {
        self.left <= index && index <= self.right
    }

    /// Number of array elements covered
    pub fn span(&self) -> usize {
        self.right - self.left + 1
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.left, self.right)
    }
}

impl From<(usize, usize)> for RangeKey {
    fn from((left, right): (usize, usize)) -> Self {
        Self::new(left, right)
    }
}
