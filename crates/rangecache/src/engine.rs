//! Engine abstraction shared by the cached service and the uncached
//! reference, plus the tagged operations that drive either one.

use crate::error::{Error, Result};

/// Anything that answers range sums and accepts point updates
pub trait RangeSumEngine {
    /// Sum of `array[left..=right]`
    fn query_sum(&mut self, left: usize, right: usize) -> Result<i64>;

    /// Set `array[index] = value`
    fn apply_update(&mut self, index: usize, value: i64) -> Result<()>;
}

/// One step of a workload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Range-sum query over `[left, right]`
    Range {
        /// First index
        left: usize,
        /// Last index (inclusive)
        right: usize,
    },
    /// Point update
    Update {
        /// Index to overwrite
        index: usize,
        /// New value
        value: i64,
    },
}

impl Operation {
    /// Run this operation; range queries yield their sum
    pub fn apply<E>(&self, engine: &mut E) -> Result<Option<i64>>
    where
        E: RangeSumEngine + ?Sized,
    {
        match *self {
            Operation::Range { left, right } => engine.query_sum(left, right).map(Some),
            Operation::Update { index, value } => {
                engine.apply_update(index, value)?;
                Ok(None)
            }
        }
    }
}

/// Reference engine: recomputes every sum directly, caches nothing
#[derive(Debug, Clone)]
pub struct NaiveRangeSum {
    array: Vec<i64>,
}

impl NaiveRangeSum {
    /// Wrap an array
    pub fn new(array: Vec<i64>) -> Self {
        Self { array }
    }

    /// Current array contents
    pub fn array(&self) -> &[i64] {
        &self.array
    }
}

impl RangeSumEngine for NaiveRangeSum {
    fn query_sum(&mut self, left: usize, right: usize) -> Result<i64> {
        check_range(left, right, self.array.len())?;
        range_sum(&self.array, left, right)
    }

    fn apply_update(&mut self, index: usize, value: i64) -> Result<()> {
        check_index(index, self.array.len())?;
        self.array[index] = value;
        Ok(())
    }
}

/// Sum of `array[left..=right]`; the range must already be checked
///
/// Accumulates in `i128`, so only a total outside `i64` is an error.
pub(crate) fn range_sum(array: &[i64], left: usize, right: usize) -> Result<i64> {
    let total: i128 = array[left..=right].iter().map(|&value| i128::from(value)).sum();
    i64::try_from(total).map_err(|_| Error::SumOverflow { left, right })
}

pub(crate) fn check_range(left: usize, right: usize, len: usize) -> Result<()> {
    if left > right || right >= len {
        return Err(Error::InvalidRange { left, right, len });
    }
    Ok(())
}

pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(Error::IndexOutOfRange { index, len });
    }
    Ok(())
}
