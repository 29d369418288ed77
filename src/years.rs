use crate::error::{Result, WhiteXmasError};
use crate::grid::YearRaster;
use std::collections::BTreeMap;

/// First year of the FMI daily snow depth dataset.
pub const FIRST_YEAR: i32 = 1961;
/// Last year published at the time of writing. Not enforced by [`validate`].
pub const LAST_KNOWN_YEAR: i32 = 2022;

/// Default interval for white Christmas summaries (WMO reference period).
pub const REFERENCE_PERIOD: (i32, i32) = (1991, 2020);

/// Check that `start..=end` lies within the dataset span and is non-decreasing.
///
/// Only the lower bound is checked; years past [`LAST_KNOWN_YEAR`] are left to
/// the raster store to reject when their files do not exist.
pub fn validate(start: i32, end: i32) -> Result<()> {
    if start < FIRST_YEAR || end < start {
        return Err(WhiteXmasError::InvalidRange { start, end });
    }
    Ok(())
}

/// An inclusive, validated year interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self> {
        validate(start, end)?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    /// Number of years in the range, always at least one.
    pub fn year_count(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> {
        self.start..=self.end
    }
}

/// Per-year values keyed by year.
#[derive(Debug, Clone)]
pub struct YearMap<T> {
    entries: BTreeMap<i32, T>,
}

/// Loaded daily snow depth stacks.
pub type RasterCollection = YearMap<YearRaster>;

impl<T> Default for YearMap<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T> YearMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, year: i32, value: T) -> Option<T> {
        self.entries.insert(year, value)
    }

    /// Look up a year, failing with [`WhiteXmasError::YearNotFound`] if absent.
    pub fn get(&self, year: i32) -> Result<&T> {
        self.entries
            .get(&year)
            .ok_or(WhiteXmasError::YearNotFound(year))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Years present, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.entries.keys().copied()
    }

    /// Transform every value, stopping at the first error.
    pub fn try_map<U>(&self, f: impl Fn(&T) -> Result<U>) -> Result<YearMap<U>> {
        let mut entries = BTreeMap::new();
        for (year, value) in &self.entries {
            entries.insert(*year, f(value)?);
        }
        Ok(YearMap { entries })
    }
}

impl<T> FromIterator<(i32, T)> for YearMap<T> {
    fn from_iter<I: IntoIterator<Item = (i32, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
