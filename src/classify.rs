//! Threshold classification of snow depth and white Christmas counts.
//!
//! All classifiers are built on [`reclassify`], which mirrors right-open
//! digitizing: a value's class is the number of edges less than or equal to it.

use crate::bands::extract_xmas_bands;
use crate::error::{Result, WhiteXmasError};
use crate::grid::{ClassGrid, Grid, YearRaster};
use log::debug;

/// Edges of the published FMI Christmas-weather probability map, in
/// white Christmases per ten years.
pub const PROBABILITY_EDGES: [f64; 6] = [0.0, 6.0, 8.3, 9.3, 9.7, 10.0];

pub const PROBABILITY_LABELS: [&str; 6] = [
    "0-6 in 10",
    "6-8.3 in 10",
    "8.3-9.3 in 10",
    "9.3-9.7 in 10",
    "9.7-10 in 10",
    "Always white",
];

pub const NO_SNOW: u8 = 0;
pub const WHITE: u8 = 1;

/// Largest table whose classes (`0..=edges`) still fit a `u8` code.
pub const MAX_EDGES: usize = u8::MAX as usize;

/// Strictly increasing bin edges, at most [`MAX_EDGES`] of them.
#[derive(Debug, Clone, PartialEq)]
pub struct BinTable {
    edges: Vec<f64>,
}

impl BinTable {
    pub fn new(edges: Vec<f64>) -> Result<Self> {
        let increasing = edges.windows(2).all(|w| w[0] < w[1]);
        if edges.is_empty()
            || edges.len() > MAX_EDGES
            || !increasing
            || edges.iter().any(|e| e.is_nan())
        {
            return Err(WhiteXmasError::InvalidBins(edges));
        }
        Ok(Self { edges })
    }

    /// Two bins: no snow `[0, threshold)` and white `[threshold, inf)`.
    pub fn white_day(threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(WhiteXmasError::InvalidThreshold(threshold));
        }
        Self::new(vec![0.0, threshold])
    }

    pub fn probability() -> Self {
        Self {
            edges: PROBABILITY_EDGES.to_vec(),
        }
    }

    /// Number of edges `<= value`. `None` for NaN.
    pub fn class_of(&self, value: f64) -> Option<u8> {
        if value.is_nan() {
            return None;
        }
        Some(self.edges.partition_point(|e| *e <= value) as u8)
    }
}

/// Assign each present cell the count of edges less than or equal to it.
pub fn reclassify<T>(grid: &Grid<T>, bins: &BinTable) -> ClassGrid
where
    T: Copy + Into<f64>,
{
    grid.map(|v| bins.class_of(v.into()))
}

/// Like [`reclassify`] but numbered from the first edge: values below it
/// have no class and become missing.
fn reclassify_from_first_edge<T>(grid: &Grid<T>, bins: &BinTable) -> ClassGrid
where
    T: Copy + Into<f64>,
{
    grid.map(|v| bins.class_of(v.into()).and_then(|c| c.checked_sub(1)))
}

/// Classify snow depth (cm) as [`NO_SNOW`] or [`WHITE`].
///
/// A depth exactly at the threshold is white. Negative depths are not
/// measurements and come out missing.
pub fn classify_white_day<T>(day: &Grid<T>, threshold: f64) -> Result<ClassGrid>
where
    T: Copy + Into<f64>,
{
    let bins = BinTable::white_day(threshold)?;
    Ok(reclassify_from_first_edge(day, &bins))
}

/// White only where all of 24, 25 and 26 December are white.
pub fn classify_all_white(year_raster: &YearRaster, threshold: f64) -> Result<ClassGrid> {
    let [eve, day, boxing] = extract_xmas_bands(year_raster)?;

    let all_white = classify_white_day(&eve, threshold)?
        .mul(&classify_white_day(&day, threshold)?)?
        .mul(&classify_white_day(&boxing, threshold)?)?;

    debug!(
        "Year {}: {} cells missing after all-days classification",
        year_raster.year(),
        all_white.missing_count()
    );
    Ok(all_white)
}

/// Bin a ten-year white Christmas frequency into the classes of
/// [`PROBABILITY_LABELS`], `0..=5`.
pub fn classify_probability<T>(count: &Grid<T>) -> ClassGrid
where
    T: Copy + Into<f64>,
{
    reclassify_from_first_edge(count, &BinTable::probability())
}
