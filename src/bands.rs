use crate::error::{Result, WhiteXmasError};
use crate::grid::{DepthGrid, Grid, YearRaster};
use crate::years::{RasterCollection, YearMap};
use log::debug;
use ndarray::Zip;

/// Offsets from the end of the year's band stack for 24, 25 and 26 December.
/// Counting from the end keeps them valid in leap years.
pub const XMAS_OFFSETS_FROM_END: [usize; 3] = [8, 7, 6];

/// Slice out the 24-26 December day bands, in that order.
pub fn extract_xmas_bands(year_raster: &YearRaster) -> Result<[DepthGrid; 3]> {
    let n = year_raster.band_count();
    if n < XMAS_OFFSETS_FROM_END[0] {
        return Err(WhiteXmasError::TooFewBands(n));
    }

    let band = |offset: usize| {
        year_raster
            .band(n - offset)
            .ok_or(WhiteXmasError::TooFewBands(n))
    };

    debug!(
        "Year {}: christmas bands {:?} of {}",
        year_raster.year(),
        XMAS_OFFSETS_FROM_END.map(|offset| n - offset),
        n
    );

    Ok([
        band(XMAS_OFFSETS_FROM_END[0])?,
        band(XMAS_OFFSETS_FROM_END[1])?,
        band(XMAS_OFFSETS_FROM_END[2])?,
    ])
}

/// Cell-wise mean of three day grids. Missing in any input means missing.
pub fn average_bands(days: &[DepthGrid; 3]) -> Result<DepthGrid> {
    let [a, b, c] = days;
    a.check_shape(b)?;
    a.check_shape(c)?;

    let cells = Zip::from(a.cells())
        .and(b.cells())
        .and(c.cells())
        .map_collect(|x, y, z| match (x, y, z) {
            (Some(x), Some(y), Some(z)) => Some((x + y + z) / 3.0),
            _ => None,
        });

    Grid::new(cells, a.metadata().clone())
}

/// 24-26 December average snow depth for one year.
pub fn xmas_average(year_raster: &YearRaster) -> Result<DepthGrid> {
    average_bands(&extract_xmas_bands(year_raster)?)
}

/// Christmas average grid for every year in the collection.
pub fn xmas_average_rasters(rasters: &RasterCollection) -> Result<YearMap<DepthGrid>> {
    rasters.try_map(xmas_average)
}
