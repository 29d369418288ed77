use crate::bands::xmas_average;
use crate::classify::{classify_all_white, classify_white_day};
use crate::error::Result;
use crate::grid::{ClassGrid, CountGrid, DepthGrid, Grid, YearRaster};
use crate::years::{RasterCollection, YearMap, YearRange};
use log::{debug, info};

/// How a year's Christmas is judged white.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmasMode {
    /// The 24-26 December average depth meets the threshold.
    Average,
    /// Each of 24, 25 and 26 December meets the threshold.
    AllDays,
}

impl XmasMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            XmasMode::Average => "average",
            XmasMode::AllDays => "all-days",
        }
    }
}

/// Sum per-year classes over `range`, seeded with the first year's grid.
///
/// A cell missing in any year stays missing in the total.
fn fold_years<T>(
    per_year: &YearMap<T>,
    range: YearRange,
    classify: impl Fn(&T) -> Result<ClassGrid>,
) -> Result<CountGrid> {
    let mut total = classify(per_year.get(range.start())?)?.map(|c| Some(u32::from(c)));

    for year in range.iter().skip(1) {
        let classes = classify(per_year.get(year)?)?.map(|c| Some(u32::from(c)));
        total = total.add(&classes)?;
        debug!("Summed year {}, {} cells missing", year, total.missing_count());
    }

    Ok(total)
}

/// Count white Christmases from precomputed 24-26 December average grids.
pub fn sum_white_xmas(
    xmas_averages: &YearMap<DepthGrid>,
    start: i32,
    end: i32,
    threshold: f64,
) -> Result<CountGrid> {
    let range = YearRange::new(start, end)?;
    info!(
        "Counting average-depth white Christmases {}-{} (threshold {} cm)",
        start, end, threshold
    );
    fold_years(xmas_averages, range, |avg| classify_white_day(avg, threshold))
}

/// Count Christmases where all three days were white.
pub fn sum_all_white_xmas(
    rasters: &RasterCollection,
    start: i32,
    end: i32,
    threshold: f64,
) -> Result<CountGrid> {
    let range = YearRange::new(start, end)?;
    info!(
        "Counting all-days white Christmases {}-{} (threshold {} cm)",
        start, end, threshold
    );
    fold_years(rasters, range, |raster| classify_all_white(raster, threshold))
}

/// Count white Christmases straight from daily stacks, in the given mode.
pub fn count_white_xmas(
    rasters: &RasterCollection,
    start: i32,
    end: i32,
    threshold: f64,
    mode: XmasMode,
) -> Result<CountGrid> {
    match mode {
        XmasMode::Average => {
            let range = YearRange::new(start, end)?;
            fold_years(rasters, range, |raster| {
                classify_white_day(&xmas_average(raster)?, threshold)
            })
        }
        XmasMode::AllDays => sum_all_white_xmas(rasters, start, end, threshold),
    }
}

/// One year's white Christmas classes.
pub fn classify_year(raster: &YearRaster, threshold: f64, mode: XmasMode) -> Result<ClassGrid> {
    match mode {
        XmasMode::Average => classify_white_day(&xmas_average(raster)?, threshold),
        XmasMode::AllDays => classify_all_white(raster, threshold),
    }
}

/// Rescale a count over `years` years to white Christmases per ten years.
pub fn per_decade(count: &CountGrid, years: usize) -> Grid<f64> {
    let years = years as f64;
    count.map(|c| Some(f64::from(c) * 10.0 / years))
}
