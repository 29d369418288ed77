use crate::error::{Result, WhiteXmasError};
use crate::grid::YearRaster;
use crate::io::read_year_raster;
use crate::years::{RasterCollection, YearRange};
use log::{info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Source of yearly snow depth stacks.
pub trait RasterStore {
    /// Load one year, failing with [`WhiteXmasError::RasterNotFound`] if it has no file.
    fn load(&self, year: i32) -> Result<YearRaster>;

    /// Load every year of `start..=end`.
    ///
    /// With `tolerate_missing`, years without a file are skipped with a warning;
    /// otherwise the earliest missing year is an error. Other failures always are.
    fn load_range(&self, start: i32, end: i32, tolerate_missing: bool) -> Result<RasterCollection> {
        let range = YearRange::new(start, end)?;
        collect_years(range.iter().map(|year| (year, self.load(year))), tolerate_missing)
    }
}

/// Gather loaded years in order, dropping tolerated missing files.
fn collect_years(
    results: impl IntoIterator<Item = (i32, Result<YearRaster>)>,
    tolerate_missing: bool,
) -> Result<RasterCollection> {
    let mut rasters = RasterCollection::new();
    for (year, result) in results {
        match result {
            Ok(raster) => {
                rasters.insert(year, raster);
            }
            Err(WhiteXmasError::RasterNotFound { path, .. }) if tolerate_missing => {
                warn!("Skipping {}: no raster at {}", year, path);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(rasters)
}

/// FMI daily snow depth GeoTIFFs, one `snow_{year}.tif` per year in a directory.
#[derive(Debug, Clone)]
pub struct GdalRasterStore {
    dir: PathBuf,
}

impl GdalRasterStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, year: i32) -> PathBuf {
        self.dir.join(format!("snow_{}.tif", year))
    }
}

impl RasterStore for GdalRasterStore {
    fn load(&self, year: i32) -> Result<YearRaster> {
        let path = self.path_for(year);
        if !path.is_file() {
            return Err(WhiteXmasError::RasterNotFound {
                year,
                path: path.display().to_string(),
            });
        }
        read_year_raster(&path, year)
    }

    /// Reads years in parallel; results are still consumed in year order.
    fn load_range(&self, start: i32, end: i32, tolerate_missing: bool) -> Result<RasterCollection> {
        let range = YearRange::new(start, end)?;
        info!(
            "Loading snow rasters {}-{} from {}",
            start,
            end,
            self.dir.display()
        );

        let years: Vec<i32> = range.iter().collect();
        let results: Vec<(i32, Result<YearRaster>)> = years
            .into_par_iter()
            .map(|year| (year, self.load(year)))
            .collect();

        let rasters = collect_years(results, tolerate_missing)?;
        info!("Loaded {} of {} years", rasters.len(), range.year_count());
        Ok(rasters)
    }
}
