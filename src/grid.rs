use crate::error::{Result, WhiteXmasError};
use ndarray::{Array2, Array3, Axis, Zip};
use std::ops::{Add, Mul};

/// Georeferencing shared by every grid derived from one source raster.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterMetadata {
    pub width: usize,
    pub height: usize,
    pub geotransform: [f64; 6],
    pub projection: String,
    pub pixel_width: f64,
    pub pixel_height: f64,
}

impl RasterMetadata {
    /// Unit-cell metadata with no projection, for grids built in memory.
    pub fn for_shape(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            geotransform: [0.0, 1.0, 0.0, height as f64, 0.0, -1.0],
            projection: String::new(),
            pixel_width: 1.0,
            pixel_height: 1.0,
        }
    }
}

/// A 2D raster whose cells are either a value or missing (`None`).
///
/// Cells are indexed `[row, col]`. Arithmetic between grids propagates
/// missing cells: if either operand is `None`, so is the result.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    cells: Array2<Option<T>>,
    metadata: RasterMetadata,
}

/// One day's (or a day average's) snow depth in centimetres.
pub type DepthGrid = Grid<f32>;
/// Ordinal class codes.
pub type ClassGrid = Grid<u8>;
/// Number of years satisfying a predicate.
pub type CountGrid = Grid<u32>;

impl<T: Copy> Grid<T> {
    pub fn new(cells: Array2<Option<T>>, metadata: RasterMetadata) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows != metadata.height || cols != metadata.width {
            return Err(WhiteXmasError::InvalidDimensions(cols, rows));
        }
        Ok(Self { cells, metadata })
    }

    /// Grid with metadata from [`RasterMetadata::for_shape`].
    pub fn from_cells(cells: Array2<Option<T>>) -> Self {
        let (rows, cols) = cells.dim();
        Self {
            cells,
            metadata: RasterMetadata::for_shape(cols, rows),
        }
    }

    pub fn cells(&self) -> &Array2<Option<T>> {
        &self.cells
    }

    pub fn metadata(&self) -> &RasterMetadata {
        &self.metadata
    }

    /// (rows, cols)
    pub fn dim(&self) -> (usize, usize) {
        self.cells.dim()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        self.cells.get((row, col)).copied().flatten()
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Apply `f` to every present cell. `f` may itself mark a cell missing.
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> Option<U>) -> Grid<U> {
        Grid {
            cells: self.cells.map(|c| c.and_then(&f)),
            metadata: self.metadata.clone(),
        }
    }

    /// Combine two equally shaped grids cell by cell, keeping `self`'s metadata.
    pub fn zip_with(&self, other: &Grid<T>, f: impl Fn(T, T) -> T) -> Result<Grid<T>> {
        self.check_shape(other)?;
        let cells = Zip::from(&self.cells)
            .and(&other.cells)
            .map_collect(|a, b| match (a, b) {
                (Some(a), Some(b)) => Some(f(*a, *b)),
                _ => None,
            });
        Ok(Grid {
            cells,
            metadata: self.metadata.clone(),
        })
    }

    pub fn check_shape<U>(&self, other: &Grid<U>) -> Result<()> {
        if self.cells.dim() != other.cells.dim() {
            return Err(WhiteXmasError::ShapeMismatch(
                self.cells.dim(),
                other.cells.dim(),
            ));
        }
        Ok(())
    }
}

impl<T: Copy + Add<Output = T>> Grid<T> {
    pub fn add(&self, other: &Grid<T>) -> Result<Grid<T>> {
        self.zip_with(other, |a, b| a + b)
    }
}

impl<T: Copy + Mul<Output = T>> Grid<T> {
    pub fn mul(&self, other: &Grid<T>) -> Result<Grid<T>> {
        self.zip_with(other, |a, b| a * b)
    }
}

/// A year's daily snow depth stack, indexed `[day, row, col]`.
#[derive(Debug, Clone)]
pub struct YearRaster {
    year: i32,
    bands: Array3<Option<f32>>,
    metadata: RasterMetadata,
}

impl YearRaster {
    pub fn new(year: i32, bands: Array3<Option<f32>>, metadata: RasterMetadata) -> Result<Self> {
        let (_, rows, cols) = bands.dim();
        if rows != metadata.height || cols != metadata.width {
            return Err(WhiteXmasError::InvalidDimensions(cols, rows));
        }
        Ok(Self {
            year,
            bands,
            metadata,
        })
    }

    /// Build from day grids in chronological order. All days must share a shape.
    pub fn from_days(year: i32, days: &[Array2<Option<f32>>]) -> Result<Self> {
        let (rows, cols) = days.first().map(|d| d.dim()).unwrap_or((0, 0));
        let mut bands = Array3::from_elem((days.len(), rows, cols), None);
        for (i, day) in days.iter().enumerate() {
            if day.dim() != (rows, cols) {
                return Err(WhiteXmasError::ShapeMismatch((rows, cols), day.dim()));
            }
            bands.index_axis_mut(Axis(0), i).assign(day);
        }
        Self::new(year, bands, RasterMetadata::for_shape(cols, rows))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn band_count(&self) -> usize {
        self.bands.len_of(Axis(0))
    }

    pub fn metadata(&self) -> &RasterMetadata {
        &self.metadata
    }

    /// Copy out one day band (0-based). `None` if out of range.
    pub fn band(&self, index: usize) -> Option<DepthGrid> {
        if index >= self.band_count() {
            return None;
        }
        Some(Grid {
            cells: self.bands.index_axis(Axis(0), index).to_owned(),
            metadata: self.metadata.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_add_propagates_missing() {
        let a = Grid::from_cells(arr2(&[[Some(1u32), Some(2)], [None, Some(4)]]));
        let b = Grid::from_cells(arr2(&[[Some(1u32), None], [Some(3), Some(1)]]));
        let sum = a.add(&b).unwrap();
        assert_eq!(
            sum.cells(),
            &arr2(&[[Some(2u32), None], [None, Some(5)]])
        );
        assert_eq!(sum.missing_count(), 2);
    }

    #[test]
    fn test_mul_propagates_missing() {
        let a = Grid::from_cells(arr2(&[[Some(1u8), Some(0), None]]));
        let b = Grid::from_cells(arr2(&[[Some(1u8), Some(1), Some(1)]]));
        let product = a.mul(&b).unwrap();
        assert_eq!(product.cells(), &arr2(&[[Some(1u8), Some(0), None]]));
    }

    #[test]
    fn test_shape_mismatch() {
        let a = Grid::from_cells(arr2(&[[Some(1u8), Some(0)]]));
        let b = Grid::from_cells(arr2(&[[Some(1u8)], [Some(1)]]));
        assert!(matches!(
            a.add(&b),
            Err(WhiteXmasError::ShapeMismatch((1, 2), (2, 1)))
        ));
    }

    #[test]
    fn test_new_rejects_metadata_mismatch() {
        let cells = arr2(&[[Some(1.0f32), Some(2.0)]]);
        let metadata = RasterMetadata::for_shape(3, 1);
        assert!(Grid::new(cells, metadata).is_err());
    }

    #[test]
    fn test_map_keeps_missing() {
        let grid = Grid::from_cells(arr2(&[[Some(2.0f32), None]]));
        let doubled = grid.map(|v| Some(v * 2.0));
        assert_eq!(doubled.get(0, 0), Some(4.0));
        assert_eq!(doubled.get(0, 1), None);
    }

    #[test]
    fn test_year_raster_band() {
        let days = vec![
            arr2(&[[Some(0.0f32), None]]),
            arr2(&[[Some(5.0f32), Some(1.0)]]),
        ];
        let raster = YearRaster::from_days(2000, &days).unwrap();
        assert_eq!(raster.band_count(), 2);
        assert_eq!(raster.year(), 2000);
        let band = raster.band(1).unwrap();
        assert_eq!(band.get(0, 0), Some(5.0));
        assert!(raster.band(2).is_none());
    }
}
