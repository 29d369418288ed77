// Library exports for testing and reuse

pub mod aggregate;
pub mod bands;
pub mod classify;
pub mod cli;
pub mod crs;
pub mod error;
pub mod grid;
pub mod io;
pub mod layer;
pub mod run;
pub mod store;
pub mod years;

// Re-export commonly used types
pub use aggregate::{count_white_xmas, sum_all_white_xmas, sum_white_xmas, XmasMode};
pub use bands::{average_bands, extract_xmas_bands, xmas_average_rasters};
pub use classify::{classify_all_white, classify_probability, classify_white_day, reclassify, BinTable};
pub use error::{Result, WhiteXmasError};
pub use grid::{ClassGrid, CountGrid, DepthGrid, Grid, RasterMetadata, YearRaster};
pub use layer::MapLayer;
pub use store::{GdalRasterStore, RasterStore};
pub use years::{validate, RasterCollection, YearMap, YearRange};
