use thiserror::Error;

#[derive(Error, Debug)]
pub enum WhiteXmasError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Years {start}-{end} do not form a valid interval starting no earlier than 1961")]
    InvalidRange { start: i32, end: i32 },

    #[error("Invalid snow threshold: {0} cm (must be positive)")]
    InvalidThreshold(f64),

    #[error("Invalid bin edges {0:?} (must be non-empty and strictly increasing)")]
    InvalidBins(Vec<f64>),

    #[error("No snow raster for year {year} at {path}")]
    RasterNotFound { year: i32, path: String },

    #[error("Year {0} is not present in the raster collection")]
    YearNotFound(i32),

    #[error("Year raster has {0} bands, at least 8 are needed to reach 24-26 December")]
    TooFewBands(usize),

    #[error("Grid shapes differ: {0:?} vs {1:?}")]
    ShapeMismatch((usize, usize), (usize, usize)),

    #[error("Input raster has invalid dimensions: {0}x{1}")]
    InvalidDimensions(usize, usize),

    #[error("Invalid compression type: {0}")]
    InvalidCompression(String),
}

pub type Result<T> = std::result::Result<T, WhiteXmasError>;
