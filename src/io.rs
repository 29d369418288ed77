use crate::crs::resolve_projection;
use crate::error::{Result, WhiteXmasError};
use crate::grid::{RasterMetadata, YearRaster};
use crate::layer::MapLayer;
use gdal::cpl::CslStringList;
use gdal::raster::{Buffer, RasterBand};
use gdal::{Dataset, DriverManager, Metadata};
use log::{debug, info};
use ndarray::Array3;
use std::path::Path;

pub const COMPRESSION_TYPES: [&str; 4] = ["DEFLATE", "LZW", "ZSTD", "NONE"];

/// Read a year's daily snow depth stack (one band per day).
///
/// Nodata and NaN cells come back as missing.
pub fn read_year_raster(path: &Path, year: i32) -> Result<YearRaster> {
    info!("Opening snow raster for {}: {}", year, path.display());
    let dataset = Dataset::open(path)?;

    let mut metadata = extract_metadata_from_dataset(&dataset)?;
    metadata.projection = resolve_projection(&metadata.projection)?;

    let band_count = dataset.raster_count();
    let (width, height) = (metadata.width, metadata.height);
    debug!(
        "Raster dimensions: {}x{}, {} bands",
        width, height, band_count
    );

    let mut cells: Vec<Option<f32>> = Vec::with_capacity(band_count * width * height);
    for band_index in 1..=band_count {
        let rasterband: RasterBand = dataset.rasterband(band_index)?;
        let nodata = rasterband.no_data_value();
        let buffer = rasterband.read_as::<f32>((0, 0), (width, height), (width, height), None)?;
        cells.extend(buffer.data().iter().map(|&v| to_cell(v, nodata)));
    }

    let bands = Array3::from_shape_vec((band_count, height, width), cells)?;
    YearRaster::new(year, bands, metadata)
}

fn to_cell(value: f32, nodata: Option<f64>) -> Option<f32> {
    if value.is_nan() {
        return None;
    }
    match nodata {
        Some(nd) if f64::from(value) == nd => None,
        _ => Some(value),
    }
}

/// Extract metadata from a dataset without reading all data
pub fn extract_metadata_from_dataset(dataset: &Dataset) -> Result<RasterMetadata> {
    let rasterband: RasterBand = dataset.rasterband(1)?;

    let width = rasterband.x_size();
    let height = rasterband.y_size();

    if width == 0 || height == 0 {
        return Err(WhiteXmasError::InvalidDimensions(width, height));
    }

    let geotransform = dataset.geo_transform()?;

    Ok(RasterMetadata {
        width,
        height,
        geotransform,
        projection: dataset.projection(),
        pixel_width: geotransform[1].abs(),
        pixel_height: geotransform[5].abs(),
    })
}

/// Validate compression type
pub fn validate_compression(compression: &str) -> Result<()> {
    if !COMPRESSION_TYPES.contains(&compression) {
        return Err(WhiteXmasError::InvalidCompression(compression.to_string()));
    }
    Ok(())
}

/// GTiff creation options for a compressed single-layer map.
pub fn create_dataset_options(compression: &str) -> Vec<String> {
    vec![
        format!("COMPRESS={}", compression),
        "TILED=YES".to_string(),
        "BIGTIFF=IF_SAFER".to_string(),
    ]
}

/// Write a map layer as a single-band float32 GeoTIFF, NaN marking missing cells.
///
/// The band description is the layer title; threshold, years, mode and legend
/// labels go into band metadata.
pub fn write_map_layer<T>(path: &Path, layer: &MapLayer<T>, compression: &str) -> Result<()>
where
    T: Copy + Into<f64>,
{
    validate_compression(compression)?;
    info!("Creating output raster: {}", path.display());

    let metadata = layer.grid.metadata();
    let (height, width) = layer.grid.dim();

    let mut gdal_options = CslStringList::new();
    for opt in create_dataset_options(compression) {
        gdal_options.add_string(&opt)?;
    }

    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let mut dataset = driver.create_with_band_type_with_options::<f32, _>(
        path,
        width,
        height,
        1,
        &gdal_options,
    )?;

    dataset.set_geo_transform(&metadata.geotransform)?;
    if !metadata.projection.is_empty() {
        dataset.set_projection(&metadata.projection)?;
    }

    let values: Vec<f32> = layer
        .grid
        .cells()
        .iter()
        .map(|cell| cell.map_or(f32::NAN, |v| Into::<f64>::into(v) as f32))
        .collect();
    let mut buffer = Buffer::new((width, height), values);

    let mut raster_band = dataset.rasterband(1)?;
    raster_band.write((0, 0), (width, height), &mut buffer)?;
    raster_band.set_no_data_value(Some(f64::NAN))?;
    raster_band.set_description(&layer.title)?;
    for (key, value) in layer.metadata_items() {
        raster_band.set_metadata_item(&key, &value, "")?;
    }

    info!("Wrote \"{}\" ({}x{}) to {}", layer.title, width, height, path.display());
    Ok(())
}
