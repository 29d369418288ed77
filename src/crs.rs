use crate::error::Result;
use gdal::spatial_ref::SpatialRef;
use log::{info, warn};

/// ETRS89 / TM35FIN, the grid of the FMI snow depth rasters.
pub const DEFAULT_EPSG: u32 = 3067;

/// True when the dataset carries no projection definition at all.
pub fn is_missing_projection(projection_wkt: &str) -> bool {
    projection_wkt.trim().is_empty()
}

/// Projection WKT to attach to a loaded raster.
///
/// Files with no or unparsable projection get EPSG:3067.
pub fn resolve_projection(projection_wkt: &str) -> Result<String> {
    if is_missing_projection(projection_wkt) {
        info!("No projection in raster, assigning EPSG:{}", DEFAULT_EPSG);
        return default_projection();
    }

    match SpatialRef::from_wkt(projection_wkt) {
        Ok(_) => Ok(projection_wkt.to_string()),
        Err(e) => {
            warn!(
                "Failed to parse projection WKT, assigning EPSG:{}: {}",
                DEFAULT_EPSG, e
            );
            default_projection()
        }
    }
}

fn default_projection() -> Result<String> {
    Ok(SpatialRef::from_epsg(DEFAULT_EPSG)?.to_wkt()?)
}
