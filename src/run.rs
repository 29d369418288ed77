use crate::aggregate::{classify_year, count_white_xmas, per_decade, XmasMode};
use crate::classify::classify_probability;
use crate::cli::{Args, Command};
use crate::error::{Result, WhiteXmasError};
use crate::io::{validate_compression, write_map_layer};
use crate::layer::MapLayer;
use crate::store::RasterStore;
use crate::years::{RasterCollection, YearRange, LAST_KNOWN_YEAR};
use log::{info, warn};

/// Execute the parsed command against `store`, writing the resulting map.
///
/// Periods are read strictly: counting needs every year of the range, so
/// a year without a raster stops the command.
pub fn run<S: RasterStore>(args: &Args, store: &S) -> Result<()> {
    // Fail on bad options before touching any raster
    if !args.threshold.is_finite() || args.threshold <= 0.0 {
        return Err(WhiteXmasError::InvalidThreshold(args.threshold));
    }
    validate_compression(&args.compression)?;

    let mode = XmasMode::from(args.mode);
    info!("Threshold {} cm, mode {}", args.threshold, mode.as_str());

    match &args.command {
        Command::Year { year, output } => {
            let range = YearRange::new(*year, *year)?;
            warn_past_known(range);

            let raster = store.load(*year)?;
            let classes = classify_year(&raster, args.threshold, mode)?;
            let layer = MapLayer::white_christmas(*year, args.threshold, mode, classes);
            write_map_layer(output, &layer, &args.compression)?;
        }
        Command::Count { start, end, output } => {
            let range = YearRange::new(*start, *end)?;
            let rasters = load_period(store, range)?;
            let count = count_white_xmas(&rasters, *start, *end, args.threshold, mode)?;
            let layer = MapLayer::count(range, args.threshold, mode, count);
            write_map_layer(output, &layer, &args.compression)?;
        }
        Command::Probability { start, end, output } => {
            let range = YearRange::new(*start, *end)?;
            if range.year_count() % 10 != 0 {
                warn!(
                    "{}-year period is not a multiple of ten, probabilities are rescaled",
                    range.year_count()
                );
            }

            let rasters = load_period(store, range)?;
            let count = count_white_xmas(&rasters, *start, *end, args.threshold, mode)?;
            let classes = classify_probability(&per_decade(&count, range.year_count()));
            let layer = MapLayer::probability(range, args.threshold, mode, classes);
            write_map_layer(output, &layer, &args.compression)?;
        }
    }

    Ok(())
}

fn load_period<S: RasterStore>(store: &S, range: YearRange) -> Result<RasterCollection> {
    warn_past_known(range);
    store.load_range(range.start(), range.end(), false)
}

fn warn_past_known(range: YearRange) {
    if range.end() > LAST_KNOWN_YEAR {
        warn!(
            "Requested years up to {}, data is known to exist until {}",
            range.end(),
            LAST_KNOWN_YEAR
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::YearRaster;
    use clap::Parser;
    use ndarray::Array2;

    /// Every year has a raster except 2001.
    struct GapStore;

    impl RasterStore for GapStore {
        fn load(&self, year: i32) -> Result<YearRaster> {
            if year == 2001 {
                return Err(WhiteXmasError::RasterNotFound {
                    year,
                    path: format!("snow_{}.tif", year),
                });
            }
            let days: [Array2<Option<f32>>; 8] =
                std::array::from_fn(|_| Array2::from_elem((1, 1), Some(5.0)));
            YearRaster::from_days(year, &days)
        }
    }

    fn parse(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("white-xmas").chain(argv.iter().copied()))
    }

    #[test]
    fn test_count_with_gap_fails() {
        let args = parse(&["count", "-s", "2000", "-e", "2002", "-o", "count.tif"]);
        assert!(matches!(
            run(&args, &GapStore),
            Err(WhiteXmasError::RasterNotFound { year: 2001, .. })
        ));
    }

    #[test]
    fn test_probability_with_gap_fails() {
        let args = parse(&["probability", "-s", "1995", "-e", "2004", "-o", "p.tif"]);
        assert!(matches!(
            run(&args, &GapStore),
            Err(WhiteXmasError::RasterNotFound { year: 2001, .. })
        ));
    }

    #[test]
    fn test_year_with_missing_raster_fails() {
        let args = parse(&["year", "-y", "2001", "-o", "y.tif"]);
        assert!(matches!(
            run(&args, &GapStore),
            Err(WhiteXmasError::RasterNotFound { year: 2001, .. })
        ));
    }

    #[test]
    fn test_bad_options_rejected_first() {
        let args = parse(&["count", "-o", "c.tif", "--threshold", "0"]);
        assert!(matches!(
            run(&args, &GapStore),
            Err(WhiteXmasError::InvalidThreshold(_))
        ));

        let args = parse(&["count", "-o", "c.tif", "--compression", "JPEG"]);
        assert!(matches!(
            run(&args, &GapStore),
            Err(WhiteXmasError::InvalidCompression(_))
        ));
    }

    #[test]
    fn test_range_checked_before_loading() {
        let args = parse(&["count", "-s", "1950", "-e", "1960", "-o", "c.tif"]);
        assert!(matches!(
            run(&args, &GapStore),
            Err(WhiteXmasError::InvalidRange { .. })
        ));
    }
}
