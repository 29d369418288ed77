use ndarray::{arr2, Array2};
use white_xmas::aggregate::{classify_year, per_decade};
use white_xmas::{
    classify_probability, count_white_xmas, sum_all_white_xmas, sum_white_xmas,
    xmas_average_rasters, RasterCollection, WhiteXmasError, XmasMode, YearRaster,
};

fn is_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// A 2x2 year where 24, 25 and 26 December get the given grids and every
/// other day is deep snow.
fn year_raster(year: i32, xmas: [Array2<Option<f32>>; 3]) -> YearRaster {
    let n = if is_leap(year) { 366 } else { 365 };
    let mut days = vec![Array2::from_elem((2, 2), Some(50.0f32)); n];
    for (offset, grid) in [8, 7, 6].into_iter().zip(xmas) {
        days[n - offset] = grid;
    }
    YearRaster::from_days(year, &days).unwrap()
}

fn collection() -> RasterCollection {
    [
        (
            2018,
            year_raster(
                2018,
                [
                    arr2(&[[Some(2.0), Some(0.0)], [Some(0.0), Some(4.0)]]),
                    arr2(&[[Some(2.0), Some(5.0)], [Some(0.0), Some(4.0)]]),
                    arr2(&[[Some(2.0), Some(5.0)], [Some(0.0), Some(4.0)]]),
                ],
            ),
        ),
        (
            2019,
            year_raster(
                2019,
                [
                    arr2(&[[Some(3.0), Some(5.0)], [Some(0.0), Some(4.0)]]),
                    arr2(&[[Some(1.0), Some(5.0)], [Some(0.0), None]]),
                    arr2(&[[Some(1.0), Some(5.0)], [Some(0.0), Some(4.0)]]),
                ],
            ),
        ),
        (
            2020,
            year_raster(
                2020,
                [
                    arr2(&[[Some(1.0), Some(0.5)], [Some(0.0), Some(4.0)]]),
                    arr2(&[[Some(1.0), Some(2.0)], [Some(0.0), Some(4.0)]]),
                    arr2(&[[Some(1.0), Some(2.0)], [Some(0.0), Some(4.0)]]),
                ],
            ),
        ),
    ]
    .into_iter()
    .collect()
}

#[test]
fn all_days_count_over_three_years() {
    let count = sum_all_white_xmas(&collection(), 2018, 2020, 1.0).unwrap();
    assert_eq!(count.cells(), &arr2(&[[Some(3u32), Some(1)], [Some(0), None]]));
}

#[test]
fn average_count_over_three_years() {
    let rasters = collection();
    let averages = xmas_average_rasters(&rasters).unwrap();
    let count = sum_white_xmas(&averages, 2018, 2020, 1.0).unwrap();
    assert_eq!(count.cells(), &arr2(&[[Some(3u32), Some(3)], [Some(0), None]]));

    let direct = count_white_xmas(&rasters, 2018, 2020, 1.0, XmasMode::Average).unwrap();
    assert_eq!(direct, count);
}

#[test]
fn mode_dispatch_matches_all_days() {
    let rasters = collection();
    assert_eq!(
        count_white_xmas(&rasters, 2018, 2020, 1.0, XmasMode::AllDays).unwrap(),
        sum_all_white_xmas(&rasters, 2018, 2020, 1.0).unwrap()
    );
}

#[test]
fn single_year_classification() {
    let rasters = collection();
    let classes = classify_year(rasters.get(2020).unwrap(), 1.0, XmasMode::AllDays).unwrap();
    assert_eq!(classes.cells(), &arr2(&[[Some(1u8), Some(0)], [Some(0), Some(1)]]));
}

#[test]
fn higher_threshold_lowers_count() {
    let count = sum_all_white_xmas(&collection(), 2018, 2020, 3.0).unwrap();
    assert_eq!(count.cells(), &arr2(&[[Some(0u32), Some(1)], [Some(0), None]]));
}

#[test]
fn probability_from_short_period() {
    let count = sum_all_white_xmas(&collection(), 2018, 2020, 1.0).unwrap();
    let classes = classify_probability(&per_decade(&count, 3));
    assert_eq!(classes.cells(), &arr2(&[[Some(5u8), Some(0)], [Some(0), None]]));
}

#[test]
fn absent_year_fails_loudly() {
    assert!(matches!(
        sum_all_white_xmas(&collection(), 2017, 2020, 1.0),
        Err(WhiteXmasError::YearNotFound(2017))
    ));
}
