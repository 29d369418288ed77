//! Map layers handed to renderers: a finished grid plus everything needed to
//! title it and draw its legend without re-deriving the classification.

use crate::aggregate::XmasMode;
use crate::classify::{NO_SNOW, PROBABILITY_LABELS, WHITE};
use crate::grid::{ClassGrid, CountGrid, Grid};
use crate::years::YearRange;

#[derive(Debug, Clone)]
pub struct MapLayer<T> {
    pub title: String,
    /// Class code and label, empty for continuous layers.
    pub legend: Vec<(u8, String)>,
    pub threshold: f64,
    pub mode: XmasMode,
    pub start_year: i32,
    pub end_year: i32,
    pub grid: Grid<T>,
}

impl MapLayer<u8> {
    /// White / no-snow map for a single year.
    pub fn white_christmas(year: i32, threshold: f64, mode: XmasMode, grid: ClassGrid) -> Self {
        Self {
            title: format!("White Christmas {}", year),
            legend: vec![
                (NO_SNOW, "No snow".to_string()),
                (WHITE, format!("Snow present (at least {} cm)", threshold)),
            ],
            threshold,
            mode,
            start_year: year,
            end_year: year,
            grid,
        }
    }

    pub fn probability(range: YearRange, threshold: f64, mode: XmasMode, grid: ClassGrid) -> Self {
        Self {
            title: format!(
                "Probability of White Christmas {}-{}",
                range.start(),
                range.end()
            ),
            legend: PROBABILITY_LABELS
                .iter()
                .enumerate()
                .map(|(class, label)| (class as u8, label.to_string()))
                .collect(),
            threshold,
            mode,
            start_year: range.start(),
            end_year: range.end(),
            grid,
        }
    }
}

impl MapLayer<u32> {
    pub fn count(range: YearRange, threshold: f64, mode: XmasMode, grid: CountGrid) -> Self {
        Self {
            title: format!("White Christmas count {}-{}", range.start(), range.end()),
            legend: Vec::new(),
            threshold,
            mode,
            start_year: range.start(),
            end_year: range.end(),
            grid,
        }
    }
}

impl<T> MapLayer<T> {
    /// Key/value pairs describing the layer, as stored in GeoTIFF band metadata.
    pub fn metadata_items(&self) -> Vec<(String, String)> {
        let mut items = vec![
            ("THRESHOLD_CM".to_string(), self.threshold.to_string()),
            ("START_YEAR".to_string(), self.start_year.to_string()),
            ("END_YEAR".to_string(), self.end_year.to_string()),
            ("MODE".to_string(), self.mode.as_str().to_string()),
        ];
        items.extend(
            self.legend
                .iter()
                .map(|(class, label)| (format!("CLASS_{}", class), label.clone())),
        );
        items
    }
}
