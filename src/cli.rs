use crate::aggregate::XmasMode;
use crate::years::REFERENCE_PERIOD;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "white-xmas")]
#[command(about = "White Christmas maps from FMI daily snow depth rasters")]
#[command(version)]
pub struct Args {
    /// Directory holding snow_<year>.tif files
    #[arg(short, long, value_name = "DIR", global = true, default_value = ".")]
    pub data_dir: PathBuf,

    /// Snow depth in cm for a day to count as white
    #[arg(short, long, value_name = "CM", global = true, default_value_t = 1.0)]
    pub threshold: f64,

    /// How the three Christmas days are combined
    #[arg(short, long, value_enum, global = true, default_value_t = Mode::Average)]
    pub mode: Mode,

    /// Output compression (DEFLATE, LZW, ZSTD or NONE)
    #[arg(long, value_name = "TYPE", global = true, default_value = "DEFLATE")]
    pub compression: String,

    /// Number of threads for loading rasters (default: all available)
    #[arg(short = 'j', long, value_name = "N", global = true)]
    pub threads: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// White Christmas map for a single year
    Year {
        #[arg(short, long)]
        year: i32,

        /// Output GeoTIFF path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Number of white Christmases over a period
    Count {
        #[arg(short, long, default_value_t = REFERENCE_PERIOD.0)]
        start: i32,

        #[arg(short, long, default_value_t = REFERENCE_PERIOD.1)]
        end: i32,

        /// Output GeoTIFF path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// White Christmas probability classes over a period
    Probability {
        #[arg(short, long, default_value_t = REFERENCE_PERIOD.0)]
        start: i32,

        #[arg(short, long, default_value_t = REFERENCE_PERIOD.1)]
        end: i32,

        /// Output GeoTIFF path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// 24-26 December average depth
    Average,
    /// Every one of 24, 25 and 26 December
    AllDays,
}

impl From<Mode> for XmasMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Average => XmasMode::Average,
            Mode::AllDays => XmasMode::AllDays,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_defaults_to_reference_period() {
        let args = Args::parse_from(["white-xmas", "count", "-o", "out.tif"]);
        match args.command {
            Command::Count { start, end, .. } => assert_eq!((start, end), (1991, 2020)),
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(args.threshold, 1.0);
        assert_eq!(args.mode, Mode::Average);
        assert_eq!(args.compression, "DEFLATE");
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = Args::parse_from([
            "white-xmas", "year", "-y", "2010", "-o", "x.tif", "--mode", "all-days",
            "--threshold", "2.5",
        ]);
        assert_eq!(args.mode, Mode::AllDays);
        assert_eq!(args.threshold, 2.5);
        assert!(matches!(args.command, Command::Year { year: 2010, .. }));
    }

    #[test]
    fn test_no_option_to_skip_missing_years() {
        let parsed = Args::try_parse_from([
            "white-xmas", "count", "-o", "out.tif", "--tolerate-missing",
        ]);
        assert!(parsed.is_err());
    }
}
