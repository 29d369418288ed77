use clap::Parser;
use env_logger::Env;
use log::info;
use white_xmas::cli::Args;
use white_xmas::error::Result;
use white_xmas::run::run;
use white_xmas::store::GdalRasterStore;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logger
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    info!("=== White Christmas ===");

    if let Some(n_threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .build_global()?;
        info!("Using {} threads", n_threads);
    }

    let store = GdalRasterStore::new(&args.data_dir);
    info!("Reading snow rasters from {}", store.dir().display());
    run(&args, &store)?;

    info!("=== Done! ===");
    Ok(())
}
