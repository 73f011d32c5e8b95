use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;

use brc::config::{self, Overrides};
use brc::pipeline::{self, DataSource};
use brc::profile::WallClock;

/// Single-pass min/mean/max aggregation over `<key>;<value>` files
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Aggregate min/mean/max per key over huge <key>;<value> files"
)]
struct Args {
    /// Input measurements file
    #[arg(default_value = "measurements.txt")]
    input: PathBuf,

    /// Read window size in bytes
    #[arg(long)]
    window_size: Option<usize>,

    /// Number of finalizer workers
    #[arg(long)]
    pool_size: Option<usize>,

    /// Stop after this many lines
    #[arg(long)]
    max_rows: Option<u64>,

    /// Format straight from the store, skipping the worker pool
    #[arg(long)]
    no_finalize: bool,

    /// Keep every raw value and recompute statistics from them
    #[arg(long)]
    retain_samples: bool,

    /// Cross-check running statistics against retained samples
    #[arg(long)]
    verify: bool,

    /// Snapshot cache file (enables the cache)
    #[arg(long, value_name = "PATH")]
    cache: Option<PathBuf>,

    /// Remove the cache file before running
    #[arg(long)]
    clear_cache: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            window_size: self.window_size,
            pool_size: self.pool_size,
            max_rows: self.max_rows,
            no_finalize: self.no_finalize,
            retain_samples: self.retain_samples,
            verify: self.verify,
            cache_path: self.cache.clone(),
            clear_cache: self.clear_cache,
        }
    }
}

fn main() -> Result<()> {
    // Writes to /tmp/brc-debug.log at DEBUG level
    #[cfg(debug_assertions)]
    {
        use std::io::Write;

        if let Ok(log_file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/brc-debug.log")
        {
            let _ = env_logger::Builder::new()
                .filter_level(log::LevelFilter::Debug)
                .target(env_logger::Target::Pipe(Box::new(log_file)))
                .format(|buf, record| {
                    use std::time::SystemTime;
                    let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
                    writeln!(
                        buf,
                        "[{}] [{}] {}",
                        datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                        record.level(),
                        record.args()
                    )
                })
                .try_init();
        }

        log::debug!("=== BRC DEBUG SESSION STARTED ===");
    }

    color_eyre::install()?;

    let args = Args::parse();

    let config_result = config::load_config();
    if let Some(warning) = &config_result.warning {
        eprintln!("Warning: {}", warning);
    }
    let config = config_result.config.with_overrides(args.overrides());

    let mut profiler = WallClock::new();
    let outcome = pipeline::run(&args.input, &config, &mut profiler)?;

    println!("{}", outcome.summary);

    if !outcome.mismatches.is_empty() {
        eprintln!(
            "Warning: {} keys disagree with their retained samples",
            outcome.mismatches.len()
        );
    }

    match (outcome.source, outcome.ingest) {
        (DataSource::Input, Some(stats)) => eprintln!(
            "Lines: {}, records: {}, skipped: {}",
            stats.lines, stats.records, stats.malformed
        ),
        _ => eprintln!(
            "Loaded {} keys ({} observations) from cache",
            outcome.keys, outcome.observations
        ),
    }
    eprintln!(
        "Pools: {}, Execution time: {:?}",
        config.finalize.pool_size, outcome.elapsed
    );

    #[cfg(debug_assertions)]
    log::debug!("=== BRC DEBUG SESSION ENDED ===");

    Ok(())
}
