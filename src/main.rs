#[macro_use]
extern crate log;

use clap::Parser;
use env_logger::{Builder, Target};

use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use nmea_fix::{FixRecord, LineSource, PacedSource, Pipeline, ReaderSource, ReplayConfig};

/// Replay an NMEA 0183 log and print one line per completed position fix.
#[derive(Debug, Parser)]
#[command(name = "nmea-fix", version, about)]
struct Cli {
    /// NMEA log to replay. Reads stdin if omitted.
    file: Option<PathBuf>,

    /// Replay in real time, pausing after every line containing the marker.
    #[arg(long)]
    realtime: bool,

    /// Pause after each marker line, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    delay_ms: u64,

    /// Substring marking the start of an update cycle.
    #[arg(long, default_value = "GGA")]
    marker: String,
}

impl Cli {
    fn replay_config(&self) -> ReplayConfig {
        ReplayConfig {
            delay: Duration::from_millis(self.delay_ms),
            marker: self.marker.clone(),
        }
    }
}

fn run(cli: &Cli) -> io::Result<()> {
    let mut source: Box<dyn LineSource + Send> = match cli.file {
        Some(ref path) => Box::new(ReaderSource::open(path)?),
        None => Box::new(ReaderSource::new(BufReader::new(io::stdin()))),
    };
    if cli.realtime {
        source = Box::new(PacedSource::new(source, cli.replay_config()));
    }

    let mut pipeline = Pipeline::new(source);
    pipeline.add_observer(|record: &FixRecord| println!("{}", record));

    let stats = pipeline.run()?;
    info!(
        "{} lines, {} sentences, {} skipped, {} checksum errors, {} decode errors, {} fixes",
        stats.lines,
        stats.sentences,
        stats.skipped,
        stats.checksum_errors,
        stats.decode_errors,
        stats.records_emitted,
    );
    Ok(())
}

fn main() {
    let mut builder = Builder::from_default_env();
    builder.target(Target::Stderr).format_timestamp_secs().init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!("{}", e);
        process::exit(1);
    }
}
