//! Drives lines from a [`LineSource`] through parsing and aggregation.
//!
//! Per-line failures never end the pipeline. The offending sentence is logged
//! and dropped, and processing continues with the next line.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crate::aggregator::{Aggregator, PositionUpdateListener};
use crate::err::ParseError;
use crate::parser::SentenceParser;
use crate::source::LineSource;

/// Counters describing one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Lines read from the source.
    pub lines: usize,
    /// Sentences decoded and applied to the aggregator.
    pub sentences: usize,
    /// Blank lines, non-sentences and unsupported talkers or types.
    pub skipped: usize,
    pub checksum_errors: usize,
    pub decode_errors: usize,
    pub records_emitted: usize,
}

/// Requests a running pipeline to stop before its next line.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct Pipeline<S> {
    source: S,
    parser: SentenceParser,
    aggregator: Aggregator,
    stop: StopHandle,
    stats: PipelineStats,
}

impl<S: LineSource> Pipeline<S> {
    pub fn new(source: S) -> Self {
        Self::with_parser(source, SentenceParser::new())
    }

    pub fn with_parser(source: S, parser: SentenceParser) -> Self {
        Pipeline {
            source,
            parser,
            aggregator: Aggregator::new(),
            stop: StopHandle::default(),
            stats: PipelineStats::default(),
        }
    }

    /// Register a listener for completed records.
    pub fn add_observer<L>(&mut self, listener: L)
    where
        L: PositionUpdateListener + Send + 'static,
    {
        self.aggregator.add_observer(listener);
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Process a single line. Lines that are not `$` sentences are ignored.
    pub fn process_line(&mut self, line: &str) {
        self.stats.lines += 1;

        let line = line.trim();
        if !line.starts_with('$') {
            self.stats.skipped += 1;
            return;
        }

        match self.parser.parse_line(line) {
            Ok(Some(sentence)) => {
                self.stats.sentences += 1;
                if self.aggregator.apply(&sentence) {
                    self.stats.records_emitted += 1;
                }
            }
            Ok(None) => self.stats.skipped += 1,
            Err(ParseError::Checksum(e)) => {
                warn!("discarding \"{}\": {}", line, e);
                self.stats.checksum_errors += 1;
            }
            Err(e) => {
                warn!("could not decode \"{}\": {}", line, e);
                self.stats.decode_errors += 1;
            }
        }
    }

    /// Drain the source until it is exhausted or the pipeline is stopped.
    ///
    /// A line read while a stop was requested, e.g. during the pause of a
    /// [`PacedSource`](crate::source::PacedSource), is not processed. The
    /// record still open at that point is discarded. Only I/O errors of the
    /// source end the run with an error.
    pub fn run(mut self) -> io::Result<PipelineStats> {
        loop {
            if self.stop.is_stopped() {
                info!("pipeline stopped after {} lines", self.stats.lines);
                break;
            }
            match self.source.next_line()? {
                Some(_) if self.stop.is_stopped() => {
                    info!("pipeline stopped after {} lines", self.stats.lines);
                    break;
                }
                Some(line) => self.process_line(&line),
                None => {
                    info!("finished parsing {} lines", self.stats.lines);
                    break;
                }
            }
        }
        Ok(self.stats)
    }
}

impl<S: LineSource + Send + 'static> Pipeline<S> {
    /// Run the pipeline on a dedicated thread.
    pub fn spawn(self) -> io::Result<PipelineWorker> {
        let stop = self.stop_handle();
        let handle = thread::Builder::new()
            .name("nmea-pipeline".to_owned())
            .spawn(move || self.run())?;
        Ok(PipelineWorker { stop, handle })
    }
}

/// A pipeline running on its own thread.
#[derive(Debug)]
pub struct PipelineWorker {
    stop: StopHandle,
    handle: thread::JoinHandle<io::Result<PipelineStats>>,
}

impl PipelineWorker {
    /// Stop after the line currently being processed.
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Wait for the pipeline to finish.
    pub fn join(self) -> io::Result<PipelineStats> {
        self.handle
            .join()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "pipeline thread panicked"))?
    }
}
