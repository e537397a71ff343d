//! Line sources feeding the pipeline.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::thread;
use std::time::Duration;

/// Produces the input one line at a time. `Ok(None)` signals the regular end
/// of the input.
pub trait LineSource {
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

impl<'a, S: LineSource + ?Sized> LineSource for &'a mut S {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        (**self).next_line()
    }
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        (**self).next_line()
    }
}

/// Reads lines from any buffered reader, stripping the line ending.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD, so a noisy line
/// fails validation later instead of ending the input.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        ReaderSource {
            reader,
            buf: Vec::new(),
        }
    }
}

impl ReaderSource<BufReader<File>> {
    /// Open the NMEA log at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(ReaderSource::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        while self.buf.last().map_or(false, |&b| b == b'\n' || b == b'\r') {
            self.buf.pop();
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

/// Adapts an iterator of lines.
#[derive(Debug)]
pub struct IterSource<I> {
    lines: I,
}

impl<I> IterSource<I> {
    pub fn new(lines: I) -> Self {
        IterSource { lines }
    }
}

impl<I, T> LineSource for IterSource<I>
where
    I: Iterator<Item = T>,
    T: Into<String>,
{
    fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.next().map(Into::into))
    }
}

/// Pacing of a replayed log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Pause after every line containing `marker`.
    pub delay: Duration,
    /// Substring marking the start of an update cycle.
    pub marker: String,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        ReplayConfig {
            delay: Duration::from_millis(1000),
            marker: "GGA".to_owned(),
        }
    }
}

/// Replays a recorded log in (simulated) real time by sleeping after every
/// line that contains the configured marker.
#[derive(Debug)]
pub struct PacedSource<S> {
    inner: S,
    config: ReplayConfig,
}

impl<S: LineSource> PacedSource<S> {
    pub fn new(inner: S, config: ReplayConfig) -> Self {
        PacedSource { inner, config }
    }
}

impl<S: LineSource> LineSource for PacedSource<S> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let line = self.inner.next_line()?;
        if let Some(ref l) = line {
            if !self.config.marker.is_empty() && l.contains(self.config.marker.as_str()) {
                thread::sleep(self.config.delay);
            }
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::time::Instant;

    fn drain<S: LineSource>(mut source: S) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = source.next_line().unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn reader_strips_line_endings() {
        let input = Cursor::new("$GPGGA,1*00\r\n\n$GPGSA,2*00\nlast");
        assert_eq!(
            drain(ReaderSource::new(input)),
            vec!["$GPGGA,1*00", "", "$GPGSA,2*00", "last"]
        );
    }

    #[test]
    fn reader_replaces_invalid_utf8() {
        let input = Cursor::new(b"$GPGGA,1*00\r\n\xff\xfe noise\r\n$GPGGA,2*00\r\n".to_vec());
        assert_eq!(
            drain(ReaderSource::new(input)),
            vec!["$GPGGA,1*00", "\u{fffd}\u{fffd} noise", "$GPGGA,2*00"]
        );
    }

    #[test]
    fn iter_source_ends_cleanly() {
        let mut source = IterSource::new(vec!["a", "b"].into_iter());
        assert_eq!(source.next_line().unwrap(), Some("a".to_owned()));
        assert_eq!(source.next_line().unwrap(), Some("b".to_owned()));
        assert_eq!(source.next_line().unwrap(), None);
        assert_eq!(source.next_line().unwrap(), None);
    }

    #[test]
    fn paced_source_sleeps_on_marker() {
        let config = ReplayConfig {
            delay: Duration::from_millis(30),
            marker: "GGA".to_owned(),
        };
        let lines = vec!["$GPGGA", "$GPGSA", "$GPGSV", "$GPGGA"];
        let start = Instant::now();
        let replayed = drain(PacedSource::new(IterSource::new(lines.clone().into_iter()), config));
        assert!(start.elapsed() >= Duration::from_millis(60));
        assert_eq!(replayed, lines);
    }

    #[test]
    fn replay_defaults() {
        let config = ReplayConfig::default();
        assert_eq!(config.delay, Duration::from_millis(1000));
        assert_eq!(config.marker, "GGA");
    }
}
