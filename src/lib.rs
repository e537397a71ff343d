//! Parser for the *GGA*, *GSA* and *GSV* sentences of the *NMEA 0183*
//! protocol that folds them into one [`FixRecord`] per position update.
//!
//! ```
//! use nmea_fix::{FixRecord, IterSource, Pipeline};
//!
//! let lines = vec![
//!     "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47",
//!     "$GPGGA,123520,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*4D",
//! ];
//! let mut pipeline = Pipeline::new(IterSource::new(lines.into_iter()));
//! pipeline.add_observer(|record: &FixRecord| println!("{}", record));
//! let stats = pipeline.run().unwrap();
//! assert_eq!(stats.records_emitted, 1);
//! ```

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
#[macro_use]
extern crate log;
#[macro_use]
extern crate quick_error;

pub mod err;
#[macro_use]
mod macros;
pub mod aggregator;
pub mod checksum;
pub mod gga;
pub mod gsa;
pub mod gsv;
mod lexer;
pub mod parser;
pub mod pipeline;
pub mod source;

pub use aggregator::{Aggregator, FixRecord, PositionUpdateListener};
pub use err::{ChecksumError, CoordinateParseError, LexError, ParseError};
pub use gga::{CoordinateFormat, FixQuality, GgaSentence};
pub use gsa::{FixMode, GsaSentence, SelectionMode};
pub use gsv::{GsvSentence, SatelliteInfo};
pub use parser::{Message, Sentence, SentenceKind, SentenceParser, TalkerId};
pub use pipeline::{Pipeline, PipelineStats, PipelineWorker, StopHandle};
pub use source::{IterSource, LineSource, PacedSource, ReaderSource, ReplayConfig};
