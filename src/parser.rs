//! This module identifies the talker and type of an *NMEA 0183* sentence and
//! hands its fields to the matching decoder.
//!
//! Supported are the *GGA*, *GSA* and *GSV* sentences of the GPS, Galileo,
//! GLONASS and BeiDou constellations as well as combined (`GN`) receivers.
//! Anything else is skipped without error.

use std::fmt;

use crate::checksum;
use crate::err::ParseError;
use crate::gga::{self, CoordinateFormat, GgaSentence};
use crate::gsa::{self, GsaSentence};
use crate::gsv::{self, GsvSentence};
use crate::lexer::Tokenizer;

const TALKER_RANGE: std::ops::Range<usize> = 1..3;
const KIND_RANGE: std::ops::Range<usize> = 3..6;
const PREFIX_LENGTH: usize = 6;

/// The constellation a sentence originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TalkerId {
    Gps,
    Galileo,
    Glonass,
    BeiDou,
    /// Multi-constellation receivers (`GN`).
    Combined,
}

impl TalkerId {
    const COUNT: usize = 5;

    /// Look up the two letter talker code, e.g. `"GP"`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "GP" => Some(TalkerId::Gps),
            "GA" => Some(TalkerId::Galileo),
            "GL" => Some(TalkerId::Glonass),
            "BD" | "GB" => Some(TalkerId::BeiDou),
            "GN" => Some(TalkerId::Combined),
            _ => None,
        }
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            TalkerId::Gps => 0,
            TalkerId::Galileo => 1,
            TalkerId::Glonass => 2,
            TalkerId::BeiDou => 3,
            TalkerId::Combined => 4,
        }
    }
}

impl fmt::Display for TalkerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            TalkerId::Gps => "GPS",
            TalkerId::Galileo => "Galileo",
            TalkerId::Glonass => "GLONASS",
            TalkerId::BeiDou => "BeiDou",
            TalkerId::Combined => "GNSS",
        })
    }
}

/// The supported sentence types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceKind {
    Gga,
    Gsa,
    Gsv,
}

impl SentenceKind {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "GGA" => Some(SentenceKind::Gga),
            "GSA" => Some(SentenceKind::Gsa),
            "GSV" => Some(SentenceKind::Gsv),
            _ => None,
        }
    }

    /// The most fields a sentence of this kind may carry.
    pub fn max_fields(self) -> usize {
        match self {
            SentenceKind::Gga => gga::FIELD_COUNT,
            SentenceKind::Gsa => gsa::FIELD_COUNT,
            SentenceKind::Gsv => gsv::FIELD_COUNT,
        }
    }
}

/// A decoded sentence.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    PositionFix(GgaSentence),
    ActiveSatellites(GsaSentence),
    SatellitesInView(GsvSentence),
}

impl Message {
    pub fn kind(&self) -> SentenceKind {
        match self {
            Message::PositionFix(_) => SentenceKind::Gga,
            Message::ActiveSatellites(_) => SentenceKind::Gsa,
            Message::SatellitesInView(_) => SentenceKind::Gsv,
        }
    }
}

/// A decoded sentence together with its talker.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub talker: TalkerId,
    pub message: Message,
}

/// Parser for single lines of `NMEA 0183` input.
#[derive(Debug, Clone)]
pub struct SentenceParser {
    formats: [CoordinateFormat; TalkerId::COUNT],
}

impl Default for SentenceParser {
    fn default() -> Self {
        SentenceParser {
            formats: [CoordinateFormat::default(); TalkerId::COUNT],
        }
    }
}

impl SentenceParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `format` for the GGA coordinates of `talker`.
    pub fn with_coordinate_format(mut self, talker: TalkerId, format: CoordinateFormat) -> Self {
        self.formats[talker.index()] = format;
        self
    }

    pub fn coordinate_format(&self, talker: TalkerId) -> CoordinateFormat {
        self.formats[talker.index()]
    }

    /// Parse one line.
    ///
    /// The checksum is verified before anything else. Returns `Ok(None)` if
    /// the talker or the sentence type is not supported.
    pub fn parse_line(&self, line: &str) -> Result<Option<Sentence>, ParseError> {
        checksum::validate(line)?;

        let talker = match line.get(TALKER_RANGE).and_then(TalkerId::from_code) {
            Some(t) => t,
            None => {
                debug!("skipping sentence with unsupported talker: {}", line);
                return Ok(None);
            }
        };
        let kind = match line.get(KIND_RANGE).and_then(SentenceKind::from_code) {
            Some(k) => k,
            None => {
                debug!("skipping unsupported sentence type: {}", line);
                return Ok(None);
            }
        };

        match line.as_bytes().get(PREFIX_LENGTH) {
            Some(b',') => (),
            Some(&c) => return Err(ParseError::UnexpectedToken(c as char)),
            None => return Err(ParseError::MissingField("sentence body")),
        }

        let fields = Tokenizer::new(&line[PREFIX_LENGTH + 1..]).fields(kind.max_fields())?;
        let message = match kind {
            SentenceKind::Gga => {
                Message::PositionFix(gga::decode(&fields, self.coordinate_format(talker))?)
            }
            SentenceKind::Gsa => Message::ActiveSatellites(gsa::decode(&fields)?),
            SentenceKind::Gsv => Message::SatellitesInView(gsv::decode(&fields, talker)?),
        };

        Ok(Some(Sentence { talker, message }))
    }
}
