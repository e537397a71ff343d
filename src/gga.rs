//! Decoder for the *GGA* (global positioning system fix data) sentence.

use chrono::NaiveTime;
use std::fmt;
use std::str::FromStr;

use crate::err::{CoordinateParseError, ParseError};
use crate::lexer::Fields;

pub const FIELD_COUNT: usize = 14;

const UTC: usize = 0;
const LAT: usize = 1;
const LAT_DIR: usize = 2;
const LONG: usize = 3;
const LONG_DIR: usize = 4;
const QUALITY: usize = 5;
const SAT_USED: usize = 6;
const HDOP: usize = 7;
const ALTITUDE: usize = 8;
const ALTITUDE_UNIT: usize = 9;
const GEO_SEP: usize = 10;
const GEO_SEP_UNIT: usize = 11;
const AGE: usize = 12;
const STATION_ID: usize = 13;

const ABS_MAX_LAT: f64 = 90.0;
const ABS_MAX_LONG: f64 = 180.0;
const MAX_STATION_ID: u16 = 1023;

/// The cardinal directions.
#[derive(Debug, Clone, Copy)]
enum CardDir {
    North,
    South,
    East,
    West,
}

impl CardDir {
    #[inline]
    fn get_sign(self) -> f64 {
        match self {
            CardDir::North | CardDir::East => 1.0,
            CardDir::South | CardDir::West => -1.0,
        }
    }
}

/// Quality of the position fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixQuality {
    NoFix,
    GpsFix,
    DifferentialGpsFix,
}

impl FixQuality {
    /// Map the numeric quality indicator. Codes other than `0..=2` are not
    /// supported and yield `None`.
    #[inline]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(FixQuality::NoFix),
            1 => Some(FixQuality::GpsFix),
            2 => Some(FixQuality::DifferentialGpsFix),
            _ => None,
        }
    }
}

impl fmt::Display for FixQuality {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            FixQuality::NoFix => "no fix",
            FixQuality::GpsFix => "GPS fix",
            FixQuality::DifferentialGpsFix => "DGPS fix",
        })
    }
}

/// Number of integer degree digits in front of the minutes of a coordinate.
///
/// Standard receivers send `ddmm.mmm` for latitude and `dddmm.mmm` for
/// longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateFormat {
    pub lat_degree_digits: usize,
    pub lon_degree_digits: usize,
}

impl Default for CoordinateFormat {
    fn default() -> Self {
        CoordinateFormat {
            lat_degree_digits: 2,
            lon_degree_digits: 3,
        }
    }
}

/// A decoded GGA sentence. Every field the receiver left empty is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct GgaSentence {
    /// Universal Time Coordinated (UTC)
    pub utc: Option<NaiveTime>,
    /// Latitude in decimal degrees.
    /// A positive value indicates that the coordinate is in the northern hemisphere.
    /// A negative value indicates that the coordinate is in the southern hemisphere.
    pub lat: Option<f64>,
    /// Longitude in decimal degrees.
    /// A positive value indicates that the coordinate is in the eastern hemisphere.
    /// A negative value indicates that the coordinate is in the western hemisphere.
    pub long: Option<f64>,
    /// Indicates the quality of the gps data.
    pub quality: Option<FixQuality>,
    /// Number of satellites used for the fix.
    pub sat_used: Option<u8>,
    /// Horizontal dilution of precision
    pub hdop: Option<f64>,
    /// Antenna Altitude above/below mean-sea-level (geoid) (in meters)
    pub altitude: Option<f64>,
    /// Geoidal separation, the difference between the WGS-84 earth ellipsoid
    /// and mean-sea-level (geoid), "-" means mean-sea-level below ellipsoid
    pub geo_sep: Option<f64>,
    /// Age of differential GPS data, time in seconds since last SC104 type
    /// 1 or 9 update, null field when DGPS is not used
    pub age: Option<f64>,
    /// Differential reference station ID, 0000-1023
    pub station_id: Option<u16>,
}

/// Decode the fields of a GGA sentence.
pub(crate) fn decode(fields: &Fields, format: CoordinateFormat) -> Result<GgaSentence, ParseError> {
    let utc = match fields.raw(UTC) {
        Some(raw) => Some(fl_to_utc(raw)?),
        None => None,
    };

    let lat_dir = match fields.raw(LAT_DIR) {
        Some("N") => Some(CardDir::North),
        Some("S") => Some(CardDir::South),
        Some(s) => return Err(ParseError::InvalidDir(s.to_owned())),
        None => None,
    };
    let lat = match (fields.raw(LAT), lat_dir) {
        (Some(lat), Some(d)) => Some(parse_coord(lat, d, format.lat_degree_digits, ABS_MAX_LAT)?),
        (_, _) => None,
    };

    let long_dir = match fields.raw(LONG_DIR) {
        Some("E") => Some(CardDir::East),
        Some("W") => Some(CardDir::West),
        Some(s) => return Err(ParseError::InvalidDir(s.to_owned())),
        None => None,
    };
    let long = match (fields.raw(LONG), long_dir) {
        (Some(long), Some(d)) => Some(parse_coord(long, d, format.lon_degree_digits, ABS_MAX_LONG)?),
        (_, _) => None,
    };

    let quality = accept!(fields, QUALITY => i64)?.and_then(FixQuality::from_code);
    let sat_used = accept!(fields, SAT_USED => u8)?;
    let hdop = accept!(fields, HDOP => f64)?;

    let altitude = accept!(fields, ALTITUDE => f64)?;
    expect_meters(fields, ALTITUDE_UNIT)?;
    let geo_sep = accept!(fields, GEO_SEP => f64)?;
    expect_meters(fields, GEO_SEP_UNIT)?;

    let age = match accept!(fields, AGE => f64)? {
        Some(a) if a < 0.0 => {
            return Err(ParseError::InvalidValue(
                "age of the data cannot be negative",
            ))
        }
        a => a,
    };

    let station_id = match accept!(fields, STATION_ID => u16)? {
        Some(i) if i > MAX_STATION_ID => {
            return Err(ParseError::InvalidValue(
                "station_id must be between 0 and 1023",
            ))
        }
        i => i,
    };

    Ok(GgaSentence {
        utc,
        lat,
        long,
        quality,
        sat_used,
        hdop,
        altitude,
        geo_sep,
        age,
        station_id,
    })
}

/// Parse `coord` as a f64 representing a coordinate.
/// `dir` will be converted to 1 or -1 to be multiplied with the degrees.
/// `deg_split` is the number of digits that make up the degrees.
/// `abs_max` is maximum value in degree, e.g. 180 for longitude.
fn parse_coord(
    coord: &str,
    dir: CardDir,
    deg_split: usize,
    abs_max: f64,
) -> Result<f64, CoordinateParseError> {
    let (deg, min) = match (coord.get(..deg_split), coord.get(deg_split..)) {
        (Some(deg), Some(min)) if !min.is_empty() => (deg, min),
        _ => {
            return Err(CoordinateParseError::InvalidInput(
                "the field is too short for a coordinate",
            ))
        }
    };
    if !deg.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoordinateParseError::InvalidInput(
            "degrees may only contain digits",
        ));
    }

    let degrees = f64::from(u16::from_str(deg)?);
    let minutes = f64::from_str(min)?;
    if !(minutes >= 0.0 && minutes < 60.0) {
        return Err(CoordinateParseError::InvalidInput(
            "minutes must be between 0 and 60",
        ));
    }

    let dec_deg = degrees + minutes / 60.0;
    if dec_deg > abs_max {
        return Err(CoordinateParseError::InvalidCoord(dec_deg, abs_max));
    }
    Ok(dec_deg * dir.get_sign())
}

/// Converts a time field to a time.
/// The input has to be in the format `hhmmss[.sss]`.
#[inline]
fn fl_to_utc(utc: &str) -> Result<NaiveTime, ParseError> {
    Ok(NaiveTime::parse_from_str(utc, "%H%M%S%.f")?)
}

/// Check that the unit field at `idx` is empty or `M`.
#[inline]
fn expect_meters(fields: &Fields, idx: usize) -> Result<(), ParseError> {
    match fields.raw(idx) {
        None | Some("M") => Ok(()),
        Some(unit) => Err(ParseError::InvalidUnit(unit.to_owned())),
    }
}
