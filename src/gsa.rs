//! Decoder for the *GSA* (DOP and active satellites) sentence.

use crate::err::ParseError;
use crate::lexer::Fields;

pub const FIELD_COUNT: usize = 18;

const MODE: usize = 0;
const FIX_TYPE: usize = 1;
const FIRST_ID: usize = 2;
const ID_SLOTS: usize = 12;
const PDOP: usize = 14;
const HDOP: usize = 15;
const VDOP: usize = 16;
// NMEA 4.1 and later
const SYSTEM_ID: usize = 17;

/// How the receiver chooses between 2D and 3D fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Manual,
    Automatic,
}

/// The fix type reported in a GSA sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixMode {
    NoFix,
    Fix2D,
    Fix3D,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GsaSentence {
    pub mode: Option<SelectionMode>,
    pub fix_type: Option<FixMode>,
    /// Ids of the satellites used for the fix, empty slots dropped.
    pub ids: Vec<u16>,
    /// Position dilution of precision (3D)
    pub pdop: Option<f64>,
    /// Horizontal dilution of precision (2D)
    pub hdop: Option<f64>,
    /// Vertical dilution of precision (1D)
    pub vdop: Option<f64>,
    pub system_id: Option<u8>,
}

pub(crate) fn decode(fields: &Fields) -> Result<GsaSentence, ParseError> {
    let mode = match fields.raw(MODE) {
        Some("M") => Some(SelectionMode::Manual),
        Some("A") => Some(SelectionMode::Automatic),
        Some(s) => return Err(ParseError::InvalidField("MODE", s.to_owned())),
        None => None,
    };

    let fix_type = match accept!(fields, FIX_TYPE => u8)? {
        Some(1) => Some(FixMode::NoFix),
        Some(2) => Some(FixMode::Fix2D),
        Some(3) => Some(FixMode::Fix3D),
        Some(_) => return Err(ParseError::InvalidValue("fix type must be 1, 2 or 3")),
        None => None,
    };

    let mut ids = Vec::with_capacity(ID_SLOTS);
    for idx in FIRST_ID..FIRST_ID + ID_SLOTS {
        if let Some(id) = fields.accept::<u16>(idx, "ID")? {
            ids.push(id);
        }
    }

    Ok(GsaSentence {
        mode,
        fix_type,
        ids,
        pdop: accept!(fields, PDOP => f64)?,
        hdop: accept!(fields, HDOP => f64)?,
        vdop: accept!(fields, VDOP => f64)?,
        system_id: accept!(fields, SYSTEM_ID => u8)?,
    })
}
