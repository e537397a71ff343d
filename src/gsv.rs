//! Decoder for the *GSV* (satellites in view) sentence.
//!
//! A receiver reports its visible satellites in a block of up to nine GSV
//! sentences with up to four satellites each.

use crate::err::ParseError;
use crate::lexer::Fields;
use crate::parser::TalkerId;

pub const FIELD_COUNT: usize = 20;

const TOTAL_MSGS: usize = 0;
const MSG_NUM: usize = 1;
const SATS_IN_VIEW: usize = 2;
const FIRST_SAT: usize = 3;
const GROUP_LEN: usize = 4;

/// Visibility of one satellite.
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteInfo {
    pub constellation: TalkerId,
    pub id: u16,
    /// Elevation above the horizon in degrees.
    pub elevation: Option<f64>,
    /// Azimuth relative to true north in degrees.
    pub azimuth: Option<f64>,
    /// Signal to noise ratio in dB, empty while the satellite is not tracked.
    pub snr: Option<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GsvSentence {
    /// Number of sentences in this block.
    pub total_msgs: u8,
    /// Sequence number of this sentence within the block, starting at 1.
    pub msg_num: u8,
    pub sats_in_view: Option<u16>,
    pub satellites: Vec<SatelliteInfo>,
    /// Signal id, only sent from NMEA 4.1 on.
    pub signal_id: Option<u8>,
}

impl GsvSentence {
    /// Whether this is the last sentence of its block.
    pub fn is_last(&self) -> bool {
        self.msg_num == self.total_msgs
    }
}

pub(crate) fn decode(fields: &Fields, talker: TalkerId) -> Result<GsvSentence, ParseError> {
    let total_msgs = expect!(fields, TOTAL_MSGS => u8)?;
    let msg_num = expect!(fields, MSG_NUM => u8)?;
    if msg_num == 0 || msg_num > total_msgs {
        return Err(ParseError::InvalidValue(
            "message number must be between 1 and the total number of messages",
        ));
    }
    let sats_in_view = accept!(fields, SATS_IN_VIEW => u16)?;

    // A single field after the last complete group is the signal id, two or
    // three are a group cut short.
    let remaining = fields.len().saturating_sub(FIRST_SAT);
    let (groups, signal_id) = match remaining % GROUP_LEN {
        0 => (remaining / GROUP_LEN, None),
        1 => {
            let idx = fields.len() - 1;
            let signal_id = match fields.raw(idx) {
                Some(raw) => Some(
                    u8::from_str_radix(raw, 16)
                        .map_err(|_| ParseError::InvalidField("SIGNAL_ID", raw.to_owned()))?,
                ),
                None => None,
            };
            (remaining / GROUP_LEN, signal_id)
        }
        _ => (remaining / GROUP_LEN + 1, None),
    };

    let mut satellites = Vec::with_capacity(groups);
    for group in 0..groups {
        let base = FIRST_SAT + group * GROUP_LEN;
        if let Some(sat) = decode_satellite(fields, base, talker)? {
            satellites.push(sat);
        }
    }

    Ok(GsvSentence {
        total_msgs,
        msg_num,
        sats_in_view,
        satellites,
        signal_id,
    })
}

/// Decode the group of four fields starting at `base`. A group without any
/// value yields `None`.
fn decode_satellite(
    fields: &Fields,
    base: usize,
    talker: TalkerId,
) -> Result<Option<SatelliteInfo>, ParseError> {
    if (base..base + GROUP_LEN).all(|idx| fields.raw(idx).is_none()) {
        return Ok(None);
    }

    Ok(Some(SatelliteInfo {
        constellation: talker,
        id: fields.expect(base, "ID")?,
        elevation: fields.accept(base + 1, "ELEVATION")?,
        azimuth: fields.accept(base + 2, "AZIMUTH")?,
        snr: fields.accept(base + 3, "SNR")?,
    }))
}
