//! Folds decoded sentences into one [`FixRecord`] per update cycle.
//!
//! A GGA sentence opens a cycle. The GSA and GSV sentences that follow it
//! enrich the open record until the next GGA sentence arrives. At that
//! point the completed record is handed to every listener before a fresh
//! one is opened.

use chrono::NaiveTime;
use std::fmt;
use std::mem;

use crate::gga::{FixQuality, GgaSentence};
use crate::gsa::GsaSentence;
use crate::gsv::{GsvSentence, SatelliteInfo};
use crate::parser::{Message, Sentence};

/// Everything known about one update cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixRecord {
    pub time: Option<NaiveTime>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    /// Satellites in view, as reported by the GSV block.
    pub satellite_count: Option<u16>,
    pub pdop: Option<f64>,
    pub hdop: Option<f64>,
    pub vdop: Option<f64>,
    pub quality: Option<FixQuality>,
    /// Satellites of every GSV sentence of the cycle, in arrival order.
    pub satellites: Vec<SatelliteInfo>,
}

impl FixRecord {
    fn from_position_fix(gga: &GgaSentence) -> Self {
        FixRecord {
            time: gga.utc,
            latitude: gga.lat,
            longitude: gga.long,
            altitude: gga.altitude,
            quality: gga.quality,
            ..FixRecord::default()
        }
    }

    fn merge_active_satellites(&mut self, gsa: &GsaSentence) {
        if gsa.pdop.is_some() {
            self.pdop = gsa.pdop;
        }
        if gsa.hdop.is_some() {
            self.hdop = gsa.hdop;
        }
        if gsa.vdop.is_some() {
            self.vdop = gsa.vdop;
        }
    }

    fn merge_satellites_in_view(&mut self, gsv: &GsvSentence) {
        if gsv.sats_in_view.is_some() {
            self.satellite_count = gsv.sats_in_view;
        }
        self.satellites.extend(gsv.satellites.iter().cloned());
    }
}

struct Opt<'a, T>(&'a Option<T>);

impl<'a, T: fmt::Display> fmt::Display for Opt<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(v) => fmt::Display::fmt(v, f),
            None => f.write_str("-"),
        }
    }
}

impl fmt::Display for FixRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} lat={} lon={} alt={} quality={} sats={} pdop={} hdop={} vdop={} visible={}",
            Opt(&self.time),
            Opt(&self.latitude.map(|v| format!("{:.6}", v))),
            Opt(&self.longitude.map(|v| format!("{:.6}", v))),
            Opt(&self.altitude),
            Opt(&self.quality),
            Opt(&self.satellite_count),
            Opt(&self.pdop),
            Opt(&self.hdop),
            Opt(&self.vdop),
            self.satellites.len(),
        )
    }
}

/// Receives every completed [`FixRecord`].
pub trait PositionUpdateListener {
    fn update(&mut self, record: &FixRecord);
}

impl<F> PositionUpdateListener for F
where
    F: FnMut(&FixRecord),
{
    fn update(&mut self, record: &FixRecord) {
        self(record)
    }
}

#[derive(Debug)]
enum State {
    /// No GGA sentence seen yet.
    Idle,
    Accumulating(FixRecord),
}

/// The aggregation state machine. It expects a single sequential feed.
pub struct Aggregator {
    state: State,
    listeners: Vec<Box<dyn PositionUpdateListener + Send>>,
    emitted: usize,
}

impl fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Aggregator")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .field("emitted", &self.emitted)
            .finish()
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Aggregator {
            state: State::Idle,
            listeners: Vec::new(),
            emitted: 0,
        }
    }
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Listeners are notified in registration order.
    pub fn add_observer<L>(&mut self, listener: L)
    where
        L: PositionUpdateListener + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// The record of the currently open cycle, if any.
    pub fn current(&self) -> Option<&FixRecord> {
        match self.state {
            State::Idle => None,
            State::Accumulating(ref record) => Some(record),
        }
    }

    /// Number of records handed to the listeners so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Apply one decoded sentence. Returns `true` if a record was emitted.
    pub fn apply(&mut self, sentence: &Sentence) -> bool {
        match sentence.message {
            Message::PositionFix(ref gga) => self.on_position_fix(gga),
            Message::ActiveSatellites(ref gsa) => {
                match self.state {
                    State::Accumulating(ref mut record) => record.merge_active_satellites(gsa),
                    State::Idle => trace!("discarding GSA before the first GGA"),
                }
                false
            }
            Message::SatellitesInView(ref gsv) => {
                match self.state {
                    State::Accumulating(ref mut record) => {
                        record.merge_satellites_in_view(gsv);
                        if gsv.is_last() {
                            trace!(
                                "{} GSV block complete, {} satellites collected",
                                sentence.talker,
                                record.satellites.len()
                            );
                        }
                    }
                    State::Idle => trace!("discarding GSV before the first GGA"),
                }
                false
            }
        }
    }

    /// Emit the open record, then start a new one from `gga`.
    fn on_position_fix(&mut self, gga: &GgaSentence) -> bool {
        let next = State::Accumulating(FixRecord::from_position_fix(gga));
        match mem::replace(&mut self.state, next) {
            State::Accumulating(done) => {
                self.notify(&done);
                true
            }
            State::Idle => false,
        }
    }

    fn notify(&mut self, record: &FixRecord) {
        trace!("emitting record: {}", record);
        for listener in self.listeners.iter_mut() {
            listener.update(record);
        }
        self.emitted += 1;
    }
}
