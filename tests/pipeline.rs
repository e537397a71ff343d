extern crate nmea_fix;

use std::io::Cursor;
use std::sync::{mpsc, Arc, Mutex};

use nmea_fix::checksum::frame;
use nmea_fix::{
    FixQuality, FixRecord, IterSource, Pipeline, PositionUpdateListener, ReaderSource, TalkerId,
};

const GGA_1: &str = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";
const GGA_2: &str = "$GPGGA,123520,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*4D";

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<FixRecord>>>);

impl PositionUpdateListener for Recorder {
    fn update(&mut self, record: &FixRecord) {
        self.0.lock().unwrap().push(record.clone());
    }
}

impl Recorder {
    fn records(&self) -> Vec<FixRecord> {
        self.0.lock().unwrap().clone()
    }
}

fn replay(lines: Vec<String>) -> (Vec<FixRecord>, nmea_fix::PipelineStats) {
    let recorder = Recorder::default();
    let mut pipeline = Pipeline::new(IterSource::new(lines.into_iter()));
    pipeline.add_observer(recorder.clone());
    let stats = pipeline.run().unwrap();
    (recorder.records(), stats)
}

#[test]
fn one_record_per_completed_cycle() {
    let lines = vec![
        GGA_1.to_owned(),
        frame("GPGSA,A,3,01,02,12,14,15,,,,,,,,2.5,1.3,2.1"),
        frame("GPGSV,2,1,07,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45"),
        frame("GPGSV,2,2,07,15,10,120,,17,05,033,,21,71,070,20"),
        GGA_2.to_owned(),
    ];
    let (records, stats) = replay(lines);

    assert_eq!(records.len(), 1);
    assert_eq!(stats.records_emitted, 1);
    assert_eq!(stats.sentences, 5);

    let record = &records[0];
    assert!((record.latitude.unwrap() - 48.1173).abs() < 1e-4);
    assert!((record.longitude.unwrap() - 11.5167).abs() < 1e-4);
    assert_eq!(record.altitude, Some(545.4));
    assert_eq!(record.quality, Some(FixQuality::GpsFix));
    assert_eq!(record.satellite_count, Some(7));
    assert_eq!((record.pdop, record.hdop, record.vdop), (Some(2.5), Some(1.3), Some(2.1)));
    assert_eq!(record.satellites.len(), 7);
    assert!(record.satellites.iter().all(|s| s.constellation == TalkerId::Gps));
}

#[test]
fn broken_checksum_between_fixes() {
    let lines = vec![
        GGA_1.to_owned(),
        "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*00".to_owned(),
        GGA_2.to_owned(),
        frame("GPGGA,123521,,,,,0,,,,,,,,"),
    ];
    let (records, stats) = replay(lines);

    assert_eq!(stats.checksum_errors, 1);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].time.unwrap().to_string(), "12:35:19");
    assert_eq!(records[1].time.unwrap().to_string(), "12:35:20");
}

#[test]
fn undecodable_sentence_is_dropped_whole() {
    let lines = vec![
        GGA_1.to_owned(),
        frame("GPGSA,A,3,,,,,,,,,,,,,1.0,1.0,1.0"),
        // valid HDOP, broken VDOP: nothing of it may be applied
        frame("GPGSA,A,3,,,,,,,,,,,,,,9.9,x"),
        GGA_2.to_owned(),
    ];
    let (records, stats) = replay(lines);

    assert_eq!(stats.decode_errors, 1);
    assert_eq!(records[0].hdop, Some(1.0));
}

#[test]
fn mixed_constellations_accumulate() {
    let lines = vec![
        frame("GNGGA,101010,5230.000,N,01322.000,E,1,12,0.8,40.0,M,40.0,M,,"),
        frame("GPGSV,1,1,02,05,45,090,40,07,30,180,35"),
        frame("GLGSV,1,1,01,65,12,045,30"),
        frame("GAGSV,1,1,01,11,60,300,"),
        frame("GBGSV,1,1,01,201,20,100,28"),
        frame("GNGGA,101011,5230.000,N,01322.000,E,1,12,0.8,40.0,M,40.0,M,,"),
    ];
    let (records, _) = replay(lines);

    let constellations: Vec<TalkerId> = records[0].satellites.iter().map(|s| s.constellation).collect();
    assert_eq!(
        constellations,
        vec![
            TalkerId::Gps,
            TalkerId::Gps,
            TalkerId::Glonass,
            TalkerId::Galileo,
            TalkerId::BeiDou
        ]
    );
    assert_eq!(records[0].satellite_count, Some(1));
    assert_eq!(records[0].satellites[3].snr, None);
}

#[test]
fn reads_log_from_reader() {
    let log = format!(
        "{}\r\n\r\nsome receiver banner\r\n{}\r\n{}\r\n",
        GGA_1,
        frame("GPGSA,A,3,,,,,,,,,,,,,2.0,1.0,1.5"),
        GGA_2
    );
    let (tx, rx) = mpsc::channel();
    let mut pipeline = Pipeline::new(ReaderSource::new(Cursor::new(log)));
    pipeline.add_observer(move |r: &FixRecord| tx.send(r.clone()).unwrap());

    let stats = pipeline.run().unwrap();
    let records: Vec<FixRecord> = rx.iter().collect();
    assert_eq!(stats.lines, 5);
    assert_eq!(stats.skipped, 2);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].pdop, Some(2.0));
}

#[test]
fn invalid_utf8_line_is_skipped() {
    let mut log = Vec::new();
    log.extend_from_slice(GGA_1.as_bytes());
    log.extend_from_slice(b"\r\n\xff\xfe noise\r\n$GP\xffGSA,A,3*00\r\n");
    log.extend_from_slice(GGA_2.as_bytes());
    log.extend_from_slice(b"\r\n");
    log.extend_from_slice(GGA_1.as_bytes());
    log.extend_from_slice(b"\r\n");

    let recorder = Recorder::default();
    let mut pipeline = Pipeline::new(ReaderSource::new(Cursor::new(log)));
    pipeline.add_observer(recorder.clone());
    let stats = pipeline.run().unwrap();

    assert_eq!(stats.lines, 5);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.checksum_errors, 1);
    assert_eq!(stats.records_emitted, 2);
    assert_eq!(recorder.records().len(), 2);
}

#[test]
fn empty_input_emits_nothing() {
    let (records, stats) = replay(Vec::new());
    assert!(records.is_empty());
    assert_eq!(stats, nmea_fix::PipelineStats::default());
}
