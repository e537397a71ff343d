#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate nmea_fix;

use nmea_fix::{Aggregator, SentenceParser};

fuzz_target!(|data: &[u8]| {
    let parser = SentenceParser::new();
    let mut aggregator = Aggregator::new();

    for line in String::from_utf8_lossy(data).lines() {
        if let Ok(Some(sentence)) = parser.parse_line(line) {
            aggregator.apply(&sentence);
        }
    }
});
