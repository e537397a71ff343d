//! XOR checksum of an NMEA 0183 sentence.
//!
//! The checksum covers every byte between the start delimiter `$` and the
//! checksum delimiter `*` and is transmitted as two hexadecimal digits.

use crate::err::ChecksumError;

pub const START_DELIMITER: u8 = b'$';
pub const CHECKSUM_DELIMITER: u8 = b'*';

/// XOR all bytes of `body`, which must not contain the delimiters.
pub fn compute(body: &str) -> u8 {
    body.bytes().fold(0, |acc, b| acc ^ b)
}

/// Wrap `body` into a complete sentence, e.g. `GPGGA,...` becomes `$GPGGA,...*hh`.
pub fn frame(body: &str) -> String {
    format!("${}*{:02X}", body, compute(body))
}

/// Verify the checksum trailer of `sentence`.
///
/// Anything after the two checksum digits (e.g. a line ending) is ignored.
pub fn validate(sentence: &str) -> Result<(), ChecksumError> {
    let bytes = sentence.as_bytes();
    if bytes.first() != Some(&START_DELIMITER) {
        return Err(ChecksumError::MissingStart);
    }

    let mut computed = 0u8;
    let mut delimiter = None;
    for (i, &b) in bytes.iter().enumerate().skip(1) {
        if b == CHECKSUM_DELIMITER {
            delimiter = Some(i);
            break;
        }
        computed ^= b;
    }
    let delimiter = delimiter.ok_or(ChecksumError::MissingDelimiter)?;

    let digits = bytes
        .get(delimiter + 1..delimiter + 3)
        .ok_or(ChecksumError::Truncated)?;
    let expected = match (hex_value(digits[0]), hex_value(digits[1])) {
        (Some(hi), Some(lo)) => hi << 4 | lo,
        _ => {
            return Err(ChecksumError::InvalidDigits(
                String::from_utf8_lossy(digits).into_owned(),
            ))
        }
    };

    if computed != expected {
        return Err(ChecksumError::Mismatch(computed, expected));
    }
    Ok(())
}

#[inline]
fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GGA: &str = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";

    #[test]
    fn accepts_known_sentence() {
        assert_matches!(validate(GGA), Ok(()));
    }

    #[test]
    fn lowercase_digits_and_line_ending() {
        let body = "GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1";
        let sentence = format!("${}*{:02x}\r\n", body, compute(body));
        assert_matches!(validate(&sentence), Ok(()));
    }

    #[test]
    fn framed_sentences_validate() {
        for body in &["GPGGA,,,,,,0,,,,,,,,", "GLGSV,1,1,00", "X", ""] {
            assert_matches!(validate(&frame(body)), Ok(()));
        }
    }

    #[test]
    fn any_flipped_character_fails() {
        let body = "GPGSV,2,1,08,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45";
        let sentence = frame(body);
        let star = sentence.find('*').unwrap();
        for i in 1..star {
            let mut bytes = sentence.clone().into_bytes();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let broken = String::from_utf8(bytes).unwrap();
            assert_matches!(validate(&broken), Err(ChecksumError::Mismatch(_, _)));
        }
    }

    #[test]
    fn structural_failures() {
        assert_matches!(validate(""), Err(ChecksumError::MissingStart));
        assert_matches!(validate("GPGGA,1*00"), Err(ChecksumError::MissingStart));
        assert_matches!(validate("$GPGGA,1,2"), Err(ChecksumError::MissingDelimiter));
        assert_matches!(validate("$GPGGA,1*4"), Err(ChecksumError::Truncated));
        assert_matches!(validate("$GPGGA,1*"), Err(ChecksumError::Truncated));
        assert_matches!(validate("$GPGGA,1*G1"), Err(ChecksumError::InvalidDigits(_)));
    }

    #[test]
    fn mismatch_reports_both_values() {
        let err = validate("$GPGGA*00").unwrap_err();
        let computed = compute("GPGGA");
        assert_matches!(err, ChecksumError::Mismatch(c, 0) if c == computed);
        assert!(err.to_string().contains(&format!("{:02X}", computed)));
    }
}
