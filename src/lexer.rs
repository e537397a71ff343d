use arrayvec::ArrayVec;

use std::str::FromStr;

use crate::checksum::CHECKSUM_DELIMITER;
use crate::err::{LexError, ParseError};

/// Capacity of the field buffer, the maximum over all supported sentence kinds.
pub const MAX_FIELDS: usize = 20;

const FIELD_SEPARATOR: char = ',';

/// A cursor over the comma separated fields of a sentence.
///
/// The input starts right after the `$TTKKK,` prefix. Tokens run up to, but
/// not including, the checksum delimiter. Empty segments are yielded as
/// `None`.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        let end = input.find(CHECKSUM_DELIMITER as char).unwrap_or_else(|| input.len());
        Tokenizer {
            input: &input[..end],
            pos: 0,
            done: false,
        }
    }

    /// Collect all remaining tokens, failing if there are more than `max`.
    pub fn fields(self, max: usize) -> Result<Fields<'a>, LexError> {
        let mut tokens = ArrayVec::<[Option<&'a str>; MAX_FIELDS]>::new();
        for token in self {
            if tokens.len() >= max || tokens.try_push(token).is_err() {
                return Err(LexError::TooManyFields(max));
            }
        }
        Ok(Fields { tokens })
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Option<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let rest = &self.input[self.pos..];
        let segment = match rest.find(FIELD_SEPARATOR) {
            Some(i) => {
                self.pos += i + 1;
                &rest[..i]
            }
            None => {
                self.done = true;
                rest
            }
        };

        if segment.is_empty() {
            Some(None)
        } else {
            Some(Some(segment))
        }
    }
}

/// The positional fields of one sentence.
///
/// Indexing past the observed field count reads as an absent field, so a
/// short sentence simply leaves its trailing fields empty.
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    tokens: ArrayVec<[Option<&'a str>; MAX_FIELDS]>,
}

impl<'a> Fields<'a> {
    /// Number of fields actually present in the sentence, empty ones included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// The raw text of field `idx`, `None` if it is empty or missing.
    #[inline]
    pub fn raw(&self, idx: usize) -> Option<&'a str> {
        self.tokens.get(idx).and_then(|t| *t)
    }

    /// Decode field `idx` as `T`. An empty field decodes to `Ok(None)`.
    pub fn accept<T: FromStr>(&self, idx: usize, field: &'static str) -> Result<Option<T>, ParseError> {
        match self.raw(idx) {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| ParseError::InvalidField(field, raw.to_owned())),
        }
    }

    /// Decode field `idx` as `T`, failing if it is empty.
    pub fn expect<T: FromStr>(&self, idx: usize, field: &'static str) -> Result<T, ParseError> {
        self.accept(idx, field)?
            .ok_or(ParseError::MissingField(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Option<&str>> {
        Tokenizer::new(input).collect()
    }

    #[test]
    fn empty_segments_are_absent() {
        // "$GPGGA,1,2,,4*XX" after the prefix
        assert_eq!(tokens("1,2,,4*XX"), vec![Some("1"), Some("2"), None, Some("4")]);
        assert_eq!(tokens(",a,"), vec![None, Some("a"), None]);
        assert_eq!(tokens("*00"), vec![None]);
    }

    #[test]
    fn stops_at_checksum_delimiter() {
        assert_eq!(tokens("12.5,M*4F"), vec![Some("12.5"), Some("M")]);
        assert_eq!(tokens("no,checksum"), vec![Some("no"), Some("checksum")]);
    }

    #[test]
    fn short_sentences_read_absent() {
        let fields = Tokenizer::new("1,2*00").fields(14).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.raw(1), Some("2"));
        assert_eq!(fields.raw(13), None);
        assert_matches!(fields.accept::<u8>(13, "station"), Ok(None));
    }

    #[test]
    fn overflow_is_reported() {
        assert_matches!(
            Tokenizer::new("1,2,3,4*00").fields(3),
            Err(LexError::TooManyFields(3))
        );
        let long = vec!["0"; MAX_FIELDS + 1].join(",");
        assert_matches!(
            Tokenizer::new(&long).fields(MAX_FIELDS + 5),
            Err(LexError::TooManyFields(_))
        );
    }

    #[test]
    fn typed_access() {
        let fields = Tokenizer::new("0.9,,x*00").fields(3).unwrap();
        assert_matches!(fields.accept::<f64>(0, "hdop"), Ok(Some(v)) if (v - 0.9).abs() < 1e-9);
        assert_matches!(fields.accept::<f64>(1, "altitude"), Ok(None));
        assert_matches!(fields.expect::<f64>(1, "altitude"), Err(ParseError::MissingField("altitude")));
        assert_matches!(
            fields.accept::<u8>(2, "count"),
            Err(ParseError::InvalidField("count", ref raw)) if raw == "x"
        );
    }
}
