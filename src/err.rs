use std::num;

quick_error! {
    #[derive(Debug)]
    pub enum ParseError {
        Checksum(err: ChecksumError) {
            from()
            description("Checksum error")
            display("Discarded sentence with a broken checksum: {}", err)
            cause(err)
        }
        Lexer(err: LexError) {
            from()
            description("Lexer error")
            display("Could not parse due to an error in the lexer: {}", err)
            cause(err)
        }
        UnexpectedToken(c: char) {
            description("Unexpected token")
            display("Encountered unexpected token \"{}\" after the sentence type", c)
        }
        MissingField(field: &'static str) {
            description("Missing field")
            display("Required field {} is empty", field)
        }
        InvalidField(field: &'static str, raw: String) {
            description("Invalid field")
            display("Could not decode \"{}\" as field {}", raw, field)
        }
        InvalidDir(dir: String) {
            description("Invalid cardinal direction")
            display("Encountered invalid cardinal direction \"{}\"", dir)
        }
        InvalidUnit(unit: String) {
            description("Invalid unit")
            display("Expected unit \"M\", found \"{}\"", unit)
        }
        InvalidValue(msg: &'static str) {
            description("Invalid value")
            display("Invalid value: {}", msg)
        }
        Time(err: chrono::format::ParseError) {
            from()
            description("Time parsing error")
            display("Failed to parse field as time: {}", err)
            cause(err)
        }
        Coordinate(err: CoordinateParseError) {
            from()
            description("Coordinate parsing error")
            display("Could not parse field as coordinate: {}", err)
            cause(err)
        }
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum ChecksumError {
        MissingStart {
            description("Missing start delimiter")
            display("Sentence does not start with '$'")
        }
        MissingDelimiter {
            description("Missing checksum delimiter")
            display("No '*' found before the end of the sentence")
        }
        Truncated {
            description("Truncated checksum")
            display("Fewer than two checksum digits follow '*'")
        }
        InvalidDigits(digits: String) {
            description("Invalid checksum digits")
            display("Checksum \"{}\" is not a two digit hexadecimal number", digits)
        }
        Mismatch(computed: u8, expected: u8) {
            description("Invalid checksum")
            display("Checksum calculated: {:02X} but expected {:02X}", computed, expected)
        }
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum LexError {
        TooManyFields(max: usize) {
            description("Too many fields")
            display("Sentence has more than {} fields", max)
        }
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum CoordinateParseError {
        InvalidInput(msg: &'static str) {
            description("Invalid input")
            display("Invalid input: {}", msg)
        }
        Degrees(err: num::ParseIntError) {
            from()
            description("Invalid degrees")
            display("{}", err)
            cause(err)
        }
        DecimalMin(err: num::ParseFloatError) {
            from()
            description("Invalid decimal minutes")
            display("{}", err)
            cause(err)
        }
        InvalidCoord(val: f64, max: f64) {
            description("Invalid coordinate")
            display("Invalid coordinate: {} should be between {} and {}", val, max*-1.0, max)
        }
    }
}
