/// Decode an optional positional field. The index constant doubles as the
/// field name in error messages.
///
/// `accept!(fields, HDOP => f64)` yields `Result<Option<f64>, ParseError>`.
macro_rules! accept {
    ($fields:expr, $idx:ident => $ty:ty) => {
        $fields.accept::<$ty>($idx, stringify!($idx))
    };
}

/// Like `accept!`, but an empty field is a `ParseError::MissingField`.
macro_rules! expect {
    ($fields:expr, $idx:ident => $ty:ty) => {
        $fields.expect::<$ty>($idx, stringify!($idx))
    };
}
