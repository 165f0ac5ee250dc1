//! Percent-encoding for column names and values
//!
//! Everything outside a small URL-safe set is escaped, including all the
//! characters the filter grammar gives meaning to.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::errors::{FilterError, Result};

/// Bytes written as-is; every grammar byte is outside this set
const TEXT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'*')
    .remove(b':')
    .remove(b'/')
    .remove(b',')
    .remove(b'@');

pub(crate) fn encode(text: &str) -> String {
    utf8_percent_encode(text, TEXT_ENCODE_SET).to_string()
}

/// Decode `text`, which starts at byte `offset` of the whole input
///
/// `+` decodes to a space, as in form submissions. A `%` must be followed by
/// two hex digits.
pub(crate) fn decode(text: &str, offset: usize) -> Result<String> {
    let bytes = text.as_bytes();
    if let Some(index) = (0..bytes.len()).find(|&index| {
        bytes[index] == b'%'
            && !bytes
                .get(index + 1..index + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    }) {
        return Err(FilterError::InvalidEncoding {
            position: offset + index,
            reason: "Malformed percent escape".to_string(),
        });
    }

    let spaced = text.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| FilterError::InvalidEncoding {
            position: offset,
            reason: "Escaped text is not valid UTF-8".to_string(),
        })
}
