//! Token framing shared by every version and purpose.
//!
//! A token is always `<version>.<purpose>.<b64(body)>`, optionally followed
//! by `.<b64(footer)>`. Base64url without padding never contains a `.`, so
//! the first `.` after the prefix is the only possible footer boundary.

use base64ct::{Base64UrlUnpadded, Encoding};
use subtle::ConstantTimeEq;

use crate::{purpose::Purpose, version::Version, PasetoError};

/// Assemble a token into an exactly sized buffer.
pub(crate) fn encode<V: Version, T: Purpose>(body: &[u8], footer: &[u8]) -> String {
    let prefix = [V::PASETO_HEADER, ".", T::HEADER, "."];
    let prefix_len: usize = prefix.iter().map(|part| part.len()).sum();
    let body_len = Base64UrlUnpadded::encoded_len(body);
    let footer_len = match footer.is_empty() {
        true => 0,
        false => 1 + Base64UrlUnpadded::encoded_len(footer),
    };

    let mut raw = vec![0; prefix_len + body_len + footer_len];

    let mut at = 0;
    for part in prefix {
        raw[at..at + part.len()].copy_from_slice(part.as_bytes());
        at += part.len();
    }
    Base64UrlUnpadded::encode(body, &mut raw[at..at + body_len])
        .expect("buffer is sized for the encoded body");
    at += body_len;
    if !footer.is_empty() {
        raw[at] = b'.';
        Base64UrlUnpadded::encode(footer, &mut raw[at + 1..])
            .expect("buffer is sized for the encoded footer");
    }

    String::from_utf8(raw).expect("base64url output is ascii")
}

/// Strip the prefix, settle the footer section against the expected footer,
/// and decode the body.
///
/// With an empty expected footer no split is attempted; a footer section
/// smuggled into the token leaves a `.` for the base64 decoder to choke on.
pub(crate) fn decode<V: Version, T: Purpose>(
    token: &str,
    expected_footer: &[u8],
) -> Result<Vec<u8>, PasetoError> {
    if token.is_empty() {
        return Err(PasetoError::EmptyToken);
    }

    let tail = token
        .strip_prefix(V::PASETO_HEADER)
        .and_then(|s| s.strip_prefix('.'))
        .and_then(|s| s.strip_prefix(T::HEADER))
        .and_then(|s| s.strip_prefix('.'))
        .ok_or(PasetoError::WrongHeader)?;

    let body = if expected_footer.is_empty() {
        tail
    } else {
        let (body, footer) = tail.split_once('.').ok_or(PasetoError::FooterMissing)?;
        let footer =
            Base64UrlUnpadded::decode_vec(footer).map_err(|_| PasetoError::Base64DecodeError)?;
        if !secure_compare(expected_footer, &footer) {
            return Err(PasetoError::FooterMismatch);
        }
        body
    };

    Base64UrlUnpadded::decode_vec(body).map_err(|_| PasetoError::Base64DecodeError)
}

/// Equality with timing independent of the position of the first differing
/// byte. On a length mismatch the byte scan still runs, over `actual`
/// against itself, before reporting the inevitable.
pub(crate) fn secure_compare(given: &[u8], actual: &[u8]) -> bool {
    let lengths_equal = given.len() == actual.len();
    let bytes_equal: bool = if lengths_equal {
        given.ct_eq(actual)
    } else {
        actual.ct_eq(actual)
    }
    .into();
    lengths_equal && bytes_equal
}
