//! Zero-allocation parsing of one input line into a reading.

use crate::core::error::ReadingError;

// --- Helpers ---
#[inline]
fn trim(mut b: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = b {
        if !first.is_ascii_whitespace() {
            break;
        }
        b = rest;
    }
    while let [rest @ .., last] = b {
        if !last.is_ascii_whitespace() {
            break;
        }
        b = rest;
    }
    b
}

/// Rewrite U+2212 MINUS SIGN as ASCII `-` in place.
#[inline]
pub fn normalize_unicode_minus(buf: &mut Vec<u8>) {
    let (mut r, mut w) = (0, 0);
    while r < buf.len() {
        if r + 2 < buf.len() && buf[r] == 0xE2 && buf[r + 1] == 0x88 && buf[r + 2] == 0x92 {
            buf[w] = b'-';
            r += 3;
            w += 1;
        } else {
            if r != w {
                buf[w] = buf[r];
            }
            r += 1;
            w += 1;
        }
    }
    buf.truncate(w);
}

/// Parse one line (newline optional) as a finite `f64`.
///
/// Locale-independent; surrounding whitespace, `\r` and a leading `+` are
/// accepted.
///
/// # Errors
/// [`ReadingError`] for blank, non-numeric and non-finite lines.
pub fn parse_reading(line: &[u8]) -> Result<f64, ReadingError> {
    let text = trim(line);
    if text.is_empty() {
        return Err(ReadingError::Empty);
    }
    let digits = text.strip_prefix(b"+").unwrap_or(text);
    let value = lexical_core::parse::<f64>(digits)
        .map_err(|_| ReadingError::NotANumber(String::from_utf8_lossy(text).into_owned()))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ReadingError::NonFinite(
            String::from_utf8_lossy(text).into_owned(),
        ))
    }
}

/// [`parse_reading`] after Unicode-minus normalisation of an owned line.
///
/// # Errors
/// See [`parse_reading`].
pub fn parse_owned_line(mut line: Vec<u8>) -> Result<f64, ReadingError> {
    normalize_unicode_minus(&mut line);
    parse_reading(&line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_padded_numbers() {
        assert_eq!(parse_reading(b"1"), Ok(1.0));
        assert_eq!(parse_reading(b"  -2.5\r\n"), Ok(-2.5));
        assert_eq!(parse_reading(b"+3e2\n"), Ok(300.0));
        assert_eq!(parse_reading(b".5"), Ok(0.5));
    }

    #[test]
    fn rejects_garbage_without_panicking() {
        assert_eq!(
            parse_reading(b"abc\n"),
            Err(ReadingError::NotANumber("abc".into()))
        );
        assert_eq!(parse_reading(b"1.2.3"), Err(ReadingError::NotANumber("1.2.3".into())));
        assert_eq!(parse_reading(b"   \n"), Err(ReadingError::Empty));
        assert_eq!(parse_reading(b""), Err(ReadingError::Empty));
    }

    #[test]
    fn rejects_non_finite() {
        assert!(matches!(
            parse_reading(b"1e400"),
            Err(ReadingError::NonFinite(_) | ReadingError::NotANumber(_))
        ));
        assert!(parse_reading(b"NaN").is_err());
        assert!(parse_reading(b"inf").is_err());
    }

    #[test]
    fn unicode_minus_is_normalised() {
        let line = "\u{2212}4.25\n".as_bytes().to_vec();
        assert_eq!(parse_owned_line(line), Ok(-4.25));
    }
}
