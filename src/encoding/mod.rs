//! Utilities for percent-encoding.

pub mod table;

pub use table::Table;

use crate::error::{Error, Result};
use ref_cast::RefCast;
use std::{
    borrow::Cow,
    fmt, hash,
    str::{self, Utf8Error},
};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Returns the value of a hexadecimal digit, or `None`.
#[inline]
fn hex_value(x: u8) -> Option<u8> {
    match x {
        b'0'..=b'9' => Some(x - b'0'),
        b'A'..=b'F' => Some(x - b'A' + 10),
        b'a'..=b'f' => Some(x - b'a' + 10),
        _ => None,
    }
}

/// Returns the number of bytes `s` occupies once percent-encoded with `table`.
///
/// Each byte not allowed by the table expands to a three-byte `%xx` triplet.
#[must_use]
pub fn encoded_len(s: &str, table: Table) -> usize {
    s.bytes()
        .map(|x| if table.allows(x) { 1 } else { 3 })
        .sum()
}

/// Percent-encodes the bytes of `s` that are not allowed by `table`.
///
/// Hexadecimal digits are emitted in lowercase. Returns the input
/// unchanged when nothing needs encoding.
///
/// # Examples
///
/// ```
/// use urlbuf::encoding::{encode, table};
///
/// assert_eq!(encode("a b", table::PCHAR), "a%20b");
/// assert_eq!(encode("ab", table::PCHAR), "ab");
/// ```
#[must_use]
pub fn encode(s: &str, table: Table) -> Cow<'_, str> {
    if s.bytes().all(|x| table.allows(x)) {
        return Cow::Borrowed(s);
    }
    let mut buf = String::with_capacity(encoded_len(s, table));
    encode_to(&mut buf, s, table);
    Cow::Owned(buf)
}

/// Percent-encodes `s` with `table`, appending the output to `buf`.
pub fn encode_to(buf: &mut String, s: &str, table: Table) {
    for x in s.bytes() {
        if table.allows(x) {
            buf.push(x as char);
        } else {
            buf.push('%');
            buf.push(HEX_DIGITS[(x >> 4) as usize] as char);
            buf.push(HEX_DIGITS[(x & 15) as usize] as char);
        }
    }
}

/// Checks that every byte of `s` is either allowed by `table` or part
/// of a well-formed percent-encoded octet.
///
/// # Errors
///
/// Returns [`Error::BadPctHexDig`] for a `%` not followed by two
/// hexadecimal digits, and [`Error::IllegalReservedChar`] for any other
/// disallowed byte.
pub fn validate(s: &str, table: Table) -> Result<()> {
    validate_bytes(s.as_bytes(), table)
}

pub(crate) fn validate_bytes(bytes: &[u8], table: Table) -> Result<()> {
    let mut i = 0;
    while i < bytes.len() {
        let x = bytes[i];
        if x == b'%' {
            if !table.allows_pct_encoded() {
                return Err(Error::IllegalReservedChar);
            }
            if i + 2 >= bytes.len()
                || hex_value(bytes[i + 1]).is_none()
                || hex_value(bytes[i + 2]).is_none()
            {
                return Err(Error::BadPctHexDig);
            }
            i += 3;
        } else {
            if !table.allows(x) {
                return Err(Error::IllegalReservedChar);
            }
            i += 1;
        }
    }
    Ok(())
}

/// Percent-encoded string slices.
///
/// An `EStr` wraps a string known to contain only unencoded bytes and
/// well-formed percent-encoded octets, as the borrowed components of a
/// [`Url`](crate::Url) do.
///
/// # Examples
///
/// ```
/// use urlbuf::Url;
///
/// let url = Url::parse("//example.com/r%C3%A9sum%C3%A9")?;
/// let path = url.encoded_path();
/// assert_eq!(path, "/r%C3%A9sum%C3%A9");
/// assert_eq!(path.decode().into_string_lossy(), "/résumé");
/// # Ok::<_, urlbuf::Error>(())
/// ```
#[derive(RefCast)]
#[repr(transparent)]
pub struct EStr {
    inner: str,
}

impl EStr {
    /// Converts a string slice to an `EStr` assuming validity.
    pub(crate) fn new_validated(s: &str) -> &Self {
        EStr::ref_cast(s)
    }

    /// An empty `EStr` slice.
    // SAFETY: Transparency holds and the empty string is trivially valid.
    pub const EMPTY: &'static Self = unsafe { &*("" as *const str as *const EStr) };

    /// Converts a string slice to an `EStr`, returning `None` if the
    /// string contains a malformed percent-encoded octet.
    #[must_use]
    pub fn new(s: &str) -> Option<&Self> {
        let bytes = s.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'%' {
                if i + 2 >= bytes.len()
                    || hex_value(bytes[i + 1]).is_none()
                    || hex_value(bytes[i + 2]).is_none()
                {
                    return None;
                }
                i += 3;
            } else {
                i += 1;
            }
        }
        Some(Self::new_validated(s))
    }

    /// Yields the underlying string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the length of the `EStr` in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Checks whether the `EStr` is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Decodes the `EStr`.
    ///
    /// Note that `'+'` is **not** decoded as a space; this crate is
    /// agnostic of form encoding.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlbuf::encoding::EStr;
    ///
    /// let dec = EStr::new("%C2%BF").unwrap().decode();
    /// assert_eq!(dec.as_bytes(), &[0xc2, 0xbf]);
    /// assert_eq!(dec.into_string_lossy(), "¿");
    /// ```
    #[must_use]
    pub fn decode(&self) -> Decode<'_> {
        let bytes = self.inner.as_bytes();
        let Some(first) = bytes.iter().position(|&x| x == b'%') else {
            return Decode(Cow::Borrowed(bytes));
        };

        let mut out = Vec::with_capacity(bytes.len());
        out.extend_from_slice(&bytes[..first]);
        let mut i = first;
        while i < bytes.len() {
            let x = bytes[i];
            if x == b'%' && i + 2 < bytes.len() {
                if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    out.push((hi << 4) | lo);
                    i += 3;
                    continue;
                }
            }
            out.push(x);
            i += 1;
        }
        Decode(Cow::Owned(out))
    }

    /// Returns an iterator over subslices of the `EStr` separated by
    /// the given delimiter.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is not a [reserved] character.
    ///
    /// [reserved]: https://datatracker.ietf.org/doc/html/rfc3986#section-2.2
    ///
    /// # Examples
    ///
    /// ```
    /// use urlbuf::encoding::EStr;
    ///
    /// let estr = EStr::new("a,b,c").unwrap();
    /// assert!(estr.split(',').eq(["a", "b", "c"]));
    /// ```
    pub fn split(&self, delim: char) -> Split<'_> {
        assert!(
            delim.is_ascii() && table::RESERVED.allows(delim as u8),
            "splitting with non-reserved character"
        );
        Split {
            inner: self.inner.split(delim),
        }
    }

    /// Splits the `EStr` on the first occurrence of the given delimiter
    /// and returns the prefix and the suffix.
    ///
    /// Returns `None` if the delimiter is not found.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is not a [reserved] character.
    ///
    /// [reserved]: https://datatracker.ietf.org/doc/html/rfc3986#section-2.2
    #[must_use]
    pub fn split_once(&self, delim: char) -> Option<(&Self, &Self)> {
        assert!(
            delim.is_ascii() && table::RESERVED.allows(delim as u8),
            "splitting with non-reserved character"
        );
        self.inner
            .split_once(delim)
            .map(|(a, b)| (Self::new_validated(a), Self::new_validated(b)))
    }
}

impl AsRef<str> for EStr {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl PartialEq for EStr {
    #[inline]
    fn eq(&self, other: &EStr) -> bool {
        self.inner == other.inner
    }
}

impl PartialEq<str> for EStr {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        &self.inner == other
    }
}

impl PartialEq<&str> for EStr {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        &self.inner == *other
    }
}

impl PartialEq<EStr> for str {
    #[inline]
    fn eq(&self, other: &EStr) -> bool {
        self == &other.inner
    }
}

impl Eq for EStr {}

impl hash::Hash for EStr {
    #[inline]
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl fmt::Debug for EStr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for EStr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

/// The result of decoding an [`EStr`].
#[derive(Clone, Debug)]
pub struct Decode<'a>(Cow<'a, [u8]>);

impl<'a> Decode<'a> {
    /// Returns the decoded bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes this `Decode` and yields the decoded bytes.
    #[inline]
    #[must_use]
    pub fn into_bytes(self) -> Cow<'a, [u8]> {
        self.0
    }

    /// Converts the decoded bytes to a string, failing on invalid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the decoded bytes are not valid UTF-8.
    pub fn into_string(self) -> Result<Cow<'a, str>, Utf8Error> {
        match self.0 {
            Cow::Borrowed(bytes) => str::from_utf8(bytes).map(Cow::Borrowed),
            Cow::Owned(bytes) => match String::from_utf8(bytes) {
                Ok(s) => Ok(Cow::Owned(s)),
                Err(e) => Err(e.utf8_error()),
            },
        }
    }

    /// Converts the decoded bytes to a string, replacing invalid UTF-8
    /// sequences with `U+FFFD`.
    #[must_use]
    pub fn into_string_lossy(self) -> Cow<'a, str> {
        match self.0 {
            Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes),
            Cow::Owned(bytes) => match String::from_utf8_lossy(&bytes) {
                // A copy is only made when the bytes are invalid.
                Cow::Borrowed(_) => {
                    // SAFETY: `from_utf8_lossy` borrowed, so the bytes are valid UTF-8.
                    Cow::Owned(unsafe { String::from_utf8_unchecked(bytes) })
                }
                Cow::Owned(s) => Cow::Owned(s),
            },
        }
    }
}

/// An iterator over subslices of an [`EStr`] separated by a delimiter.
#[derive(Clone, Debug)]
pub struct Split<'a> {
    inner: str::Split<'a, char>,
}

impl<'a> Iterator for Split<'a> {
    type Item = &'a EStr;

    #[inline]
    fn next(&mut self) -> Option<&'a EStr> {
        self.inner.next().map(EStr::new_validated)
    }
}

impl<'a> DoubleEndedIterator for Split<'a> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a EStr> {
        self.inner.next_back().map(EStr::new_validated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_lowercase_hex() {
        assert_eq!(encode(":", table::USERINFO_NC), "%3a");
        assert_eq!(encode("@", table::USERINFO_NC), "%40");
        assert_eq!(encode("{}", table::QUERY), "%7b%7d");
    }

    #[test]
    fn encoded_len_matches_encode() {
        let s = "a b%c\u{e9}";
        for table in [table::PCHAR, table::QUERY, table::REG_NAME] {
            assert_eq!(encode(s, table).len(), encoded_len(s, table));
        }
    }

    #[test]
    fn validate_pct() {
        assert_eq!(validate("%41%7F", table::PCHAR), Ok(()));
        assert_eq!(validate("%4", table::PCHAR), Err(Error::BadPctHexDig));
        assert_eq!(validate("%4g", table::PCHAR), Err(Error::BadPctHexDig));
        assert_eq!(validate("%", table::PCHAR), Err(Error::BadPctHexDig));
        assert_eq!(validate("/", table::PCHAR), Err(Error::IllegalReservedChar));
        // '%' is rejected outright by tables without the pct marker.
        assert_eq!(
            validate("%41", table::SCHEME),
            Err(Error::IllegalReservedChar)
        );
    }

    #[test]
    fn decode_round_trip() {
        let raw = "un~reserved spaced/slashed?";
        let enc = encode(raw, table::REG_NAME);
        let estr = EStr::new(&enc).unwrap();
        assert_eq!(estr.decode().as_bytes(), raw.as_bytes());
        assert_eq!(estr.decode().into_string_lossy(), raw);
    }

    #[test]
    fn decode_mixed_case() {
        let estr = EStr::new("%2F%2f").unwrap();
        assert_eq!(estr.decode().as_bytes(), b"//");
    }

    #[test]
    fn decode_keeps_plus() {
        let estr = EStr::new("a+b").unwrap();
        assert_eq!(estr.decode().as_bytes(), b"a+b");
    }

    #[test]
    fn split_borders() {
        let estr = EStr::new(",").unwrap();
        assert!(estr.split(',').eq(["", ""]));
        assert!(EStr::EMPTY.split(',').eq([""]));
    }
}
