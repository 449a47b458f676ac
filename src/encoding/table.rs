//! Byte class tables from RFC 3986.
//!
//! The predefined constants in this module are documented with the
//! ABNF notation of [RFC 5234].
//!
//! [RFC 5234]: https://datatracker.ietf.org/doc/html/rfc5234

const MASK_PCT_ENCODED: u64 = 1 << b'%';
const MASK_UNENCODED: u64 = !MASK_PCT_ENCODED;

/// A table specifying the ASCII bytes allowed unencoded in a string.
///
/// A table may additionally allow percent-encoded octets; see
/// [`or_pct_encoded`](Self::or_pct_encoded).
#[derive(Clone, Copy, Debug)]
pub struct Table(u64, u64);

impl Table {
    /// Creates a table that only allows the given unencoded bytes.
    ///
    /// # Panics
    ///
    /// Panics if any of the bytes is not ASCII or equals `0` or `b'%'`.
    #[must_use]
    pub const fn new(mut bytes: &[u8]) -> Self {
        let mut table = 0u128;
        while let [cur, rem @ ..] = bytes {
            assert!(
                !matches!(cur, 0 | b'%' | 128..),
                "cannot allow non-ASCII byte, 0, or %"
            );
            table |= 1u128.wrapping_shl(*cur as u32);
            bytes = rem;
        }
        Self(table as u64, (table >> 64) as u64)
    }

    /// Combines two tables into one.
    ///
    /// Returns a new table that allows all the bytes allowed by `self`
    /// or by `other`.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0, self.1 | other.1)
    }

    /// Subtracts from this table.
    ///
    /// Returns a new table that allows all the bytes allowed by `self`
    /// but not allowed by `other`.
    #[must_use]
    pub const fn sub(self, other: Self) -> Self {
        Self(self.0 & !(other.0 & MASK_UNENCODED), self.1 & !other.1)
    }

    /// Marks this table as allowing percent-encoded octets.
    #[must_use]
    pub const fn or_pct_encoded(self) -> Self {
        Self(self.0 | MASK_PCT_ENCODED, self.1)
    }

    /// Checks whether the given unencoded byte is allowed by the table.
    #[inline]
    #[must_use]
    pub const fn allows(self, x: u8) -> bool {
        let bits = if x < 64 {
            self.0 & MASK_UNENCODED
        } else if x < 128 {
            self.1
        } else {
            0
        };
        bits & 1u64.wrapping_shl(x as u32) != 0
    }

    /// Checks whether percent-encoded octets are allowed by the table.
    #[inline]
    #[must_use]
    pub const fn allows_pct_encoded(self) -> bool {
        self.0 & MASK_PCT_ENCODED != 0
    }

    /// Checks whether the table is a subset of another, i.e., `other`
    /// allows at least all the bytes allowed by `self`.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & other.0 == self.0 && self.1 & other.1 == self.1
    }
}

const fn new(bytes: &[u8]) -> Table {
    Table::new(bytes)
}

/// `ALPHA = %x41-5A / %x61-7A`
pub const ALPHA: Table = new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// `DIGIT = %x30-39`
pub const DIGIT: Table = new(b"0123456789");

/// `HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"`
///
/// Both uppercase and lowercase digits are accepted, as RFC 3986
/// treats percent-encoded octets case-insensitively.
pub const HEXDIG: Table = DIGIT.or(new(b"ABCDEFabcdef"));

/// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
pub const UNRESERVED: Table = ALPHA.or(DIGIT).or(new(b"-._~"));

/// `gen-delims = ":" / "/" / "?" / "#" / "[" / "]" / "@"`
pub const GEN_DELIMS: Table = new(b":/?#[]@");

/// `sub-delims = "!" / "$" / "&" / "'" / "(" / ")"
///             / "*" / "+" / "," / ";" / "="`
pub const SUB_DELIMS: Table = new(b"!$&'()*+,;=");

/// `reserved = gen-delims / sub-delims`
pub const RESERVED: Table = GEN_DELIMS.or(SUB_DELIMS);

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
pub const SCHEME: Table = ALPHA.or(DIGIT).or(new(b"+-."));

/// `userinfo = *( unreserved / pct-encoded / sub-delims / ":" )`
pub const USERINFO: Table = UNRESERVED.or(SUB_DELIMS).or(new(b":")).or_pct_encoded();

/// The user subcomponent of userinfo, i.e. `userinfo` without `':'`.
///
/// The first `':'` in a userinfo separates the user from the password,
/// so a user must have it encoded.
pub const USERINFO_NC: Table = UNRESERVED.or(SUB_DELIMS).or_pct_encoded();

/// `reg-name = *( unreserved / pct-encoded / sub-delims )`
pub const REG_NAME: Table = UNRESERVED.or(SUB_DELIMS).or_pct_encoded();

/// `IPvFuture = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )`
pub const IPV_FUTURE: Table = UNRESERVED.or(SUB_DELIMS).or(new(b":"));

/// `pchar = unreserved / pct-encoded / sub-delims / ":" / "@"`
pub const PCHAR: Table = UNRESERVED.or(SUB_DELIMS).or(new(b":@")).or_pct_encoded();

/// `segment-nz-nc = 1*( unreserved / pct-encoded / sub-delims / "@" )`
pub const SEGMENT_NZ_NC: Table = UNRESERVED.or(SUB_DELIMS).or(new(b"@")).or_pct_encoded();

/// `path = path-abempty / path-absolute / path-noscheme
///       / path-rootless / path-empty`
///
/// This is the union of all path productions, i.e. `*( pchar / "/" )`.
pub const PATH: Table = PCHAR.or(new(b"/"));

/// `query = *( pchar / "/" / "?" )`
pub const QUERY: Table = PCHAR.or(new(b"/?"));

/// `fragment = *( pchar / "/" / "?" )`
pub const FRAGMENT: Table = QUERY;

/// The key of a query parameter: `query` without `'='` and `'&'`.
pub const QUERY_KEY: Table = QUERY.sub(new(b"=&"));

/// The value of a query parameter: `query` without `'&'`.
pub const QUERY_VALUE: Table = QUERY.sub(new(b"&"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership() {
        assert!(UNRESERVED.allows(b'a'));
        assert!(UNRESERVED.allows(b'~'));
        assert!(!UNRESERVED.allows(b'/'));
        assert!(!UNRESERVED.allows(0));
        assert!(!UNRESERVED.allows(0x80));

        assert!(PCHAR.allows(b':'));
        assert!(PCHAR.allows(b'@'));
        assert!(!PCHAR.allows(b'/'));
        assert!(PATH.allows(b'/'));
        assert!(QUERY.allows(b'?'));
        assert!(!QUERY.allows(b'#'));

        assert!(!USERINFO_NC.allows(b':'));
        assert!(USERINFO.allows(b':'));
    }

    #[test]
    fn pct_flag() {
        assert!(PCHAR.allows_pct_encoded());
        assert!(!SCHEME.allows_pct_encoded());
        // The '%' marker bit must not leak into membership.
        assert!(!PCHAR.allows(b'%'));
    }

    #[test]
    fn sub_keeps_pct_flag() {
        assert!(QUERY_KEY.allows_pct_encoded());
        assert!(!QUERY_KEY.allows(b'='));
        assert!(!QUERY_KEY.allows(b'&'));
        assert!(QUERY_VALUE.allows(b'='));
        assert!(!QUERY_VALUE.allows(b'&'));
        assert!(QUERY_KEY.is_subset(QUERY_VALUE));
        assert!(QUERY_VALUE.is_subset(QUERY));
    }
}
