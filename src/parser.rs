//! The RFC 3986 grammar parser.
//!
//! Parsing emits a [`Parts`] table of prefix-delimited component
//! offsets rather than borrowed subslices, so that the container can
//! splice edits into its buffer against the same table.

use crate::{
    encoding::{table, validate_bytes},
    error::{Error, Result},
    ip,
    url::parts::{id, HostData, Parts},
};
use std::str;

/// The maximum encoded length of a URL, excluding the trailing NUL.
pub(crate) const MAX_LENGTH: usize = u32::MAX as usize;

/// Which ABNF rule an input is required to match.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    /// `URI-reference = URI / relative-ref`
    Reference,
    /// `URI = scheme ":" hier-part [ "?" query ] [ "#" fragment ]`
    Uri,
    /// `relative-ref = relative-part [ "?" query ] [ "#" fragment ]`
    Relative,
    /// `absolute-URI = scheme ":" hier-part [ "?" query ]`
    Absolute,
}

/// Sub-offsets of a parsed authority, relative to its first byte.
#[derive(Clone, Copy)]
pub(crate) struct Authority {
    /// Index of the first `':'` within the userinfo, if any.
    pub(crate) userinfo_colon: Option<usize>,
    /// Index of the `'@'` delimiter, if a userinfo is present.
    pub(crate) userinfo_at: Option<usize>,
    pub(crate) host_bounds: (usize, usize),
    pub(crate) host: HostData,
    pub(crate) port_number: Option<u16>,
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn read_str(&mut self, s: &[u8]) -> bool {
        let res = self.bytes[self.pos..].starts_with(s);
        if res {
            self.pos += s.len();
        }
        res
    }

    /// Scans bytes allowed by `table`, including percent-encoded octets
    /// when the table allows them, stopping at the first other byte.
    fn scan(&mut self, table: table::Table) -> Result<()> {
        let allow_enc = table.allows_pct_encoded();
        while let Some(x) = self.peek() {
            if x == b'%' && allow_enc {
                if self.pos + 2 >= self.bytes.len()
                    || !table::HEXDIG.allows(self.bytes[self.pos + 1])
                    || !table::HEXDIG.allows(self.bytes[self.pos + 2])
                {
                    return Err(Error::BadPctHexDig);
                }
                self.pos += 3;
            } else if table.allows(x) {
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok(())
    }
}

/// Parses a URI reference into a [`Parts`] table.
pub(crate) fn parse(bytes: &[u8], kind: Kind) -> Result<Parts> {
    if bytes.len() > MAX_LENGTH {
        return Err(Error::TooLarge);
    }
    let mut p = Parser { bytes, pos: 0 };

    // scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
    let mut scheme_end = None;
    p.scan(table::SCHEME)?;
    if p.peek() == Some(b':') && p.pos != 0 && bytes[0].is_ascii_alphabetic() {
        p.pos += 1;
        scheme_end = Some(p.pos);
    } else {
        // Scheme characters are valid in a path; rescan below.
        p.pos = 0;
    }

    match kind {
        Kind::Uri | Kind::Absolute if scheme_end.is_none() => return Err(Error::InvalidScheme),
        Kind::Relative if scheme_end.is_some() => return Err(Error::InvalidScheme),
        _ => {}
    }

    // authority = [ userinfo "@" ] host [ ":" port ]
    let mut auth = None;
    if p.read_str(b"//") {
        let astart = p.pos;
        let aend = bytes[astart..]
            .iter()
            .position(|&x| matches!(x, b'/' | b'?' | b'#'))
            .map_or(bytes.len(), |i| astart + i);
        auth = Some((astart, authority(&bytes[astart..aend])?));
        p.pos = aend;
    }

    // With an authority the path is abempty by construction: the
    // authority scan stopped at '/', '?', '#', or the end of input.
    let path_start = p.pos;
    if auth.is_none() && scheme_end.is_none() {
        // In a relative reference, the first path segment must not
        // contain a colon.
        p.scan(table::SEGMENT_NZ_NC)?;
        if p.peek() == Some(b':') {
            return Err(Error::InvalidPath);
        }
    }
    p.scan(table::PATH)?;
    let path_end = p.pos;
    if !matches!(p.peek(), None | Some(b'?' | b'#')) {
        return Err(Error::InvalidPath);
    }

    if p.read_str(b"?") {
        p.scan(table::QUERY)?;
        if !matches!(p.peek(), None | Some(b'#')) {
            return Err(Error::InvalidQuery);
        }
    }

    let mut frag_start = None;
    if p.peek() == Some(b'#') {
        if kind == Kind::Absolute {
            return Err(Error::InvalidFragment);
        }
        frag_start = Some(p.pos);
        p.pos += 1;
        p.scan(table::FRAGMENT)?;
        if p.peek().is_some() {
            return Err(Error::InvalidFragment);
        }
    }

    let len = bytes.len();
    let mut parts = Parts::default();
    let o = &mut parts.offset;
    o[id::USER] = scheme_end.unwrap_or(0);
    match auth {
        Some((base, a)) => {
            o[id::PASS] = base
                + a.userinfo_colon
                    .or(a.userinfo_at)
                    .unwrap_or(a.host_bounds.0);
            o[id::HOST] = base + a.host_bounds.0;
            o[id::PORT] = base + a.host_bounds.1;
            parts.host = a.host;
            parts.port_number = a.port_number;
        }
        None => {
            o[id::PASS] = o[id::USER];
            o[id::HOST] = o[id::USER];
            o[id::PORT] = o[id::USER];
        }
    }
    o[id::PATH] = path_start;
    o[id::QUERY] = path_end;
    o[id::FRAGMENT] = frag_start.unwrap_or(len);
    o[id::END] = len;
    Ok(parts)
}

/// Parses an authority, which must span the whole input.
pub(crate) fn parse_authority(s: &[u8]) -> Result<Authority> {
    if s.len() > MAX_LENGTH {
        return Err(Error::TooLarge);
    }
    authority(s)
}

fn authority(s: &[u8]) -> Result<Authority> {
    // A raw '@' is not allowed past the userinfo, so the first one is
    // the delimiter.
    let at = s.iter().position(|&x| x == b'@');
    let (userinfo_colon, host_start) = match at {
        Some(i) => {
            validate_bytes(&s[..i], table::USERINFO)
                .map_err(|e| soften(e, Error::InvalidAuthority))?;
            (s[..i].iter().position(|&x| x == b':'), i + 1)
        }
        None => (None, 0),
    };

    let rest = &s[host_start..];
    let host_len = if rest.first() == Some(&b'[') {
        rest.iter()
            .position(|&x| x == b']')
            .ok_or(Error::InvalidHost)?
            + 1
    } else {
        rest.iter().position(|&x| x == b':').unwrap_or(rest.len())
    };
    let host = parse_host(&rest[..host_len])?;

    let host_end = host_start + host_len;
    let port_number = match s.get(host_end) {
        None => None,
        Some(&b':') => {
            let digits = &s[host_end + 1..];
            if !digits.iter().all(u8::is_ascii_digit) {
                return Err(Error::InvalidPort);
            }
            // A port that overflows u16 is kept as a string with no
            // numeric value.
            str::from_utf8(digits).ok().and_then(|d| d.parse().ok())
        }
        Some(_) => return Err(Error::InvalidAuthority),
    };

    Ok(Authority {
        userinfo_colon,
        userinfo_at: at,
        host_bounds: (host_start, host_end),
        host,
        port_number,
    })
}

/// Parses a host: `IP-literal / IPv4address / reg-name`.
pub(crate) fn parse_host(s: &[u8]) -> Result<HostData> {
    if s.first() == Some(&b'[') {
        if s.last() != Some(&b']') || s.len() < 2 {
            return Err(Error::InvalidHost);
        }
        let inner = &s[1..s.len() - 1];
        if matches!(inner.first().copied(), Some(b'v' | b'V')) {
            validate_ipv_future(&inner[1..])?;
            Ok(HostData::IpvFuture)
        } else {
            ip::parse_v6(inner)
                .map(HostData::Ipv6)
                .ok_or(Error::InvalidHost)
        }
    } else if let Some(addr) = ip::parse_v4(s) {
        Ok(HostData::Ipv4(addr))
    } else {
        validate_bytes(s, table::REG_NAME).map_err(|e| soften(e, Error::InvalidHost))?;
        Ok(HostData::RegName)
    }
}

// IPvFuture = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" ),
// with the leading "v" already consumed.
fn validate_ipv_future(s: &[u8]) -> Result<()> {
    let dot = s.iter().position(|&x| x == b'.').ok_or(Error::InvalidHost)?;
    if dot == 0
        || dot + 1 == s.len()
        || !s[..dot].iter().all(|&x| table::HEXDIG.allows(x))
        || !s[dot + 1..].iter().all(|&x| table::IPV_FUTURE.allows(x))
    {
        return Err(Error::InvalidHost);
    }
    Ok(())
}

/// Keeps percent-encoding errors intact, replacing others with `kind`.
fn soften(e: Error, kind: Error) -> Error {
    match e {
        Error::BadPctHexDig => e,
        _ => kind,
    }
}

/// Checks that `s` matches the scheme production.
pub(crate) fn validate_scheme(s: &[u8]) -> Result<()> {
    match s.first() {
        Some(x) if x.is_ascii_alphabetic() => {}
        _ => return Err(Error::InvalidScheme),
    }
    if s.iter().all(|&x| table::SCHEME.allows(x)) {
        Ok(())
    } else {
        Err(Error::InvalidScheme)
    }
}
