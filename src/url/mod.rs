mod fmt;
mod iter;
pub(crate) mod parts;
mod resize;
mod set;

#[cfg(test)]
mod tests;

pub use iter::{Param, Params, Segments};
pub use parts::HostType;

use crate::{
    encoding::EStr,
    error::Result,
    parser::{self, Kind},
    scheme::Scheme,
};
use parts::{id, HostData, Parts};
use std::{
    borrow::Cow,
    ffi::CStr,
    net::{Ipv4Addr, Ipv6Addr},
    str,
};

/// A mutable URL.
///
/// A `Url` owns a syntactically valid, percent-encoded URI reference
/// ([RFC 3986]) in a single contiguous NUL-terminated byte buffer and
/// supports reading and replacing each component in place. Every
/// mutation preserves the global structural invariants: after any
/// successful operation the stored string still parses as a
/// `URI-reference`, with the required delimiters inserted or removed
/// as components come and go.
///
/// [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986
///
/// # Examples
///
/// Parse and extract components:
///
/// ```
/// use urlbuf::{HostType, Url};
///
/// let url = Url::parse("foo://user@example.com:8042/over/there?name=ferret#nose")?;
///
/// assert_eq!(url.scheme(), Some("foo"));
/// assert_eq!(url.encoded_user(), "user");
/// assert_eq!(url.encoded_host(), "example.com");
/// assert_eq!(url.host_type(), HostType::Name);
/// assert_eq!(url.port_number(), Some(8042));
/// assert_eq!(url.encoded_path(), "/over/there");
/// assert_eq!(url.encoded_query().unwrap(), "name=ferret");
/// assert_eq!(url.encoded_fragment().unwrap(), "nose");
/// # Ok::<_, urlbuf::Error>(())
/// ```
///
/// Build a URL from scratch:
///
/// ```
/// use urlbuf::Url;
///
/// let mut url = Url::new();
/// url.set_scheme("http")?;
/// url.set_host("example.com")?;
/// url.set_path("/a b")?;
/// url.set_query("x=1&y=2")?;
/// url.set_fragment("top")?;
///
/// assert_eq!(url.as_str(), "http://example.com/a%20b?x=1&y=2#top");
/// # Ok::<_, urlbuf::Error>(())
/// ```
#[derive(Clone)]
pub struct Url {
    /// The encoded URL followed by a NUL byte, or empty.
    buf: Vec<u8>,
    parts: Parts,
}

impl Url {
    /// Creates an empty URL.
    ///
    /// No allocation is performed until the first mutation.
    #[must_use]
    pub const fn new() -> Url {
        Url {
            buf: Vec::new(),
            parts: Parts {
                offset: [0; 9],
                host: HostData::None,
                port_number: None,
                nseg: 0,
                nparam: 0,
            },
        }
    }

    fn from_parts(s: &str, parts: Parts) -> Url {
        let mut buf = Vec::with_capacity(s.len() + 1);
        buf.extend_from_slice(s.as_bytes());
        buf.push(0);
        let mut url = Url { buf, parts };
        url.sync_counts();
        debug_assert!(url.invariants_hold());
        url
    }

    /// Parses a `URI-reference` into a `Url`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string does not match the
    /// [`URI-reference`][uri-ref] ABNF rule from RFC 3986.
    ///
    /// [uri-ref]: https://datatracker.ietf.org/doc/html/rfc3986#section-4.1
    pub fn parse(s: &str) -> Result<Url> {
        parser::parse(s.as_bytes(), Kind::Reference).map(|parts| Self::from_parts(s, parts))
    }

    /// Parses a `URI` into a `Url`, requiring a scheme.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string does not match the [`URI`][uri]
    /// ABNF rule from RFC 3986.
    ///
    /// [uri]: https://datatracker.ietf.org/doc/html/rfc3986#section-3
    pub fn parse_uri(s: &str) -> Result<Url> {
        parser::parse(s.as_bytes(), Kind::Uri).map(|parts| Self::from_parts(s, parts))
    }

    /// Parses a `relative-ref` into a `Url`, rejecting a scheme.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string does not match the
    /// [`relative-ref`][rel] ABNF rule from RFC 3986.
    ///
    /// [rel]: https://datatracker.ietf.org/doc/html/rfc3986#section-4.2
    pub fn parse_relative(s: &str) -> Result<Url> {
        parser::parse(s.as_bytes(), Kind::Relative).map(|parts| Self::from_parts(s, parts))
    }

    /// Parses an `absolute-URI` into a `Url`, requiring a scheme and
    /// rejecting a fragment.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string does not match the
    /// [`absolute-URI`][abs] ABNF rule from RFC 3986.
    ///
    /// [abs]: https://datatracker.ietf.org/doc/html/rfc3986#section-4.3
    pub fn parse_absolute(s: &str) -> Result<Url> {
        parser::parse(s.as_bytes(), Kind::Absolute).map(|parts| Self::from_parts(s, parts))
    }

    //--------------------------------------------
    //
    // Observers
    //
    //--------------------------------------------

    pub(crate) fn slice(&self, start: usize, end: usize) -> &str {
        // SAFETY: Every byte written to the buffer is validated or
        // percent-encoded ASCII.
        unsafe { str::from_utf8_unchecked(&self.buf[start..end]) }
    }

    fn eslice(&self, start: usize, end: usize) -> &EStr {
        EStr::new_validated(self.slice(start, end))
    }

    /// Returns the encoded URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.slice(0, self.len())
    }

    /// Returns the encoded URL as a NUL-terminated C string.
    #[must_use]
    pub fn as_c_str(&self) -> &CStr {
        if self.buf.is_empty() {
            // SAFETY: A single NUL byte.
            return unsafe { CStr::from_bytes_with_nul_unchecked(b"\0") };
        }
        // SAFETY: The buffer ends with its only NUL byte.
        unsafe { CStr::from_bytes_with_nul_unchecked(&self.buf) }
    }

    /// Returns the length of the encoded URL in bytes, excluding the
    /// trailing NUL.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.offset[id::END]
    }

    /// Checks whether the URL is the empty reference.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of bytes of allocated storage, including the
    /// slot for the trailing NUL.
    #[must_use]
    pub fn capacity_in_bytes(&self) -> usize {
        self.buf.capacity()
    }

    /// Grows the allocated storage to fit at least `n` more bytes of
    /// encoded URL, without changing the contents.
    pub fn reserve(&mut self, n: usize) {
        self.buf.reserve(n);
    }

    /// Resets the URL to the empty reference, keeping the allocated
    /// storage.
    pub fn clear(&mut self) {
        if !self.buf.is_empty() {
            self.buf.truncate(1);
            self.buf[0] = 0;
        }
        self.parts = Parts::default();
    }

    //--------------------------------------------
    //
    // Scheme
    //--------------------------------------------

    /// Returns the [scheme] component, without its trailing `':'`.
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    ///
    /// # Examples
    ///
    /// ```
    /// use urlbuf::Url;
    ///
    /// assert_eq!(Url::parse("http://example.com/")?.scheme(), Some("http"));
    /// assert_eq!(Url::parse("/path/to/file")?.scheme(), None);
    /// # Ok::<_, urlbuf::Error>(())
    /// ```
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        (self.parts.len(id::SCHEME) > 0)
            .then(|| self.slice(0, self.parts.end(id::SCHEME) - 1))
    }

    /// Checks whether a scheme component is present.
    #[must_use]
    pub fn has_scheme(&self) -> bool {
        self.parts.len(id::SCHEME) > 0
    }

    /// Returns the known-scheme identifier for the scheme, looked up
    /// case-insensitively.
    #[must_use]
    pub fn scheme_id(&self) -> Scheme {
        match self.scheme() {
            Some(s) => Scheme::lookup(s),
            None => Scheme::None,
        }
    }

    //--------------------------------------------
    //
    // Authority
    //--------------------------------------------

    /// Checks whether an authority component is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlbuf::Url;
    ///
    /// assert!(Url::parse("http://example.com/")?.has_authority());
    /// assert!(!Url::parse("mailto:user@example.com")?.has_authority());
    /// # Ok::<_, urlbuf::Error>(())
    /// ```
    #[must_use]
    pub fn has_authority(&self) -> bool {
        self.parts.len(id::USER) >= 2
    }

    /// Returns the [authority] component, without the leading `"//"`.
    ///
    /// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
    #[must_use]
    pub fn encoded_authority(&self) -> Option<&str> {
        self.has_authority()
            .then(|| self.slice(self.parts.start(id::USER) + 2, self.parts.start(id::PATH)))
    }

    /// Checks whether a userinfo subcomponent is present.
    ///
    /// A userinfo is present iff the authority contains an `'@'`.
    #[must_use]
    pub fn has_userinfo(&self) -> bool {
        self.parts.len(id::PASS) > 0
    }

    /// Returns the [userinfo] subcomponent, without the trailing `'@'`.
    ///
    /// [userinfo]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.1
    #[must_use]
    pub fn encoded_userinfo(&self) -> Option<&EStr> {
        self.has_userinfo()
            .then(|| self.eslice(self.parts.start(id::USER) + 2, self.parts.start(id::HOST) - 1))
    }

    /// Returns the decoded userinfo, with invalid UTF-8 replaced
    /// lossily.
    #[must_use]
    pub fn userinfo(&self) -> Option<Cow<'_, str>> {
        self.encoded_userinfo()
            .map(|s| s.decode().into_string_lossy())
    }

    /// Returns the user part of the userinfo.
    ///
    /// This is the userinfo up to its first `':'`; the empty string
    /// when no userinfo is present.
    #[must_use]
    pub fn encoded_user(&self) -> &EStr {
        if self.has_authority() {
            self.eslice(self.parts.start(id::USER) + 2, self.parts.start(id::PASS))
        } else {
            EStr::EMPTY
        }
    }

    /// Returns the decoded user, with invalid UTF-8 replaced lossily.
    #[must_use]
    pub fn user(&self) -> Cow<'_, str> {
        self.encoded_user().decode().into_string_lossy()
    }

    /// Checks whether a password is present, i.e. the userinfo
    /// contains a `':'`.
    ///
    /// The password may be present yet empty.
    #[must_use]
    pub fn has_password(&self) -> bool {
        self.parts.len(id::PASS) >= 2
    }

    /// Returns the password part of the userinfo.
    ///
    /// This is the userinfo past its first `':'`; the empty string
    /// when no password is present.
    #[must_use]
    pub fn encoded_password(&self) -> &EStr {
        if self.has_password() {
            self.eslice(self.parts.start(id::PASS) + 1, self.parts.start(id::HOST) - 1)
        } else {
            EStr::EMPTY
        }
    }

    /// Returns the decoded password, with invalid UTF-8 replaced
    /// lossily.
    #[must_use]
    pub fn password(&self) -> Cow<'_, str> {
        self.encoded_password().decode().into_string_lossy()
    }

    //--------------------------------------------
    //
    // Host and port
    //--------------------------------------------

    /// Returns the [host] subcomponent.
    ///
    /// An IP literal is returned with its enclosing brackets; the
    /// empty string is returned when no authority is present.
    ///
    /// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
    ///
    /// # Examples
    ///
    /// ```
    /// use urlbuf::Url;
    ///
    /// let url = Url::parse("ftp://user@[fe80::abcd]:6780/")?;
    /// assert_eq!(url.encoded_host(), "[fe80::abcd]");
    /// # Ok::<_, urlbuf::Error>(())
    /// ```
    #[must_use]
    pub fn encoded_host(&self) -> &EStr {
        self.eslice(self.parts.start(id::HOST), self.parts.start(id::PORT))
    }

    /// Returns the decoded host, with invalid UTF-8 replaced lossily.
    #[must_use]
    pub fn host(&self) -> Cow<'_, str> {
        self.encoded_host().decode().into_string_lossy()
    }

    /// Returns the kind of the stored host.
    #[must_use]
    pub fn host_type(&self) -> HostType {
        self.parts.host.host_type()
    }

    /// Returns the host as an IPv4 address, if it is one.
    #[must_use]
    pub fn ipv4_address(&self) -> Option<Ipv4Addr> {
        match self.parts.host {
            HostData::Ipv4(addr) => Some(addr),
            _ => None,
        }
    }

    /// Returns the host as an IPv6 address, if it is one.
    #[must_use]
    pub fn ipv6_address(&self) -> Option<Ipv6Addr> {
        match self.parts.host {
            HostData::Ipv6(addr) => Some(addr),
            _ => None,
        }
    }

    /// Checks whether a port subcomponent is present, possibly empty.
    #[must_use]
    pub fn has_port(&self) -> bool {
        self.parts.len(id::PORT) > 0
    }

    /// Returns the [port] subcomponent, without the leading `':'`.
    ///
    /// [port]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.3
    ///
    /// # Examples
    ///
    /// ```
    /// use urlbuf::Url;
    ///
    /// assert_eq!(Url::parse("ssh://device.local:4673/")?.port(), Some("4673"));
    /// assert_eq!(Url::parse("ssh://device.local:/")?.port(), Some(""));
    /// assert_eq!(Url::parse("ssh://device.local/")?.port(), None);
    /// # Ok::<_, urlbuf::Error>(())
    /// ```
    #[must_use]
    pub fn port(&self) -> Option<&str> {
        self.has_port()
            .then(|| self.slice(self.parts.start(id::PORT) + 1, self.parts.start(id::PATH)))
    }

    /// Returns the port as a number.
    ///
    /// This is `None` when the port is absent or empty, and also when
    /// the port string overflows `u16`, in which case the string form
    /// is still available through [`port`](Self::port).
    ///
    /// # Examples
    ///
    /// ```
    /// use urlbuf::Url;
    ///
    /// let url = Url::parse("http://h:0080/")?;
    /// assert_eq!(url.port(), Some("0080"));
    /// assert_eq!(url.port_number(), Some(80));
    ///
    /// let url = Url::parse("http://h:999999/")?;
    /// assert_eq!(url.port(), Some("999999"));
    /// assert_eq!(url.port_number(), None);
    /// # Ok::<_, urlbuf::Error>(())
    /// ```
    #[must_use]
    pub fn port_number(&self) -> Option<u16> {
        self.parts.port_number
    }

    //--------------------------------------------
    //
    // Path, query, and fragment
    //--------------------------------------------

    /// Returns the [path] component.
    ///
    /// The path is always present, although possibly empty.
    ///
    /// [path]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.3
    #[must_use]
    pub fn encoded_path(&self) -> &EStr {
        self.eslice(self.parts.start(id::PATH), self.parts.start(id::QUERY))
    }

    /// Returns the decoded path, with invalid UTF-8 replaced lossily.
    ///
    /// Note that a percent-encoded slash decodes into one, so this
    /// form is unsuitable for splitting into segments; use
    /// [`segments`](Self::segments) instead.
    #[must_use]
    pub fn path(&self) -> Cow<'_, str> {
        self.encoded_path().decode().into_string_lossy()
    }

    /// Checks whether the path starts with `'/'`.
    #[must_use]
    pub fn is_path_absolute(&self) -> bool {
        self.buf.get(self.parts.start(id::PATH)) == Some(&b'/')
            && self.parts.len(id::PATH) > 0
    }

    /// Checks whether a query component is present.
    #[must_use]
    pub fn has_query(&self) -> bool {
        self.parts.len(id::QUERY) > 0
    }

    /// Returns the [query] component, without the leading `'?'`.
    ///
    /// [query]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.4
    #[must_use]
    pub fn encoded_query(&self) -> Option<&EStr> {
        self.has_query()
            .then(|| self.eslice(self.parts.start(id::QUERY) + 1, self.parts.start(id::FRAGMENT)))
    }

    /// Returns the decoded query, with invalid UTF-8 replaced lossily.
    #[must_use]
    pub fn query(&self) -> Option<Cow<'_, str>> {
        self.encoded_query().map(|s| s.decode().into_string_lossy())
    }

    /// Checks whether a fragment component is present.
    #[must_use]
    pub fn has_fragment(&self) -> bool {
        self.parts.len(id::FRAGMENT) > 0
    }

    /// Returns the [fragment] component, without the leading `'#'`.
    ///
    /// [fragment]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.5
    #[must_use]
    pub fn encoded_fragment(&self) -> Option<&EStr> {
        self.has_fragment()
            .then(|| self.eslice(self.parts.start(id::FRAGMENT) + 1, self.parts.start(id::END)))
    }

    /// Returns the decoded fragment, with invalid UTF-8 replaced
    /// lossily.
    #[must_use]
    pub fn fragment(&self) -> Option<Cow<'_, str>> {
        self.encoded_fragment()
            .map(|s| s.decode().into_string_lossy())
    }
}

impl Default for Url {
    /// Creates an empty URL.
    fn default() -> Url {
        Url::new()
    }
}
