//! Known URL schemes.

use std::fmt;

/// Identifies a well-known URL scheme.
///
/// Scheme names are *case-insensitive* (see [Section 3.1 of RFC
/// 3986][scheme]); the lookup accepts any case, while [`as_str`]
/// returns the normalized lowercase name.
///
/// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
/// [`as_str`]: Self::as_str
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// No scheme is present.
    #[default]
    None,
    /// File Transfer Protocol.
    Ftp,
    /// Host-specific file names.
    File,
    /// Hypertext Transfer Protocol.
    Http,
    /// Hypertext Transfer Protocol Secure.
    Https,
    /// WebSocket Protocol.
    Ws,
    /// WebSocket Protocol Secure.
    Wss,
    /// A scheme is present but not among the well-known ones.
    Unknown,
}

impl Scheme {
    /// Looks up a scheme name case-insensitively.
    ///
    /// An empty string maps to [`Scheme::None`]; an unrecognized name
    /// maps to [`Scheme::Unknown`].
    ///
    /// # Examples
    ///
    /// ```
    /// use urlbuf::Scheme;
    ///
    /// assert_eq!(Scheme::lookup("wss"), Scheme::Wss);
    /// assert_eq!(Scheme::lookup("WS"), Scheme::Ws);
    /// assert_eq!(Scheme::lookup("magnet"), Scheme::Unknown);
    /// assert_eq!(Scheme::lookup(""), Scheme::None);
    /// ```
    #[must_use]
    pub fn lookup(s: &str) -> Scheme {
        const TABLE: &[(&str, Scheme)] = &[
            ("ftp", Scheme::Ftp),
            ("file", Scheme::File),
            ("http", Scheme::Http),
            ("https", Scheme::Https),
            ("ws", Scheme::Ws),
            ("wss", Scheme::Wss),
        ];
        if s.is_empty() {
            return Scheme::None;
        }
        TABLE
            .iter()
            .find(|(name, _)| eq_lowercase(s, name))
            .map_or(Scheme::Unknown, |&(_, id)| id)
    }

    /// Returns the normalized scheme name.
    ///
    /// [`Scheme::None`] and [`Scheme::Unknown`] have no name and yield
    /// the empty string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::None | Scheme::Unknown => "",
            Scheme::Ftp => "ftp",
            Scheme::File => "file",
            Scheme::Http => "http",
            Scheme::Https => "https",
            Scheme::Ws => "ws",
            Scheme::Wss => "wss",
        }
    }

    /// Returns the default port of the scheme, if it has one.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlbuf::Scheme;
    ///
    /// assert_eq!(Scheme::Https.default_port(), Some(443));
    /// assert_eq!(Scheme::File.default_port(), None);
    /// ```
    #[must_use]
    pub fn default_port(self) -> Option<u16> {
        match self {
            Scheme::Ftp => Some(21),
            Scheme::Http | Scheme::Ws => Some(80),
            Scheme::Https | Scheme::Wss => Some(443),
            _ => None,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks a scheme name case-insensitively against a lowercase one.
///
/// The characters allowed in a scheme are letters, digits, `+`, `-`,
/// and `.`, whose ASCII codes let us simply set the sixth bit and
/// compare.
pub(crate) fn eq_lowercase(s: &str, lower: &str) -> bool {
    const ASCII_CASE_MASK: u8 = 0b010_0000;
    s.len() == lower.len()
        && s.bytes()
            .zip(lower.bytes())
            .all(|(a, b)| a | ASCII_CASE_MASK == b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_case_insensitive() {
        assert_eq!(Scheme::lookup("HTTP"), Scheme::Http);
        assert_eq!(Scheme::lookup("hTtPs"), Scheme::Https);
        assert_eq!(Scheme::lookup("FILE"), Scheme::File);
        assert_eq!(Scheme::lookup("ftps"), Scheme::Unknown);
        assert_eq!(Scheme::lookup("ftp"), Scheme::Ftp);
    }

    #[test]
    fn round_trip() {
        for id in [
            Scheme::Ftp,
            Scheme::File,
            Scheme::Http,
            Scheme::Https,
            Scheme::Ws,
            Scheme::Wss,
        ] {
            assert_eq!(Scheme::lookup(id.as_str()), id);
        }
        assert_eq!(Scheme::None.as_str(), "");
        assert_eq!(Scheme::Unknown.as_str(), "");
    }
}
