//! Error types.

/// An error produced when parsing or mutating a [`Url`].
///
/// Input-validation errors come with the strong guarantee: when a
/// fallible operation returns `Err`, the container is byte-identical
/// to its state before the call.
///
/// [`Url`]: crate::Url
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The scheme does not match `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
    #[error("invalid scheme")]
    InvalidScheme,
    /// The authority does not match `[ userinfo "@" ] host [ ":" port ]`.
    #[error("invalid authority")]
    InvalidAuthority,
    /// The host does not parse as an IP literal, IPv4 address, or registered name.
    #[error("invalid host")]
    InvalidHost,
    /// The port contains a character other than a decimal digit.
    ///
    /// A port that is all digits but overflows `u16` is *not* an error:
    /// the string is stored and the numeric port is left unset.
    #[error("invalid port")]
    InvalidPort,
    /// The path violates the production required by its context, e.g. a
    /// path containing a character not allowed in any path production.
    #[error("invalid path")]
    InvalidPath,
    /// The query contains a disallowed character.
    #[error("invalid query")]
    InvalidQuery,
    /// The fragment contains a disallowed character.
    #[error("invalid fragment")]
    InvalidFragment,
    /// A raw byte outside the allowed set appeared in percent-encoded input.
    #[error("illegal reserved character in encoded string")]
    IllegalReservedChar,
    /// A `%` was not followed by two hexadecimal digits.
    #[error("incomplete or non-hexadecimal percent-encoded octet")]
    BadPctHexDig,
    /// The requested length exceeds the implementation maximum.
    #[error("maximum URL length exceeded")]
    TooLarge,
}

pub(crate) type Result<T, E = Error> = core::result::Result<T, E>;
