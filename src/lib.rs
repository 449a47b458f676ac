#![warn(rust_2018_idioms, unreachable_pub, missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
//! A mutable URL container that strictly adheres to IETF [RFC 3986].
//!
//! A [`Url`] stores a percent-encoded URI reference contiguously and
//! supports reading and replacing every syntactic component (scheme,
//! userinfo, host, port, path, query, fragment) in place, keeping the
//! stored string a valid URI reference through every edit.
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986

/// Utilities for percent-encoding.
pub mod encoding;

/// IP address parsers as per RFC 3986.
pub mod ip;

mod error;
mod parser;
mod scheme;
mod url;

pub use crate::{error::Error, scheme::Scheme, url::*};
