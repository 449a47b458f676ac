//! Lazy iteration over path segments and query parameters.

use super::Url;
use crate::encoding::EStr;
use std::{iter::FusedIterator, str};

impl Url {
    /// Returns an iterator over the encoded segments of the path.
    ///
    /// An empty path and the bare `"/"` yield no segments. A leading
    /// `"."` segment inserted to disambiguate the path is skipped;
    /// percent-encoded slashes do not split segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlbuf::Url;
    ///
    /// let url = Url::parse("http://h/p%2fq")?;
    /// assert!(url.segments().eq(["p%2fq"]));
    ///
    /// let url = Url::parse("x:y:z/")?;
    /// assert!(url.segments().eq(["y:z", ""]));
    ///
    /// assert_eq!(Url::parse("/")?.segments().count(), 0);
    /// # Ok::<_, urlbuf::Error>(())
    /// ```
    #[must_use]
    pub fn segments(&self) -> Segments<'_> {
        Segments::new(self.encoded_path().as_str())
    }

    /// Returns the number of path segments, in agreement with
    /// [`segments`](Self::segments).
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.parts.nseg
    }

    /// Returns the `i`-th encoded segment of the path.
    ///
    /// A negative index counts from the back: `-1` is the last
    /// segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlbuf::Url;
    ///
    /// let url = Url::parse("/path/to/the/file.txt")?;
    /// assert_eq!(url.encoded_segment(0).unwrap(), "path");
    /// assert_eq!(url.encoded_segment(-1).unwrap(), "file.txt");
    /// assert_eq!(url.encoded_segment(-2).unwrap(), "the");
    /// assert_eq!(url.encoded_segment(4), None);
    /// # Ok::<_, urlbuf::Error>(())
    /// ```
    #[must_use]
    pub fn encoded_segment(&self, i: isize) -> Option<&EStr> {
        let mut segments = self.segments();
        if i >= 0 {
            segments.nth(i as usize)
        } else {
            segments.nth_back((-(i + 1)) as usize)
        }
    }

    /// Returns an iterator over the `key[=value]` parameters of the
    /// query.
    ///
    /// Parameters are separated by `'&'`; a key without `'='` yields
    /// no value. An absent query yields no parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlbuf::Url;
    ///
    /// let url = Url::parse("http://h/?a=1&a=2&b=3")?;
    /// assert_eq!(url.param_count(), 3);
    /// assert_eq!(url.params().count_of("a"), 2);
    ///
    /// let first = url.params().next().unwrap();
    /// assert_eq!(first.key, "a");
    /// assert_eq!(first.value.unwrap(), "1");
    /// # Ok::<_, urlbuf::Error>(())
    /// ```
    #[must_use]
    pub fn params(&self) -> Params<'_> {
        Params {
            inner: self.encoded_query().map(|q| q.as_str().split('&')),
        }
    }

    /// Returns the number of query parameters, in agreement with
    /// [`params`](Self::params).
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.parts.nparam
    }

    /// Recomputes the segment and parameter counts from the buffer.
    pub(crate) fn sync_counts(&mut self) {
        let nseg = self.segments().count();
        let nparam = match self.encoded_query() {
            Some(q) => q.as_str().split('&').count(),
            None => 0,
        };
        self.parts.nseg = nseg;
        self.parts.nparam = nparam;
    }
}

/// An iterator over the encoded segments of a path.
///
/// This struct is created by [`Url::segments`].
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    inner: Option<str::Split<'a, char>>,
}

impl<'a> Segments<'a> {
    fn new(path: &'a str) -> Segments<'a> {
        if path.is_empty() || path == "/" {
            return Segments { inner: None };
        }
        let mut rest = path.strip_prefix('/').unwrap_or(path);
        // A "./" prefix only disambiguates the path; the "." is not a
        // segment of its own.
        if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        }
        Segments {
            inner: Some(rest.split('/')),
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a EStr;

    fn next(&mut self) -> Option<&'a EStr> {
        self.inner.as_mut()?.next().map(EStr::new_validated)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Some(split) => split.size_hint(),
            None => (0, Some(0)),
        }
    }
}

impl<'a> DoubleEndedIterator for Segments<'a> {
    fn next_back(&mut self) -> Option<&'a EStr> {
        self.inner.as_mut()?.next_back().map(EStr::new_validated)
    }
}

impl FusedIterator for Segments<'_> {}

/// One `key[=value]` pair of a query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Param<'a> {
    /// The encoded key, before the first `'='`.
    pub key: &'a EStr,
    /// The encoded value, or `None` for a key with no `'='`.
    pub value: Option<&'a EStr>,
}

/// An iterator over the parameters of a query.
///
/// This struct is created by [`Url::params`].
#[derive(Clone, Debug)]
pub struct Params<'a> {
    inner: Option<str::Split<'a, char>>,
}

impl<'a> Params<'a> {
    /// Counts the parameters whose encoded key equals `key`.
    #[must_use]
    pub fn count_of(self, key: &str) -> usize {
        self.filter(|param| param.key == key).count()
    }
}

impl<'a> Iterator for Params<'a> {
    type Item = Param<'a>;

    fn next(&mut self) -> Option<Param<'a>> {
        let pair = self.inner.as_mut()?.next()?;
        Some(match pair.split_once('=') {
            Some((key, value)) => Param {
                key: EStr::new_validated(key),
                value: Some(EStr::new_validated(value)),
            },
            None => Param {
                key: EStr::new_validated(pair),
                value: None,
            },
        })
    }
}

impl FusedIterator for Params<'_> {}
