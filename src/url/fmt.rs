use super::Url;
use crate::error::Error;
use std::{cmp::Ordering, fmt, hash, str::FromStr};

impl fmt::Display for Url {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl fmt::Debug for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Url")
            .field("scheme", &self.scheme())
            .field("authority", &self.encoded_authority())
            .field("host_type", &self.host_type())
            .field("path", &self.encoded_path())
            .field("query", &self.encoded_query())
            .field("fragment", &self.encoded_fragment())
            .finish()
    }
}

impl FromStr for Url {
    type Err = Error;

    /// Equivalent to [`parse`](Url::parse).
    #[inline]
    fn from_str(s: &str) -> Result<Url, Error> {
        Url::parse(s)
    }
}

impl TryFrom<&str> for Url {
    type Error = Error;

    /// Equivalent to [`parse`](Url::parse).
    #[inline]
    fn try_from(s: &str) -> Result<Url, Error> {
        Url::parse(s)
    }
}

impl PartialEq for Url {
    #[inline]
    fn eq(&self, other: &Url) -> bool {
        self.as_str() == other.as_str()
    }
}

impl PartialEq<str> for Url {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Url {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<Url> for str {
    #[inline]
    fn eq(&self, other: &Url) -> bool {
        self == other.as_str()
    }
}

impl Eq for Url {}

impl hash::Hash for Url {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialOrd for Url {
    fn partial_cmp(&self, other: &Url) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Url {
    fn cmp(&self, other: &Url) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl AsRef<str> for Url {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Url {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Url {
    fn deserialize<D>(deserializer: D) -> Result<Url, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize<'_>>::deserialize(deserializer)?;
        Url::parse(&s).map_err(serde::de::Error::custom)
    }
}
