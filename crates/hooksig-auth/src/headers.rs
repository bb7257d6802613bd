//! Header lookup and signed-headers directive parsing.
//!
//! Header names are case-insensitive, so [`HeaderLookup`] normalizes every
//! name to ASCII lowercase when the request is ingested. The directive that
//! names the signed headers is kept separately in [`SignedHeaders`], in the
//! exact order the sender listed them.

use std::collections::HashMap;

/// Request headers keyed by lowercase name.
///
/// Values are kept as raw bytes so that non-UTF-8 header values still take
/// part in canonicalization unchanged. When a name occurs more than once the
/// last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderLookup {
    inner: HashMap<String, Vec<u8>>,
}

impl HeaderLookup {
    /// Create an empty lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, replacing any earlier value stored under the same name.
    pub fn insert(&mut self, name: &str, value: impl Into<Vec<u8>>) {
        self.inner.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Look up a header value by name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.inner
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
    }

    /// Look up a header value as UTF-8 text.
    ///
    /// Returns `None` if the header is absent or its value is not valid UTF-8.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| std::str::from_utf8(v).ok())
    }

    /// Number of distinct header names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no headers are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderLookup
where
    N: AsRef<str>,
    V: Into<Vec<u8>>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut lookup = Self::new();
        for (name, value) in iter {
            lookup.insert(name.as_ref(), value);
        }
        lookup
    }
}

impl From<&http::HeaderMap> for HeaderLookup {
    /// `HeaderMap` yields repeated names in insertion order, so the last
    /// occurrence of a name ends up in the lookup.
    fn from(headers: &http::HeaderMap) -> Self {
        headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_bytes()))
            .collect()
    }
}

/// Ordered list of header names taken from the signed-headers directive.
///
/// The directive value is split on `,` and nothing else: names are neither
/// trimmed, sorted nor deduplicated. An empty directive names no headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedHeaders(Vec<String>);

impl SignedHeaders {
    /// Parse a raw directive value.
    ///
    /// # Examples
    ///
    /// ```
    /// use hooksig_auth::headers::SignedHeaders;
    ///
    /// let signed = SignedHeaders::parse("content-type,x-contentful-topic");
    /// assert_eq!(signed.names(), ["content-type", "x-contentful-topic"]);
    /// assert!(SignedHeaders::parse("").is_empty());
    /// ```
    #[must_use]
    pub fn parse(directive: &str) -> Self {
        if directive.is_empty() {
            return Self::default();
        }
        Self(directive.split(',').map(str::to_owned).collect())
    }

    /// The header names in directive order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Whether the directive names no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
