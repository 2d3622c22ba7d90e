//! Read-only view of one parsed inbound request.

use std::net::SocketAddr;
use std::ops::BitOr;

use bytes::Bytes;
use compact_str::CompactString;
use derive_more::Deref;
use fnv::FnvHashMap;
use http::Uri;
use strum::EnumString;

/// Request method. Discriminants are single bits so a set of methods can be
/// expressed as a [`Methods`] mask for route matching.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumString)]
pub enum Method {
    Unknown = 0x0000,
    #[strum(serialize = "GET")]
    Get = 0x0001,
    #[strum(serialize = "PUT")]
    Put = 0x0002,
    #[strum(serialize = "DELETE")]
    Delete = 0x0004,
    #[strum(serialize = "POST")]
    Post = 0x0008,
    #[strum(serialize = "HEAD")]
    Head = 0x0010,
    #[strum(serialize = "OPTIONS")]
    Options = 0x0020,
    #[strum(serialize = "PATCH")]
    Patch = 0x0040,
    #[strum(serialize = "CONNECT")]
    Connect = 0x0080,
}

impl Method {
    fn bit(self) -> u16 {
        self as u16
    }
}

/// Bitmask over [`Method`] for "any of" matching.
///
/// `Method::Unknown` carries no bit: it is never contained in any set,
/// including [`Methods::ALL`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Methods(u16);

impl Methods {
    pub const ALL: Methods = Methods(0x00ff);

    pub const fn empty() -> Self {
        Methods(0)
    }

    pub fn contains(self, method: Method) -> bool {
        let bit = method.bit();
        bit != 0 && self.0 & bit == bit
    }

    pub fn insert(&mut self, method: Method) {
        self.0 |= method.bit();
    }
}

impl From<Method> for Methods {
    fn from(method: Method) -> Self {
        Methods(method.bit())
    }
}

impl BitOr for Methods {
    type Output = Methods;

    fn bitor(self, rhs: Methods) -> Methods {
        Methods(self.0 | rhs.0)
    }
}

impl BitOr<Method> for Methods {
    type Output = Methods;

    fn bitor(self, rhs: Method) -> Methods {
        Methods(self.0 | rhs.bit())
    }
}

impl BitOr for Method {
    type Output = Methods;

    fn bitor(self, rhs: Method) -> Methods {
        Methods(self.bit() | rhs.bit())
    }
}

/// Parsed query parameters, insertion-ordered. Lookup returns the first
/// match; repeated keys stay visible through the `Deref` to the pair slice.
#[derive(Debug, Default, Deref)]
pub struct Query(Vec<(CompactString, CompactString)>);

impl Query {
    /// Splits a raw query string (`a=1&b=2&flag`) into pairs. A key with no
    /// `=` maps to the empty value.
    pub fn parse(raw: &str) -> Self {
        let pairs = raw
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (CompactString::from(key), CompactString::from(value)),
                None => (CompactString::from(pair), CompactString::new("")),
            })
            .collect();
        Self(pairs)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }
}

/// One parsed inbound request. Immutable after construction; handler code
/// receives it by reference and only ever queries it.
///
/// Constructed by server infrastructure (see [`crate::parse`]), never by
/// handlers. The remote address is a mandatory typed parameter, so the
/// "request must know its peer" contract is enforced at compile time.
#[derive(Debug)]
pub struct Request {
    method: Method,
    url: Uri,
    query: Query,
    headers: FnvHashMap<CompactString, Vec<CompactString>>,
    body: Bytes,
    remote_address: SocketAddr,
}

impl Request {
    pub(crate) fn from_parts(
        method: Method,
        url: Uri,
        query: Query,
        headers: FnvHashMap<CompactString, Vec<CompactString>>,
        body: Bytes,
        remote_address: SocketAddr,
    ) -> Self {
        Self {
            method,
            url,
            query,
            headers,
            body,
            remote_address,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &Uri {
        &self.url
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn headers(&self) -> &FnvHashMap<CompactString, Vec<CompactString>> {
        &self.headers
    }

    /// First header value for an exact byte-equal `key`, `None` if absent.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.headers
            .get(key)
            .and_then(|values| values.first())
            .map(|v| v.as_str())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn remote_address(&self) -> SocketAddr {
        self.remote_address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn method_parses_wire_tokens() {
        assert_eq!(Method::from_str("GET").unwrap(), Method::Get);
        assert_eq!(Method::from_str("PATCH").unwrap(), Method::Patch);
        assert!(Method::from_str("BREW").is_err());
    }

    #[test]
    fn methods_mask_matches_any_of() {
        let allowed = Method::Get | Method::Head;
        assert!(allowed.contains(Method::Get));
        assert!(allowed.contains(Method::Head));
        assert!(!allowed.contains(Method::Post));
    }

    #[test]
    fn unknown_is_never_in_a_set() {
        assert!(!Methods::ALL.contains(Method::Unknown));
        let mut set = Methods::empty();
        set.insert(Method::Unknown);
        assert_eq!(set, Methods::empty());
    }

    #[test]
    fn all_contains_every_real_method() {
        for method in [
            Method::Get,
            Method::Put,
            Method::Delete,
            Method::Post,
            Method::Head,
            Method::Options,
            Method::Patch,
            Method::Connect,
        ] {
            assert!(Methods::ALL.contains(method));
        }
    }

    #[test]
    fn query_first_match_and_flags() {
        let query = Query::parse("a=1&b=2&a=3&flag");
        assert_eq!(query.get("a"), Some("1"));
        assert_eq!(query.get("b"), Some("2"));
        assert_eq!(query.get("flag"), Some(""));
        assert_eq!(query.get("missing"), None);
        assert_eq!(query.len(), 4);
    }

    #[test]
    fn empty_query_has_no_pairs() {
        let query = Query::parse("");
        assert!(query.is_empty());
    }
}
