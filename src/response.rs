//! Mutable outbound-response model.
//!
//! Built by handler code through any of the construction paths, mutated
//! freely, then serialized exactly once through [`Response::write`].

use std::fs;
use std::path::Path;

use bytes::Bytes;
use compact_str::CompactString;
use log::warn;
use serde::Serialize;
use strum::{EnumMessage, FromRepr};

use crate::headers::{HeaderMap, CONTENT_LENGTH, CONTENT_TYPE};
use crate::mime;
use crate::wire::Responder;

/// Response status, integer-backed per the registry.
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromRepr, EnumMessage)]
#[repr(u16)]
pub enum StatusCode {
    #[strum(message = "Continue")]
    Continue = 100,
    #[strum(message = "Switching Protocols")]
    SwitchingProtocols = 101,
    #[strum(message = "Processing")]
    Processing = 102,
    #[strum(message = "Early Hints")]
    EarlyHints = 103,
    #[strum(message = "OK")]
    Ok = 200,
    #[strum(message = "Created")]
    Created = 201,
    #[strum(message = "Accepted")]
    Accepted = 202,
    #[strum(message = "Non-Authoritative Information")]
    NonAuthoritativeInformation = 203,
    #[strum(message = "No Content")]
    NoContent = 204,
    #[strum(message = "Reset Content")]
    ResetContent = 205,
    #[strum(message = "Partial Content")]
    PartialContent = 206,
    #[strum(message = "Multi-Status")]
    MultiStatus = 207,
    #[strum(message = "Already Reported")]
    AlreadyReported = 208,
    #[strum(message = "IM Used")]
    ImUsed = 226,
    #[strum(message = "Multiple Choices")]
    MultipleChoices = 300,
    #[strum(message = "Moved Permanently")]
    MovedPermanently = 301,
    #[strum(message = "Found")]
    Found = 302,
    #[strum(message = "See Other")]
    SeeOther = 303,
    #[strum(message = "Not Modified")]
    NotModified = 304,
    #[strum(message = "Use Proxy")]
    UseProxy = 305,
    #[strum(message = "Temporary Redirect")]
    TemporaryRedirect = 307,
    #[strum(message = "Permanent Redirect")]
    PermanentRedirect = 308,
    #[strum(message = "Bad Request")]
    BadRequest = 400,
    #[strum(message = "Unauthorized")]
    Unauthorized = 401,
    #[strum(message = "Payment Required")]
    PaymentRequired = 402,
    #[strum(message = "Forbidden")]
    Forbidden = 403,
    #[strum(message = "Not Found")]
    NotFound = 404,
    #[strum(message = "Method Not Allowed")]
    MethodNotAllowed = 405,
    #[strum(message = "Not Acceptable")]
    NotAcceptable = 406,
    #[strum(message = "Proxy Authentication Required")]
    ProxyAuthenticationRequired = 407,
    #[strum(message = "Request Timeout")]
    RequestTimeout = 408,
    #[strum(message = "Conflict")]
    Conflict = 409,
    #[strum(message = "Gone")]
    Gone = 410,
    #[strum(message = "Length Required")]
    LengthRequired = 411,
    #[strum(message = "Precondition Failed")]
    PreconditionFailed = 412,
    #[strum(message = "Payload Too Large")]
    PayloadTooLarge = 413,
    #[strum(message = "URI Too Long")]
    UriTooLong = 414,
    #[strum(message = "Unsupported Media Type")]
    UnsupportedMediaType = 415,
    #[strum(message = "Range Not Satisfiable")]
    RangeNotSatisfiable = 416,
    #[strum(message = "Expectation Failed")]
    ExpectationFailed = 417,
    #[strum(message = "I'm a teapot")]
    ImATeapot = 418,
    #[strum(message = "Misdirected Request")]
    MisdirectedRequest = 421,
    #[strum(message = "Unprocessable Entity")]
    UnprocessableEntity = 422,
    #[strum(message = "Locked")]
    Locked = 423,
    #[strum(message = "Failed Dependency")]
    FailedDependency = 424,
    #[strum(message = "Too Early")]
    TooEarly = 425,
    #[strum(message = "Upgrade Required")]
    UpgradeRequired = 426,
    #[strum(message = "Precondition Required")]
    PreconditionRequired = 428,
    #[strum(message = "Too Many Requests")]
    TooManyRequests = 429,
    #[strum(message = "Request Header Fields Too Large")]
    RequestHeaderFieldsTooLarge = 431,
    #[strum(message = "Unavailable For Legal Reasons")]
    UnavailableForLegalReasons = 451,
    #[strum(message = "Internal Server Error")]
    InternalServerError = 500,
    #[strum(message = "Not Implemented")]
    NotImplemented = 501,
    #[strum(message = "Bad Gateway")]
    BadGateway = 502,
    #[strum(message = "Service Unavailable")]
    ServiceUnavailable = 503,
    #[strum(message = "Gateway Timeout")]
    GatewayTimeout = 504,
    #[strum(message = "HTTP Version Not Supported")]
    HttpVersionNotSupported = 505,
    #[strum(message = "Variant Also Negotiates")]
    VariantAlsoNegotiates = 506,
    #[strum(message = "Insufficient Storage")]
    InsufficientStorage = 507,
    #[strum(message = "Loop Detected")]
    LoopDetected = 508,
    #[strum(message = "Not Extended")]
    NotExtended = 510,
    #[strum(message = "Network Authentication Required")]
    NetworkAuthenticationRequired = 511,
}

impl StatusCode {
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn reason(self) -> &'static str {
        self.get_message().unwrap_or("")
    }
}

/// One outbound response: status, ordered headers, owned body.
///
/// Deliberately not `Clone`; one instance belongs to one handler invocation
/// and is consumed by serialization. Moves transfer the body without copying.
#[derive(Debug)]
pub struct Response {
    status_code: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// Canonical constructor every other path funnels through. Sets
    /// `Content-Type` to `mime_type` unless it is empty, in which case no
    /// header is written at all.
    pub fn with_mime_type(
        mime_type: impl Into<CompactString>,
        data: impl Into<Bytes>,
        status: StatusCode,
    ) -> Self {
        let mut response = Self {
            status_code: status,
            headers: HeaderMap::new(),
            body: data.into(),
        };
        let mime_type = mime_type.into();
        if !mime_type.is_empty() {
            response.set_header(CONTENT_TYPE, mime_type);
        }
        response
    }

    /// Empty-bodied response carrying only a status.
    pub fn from_status(status: StatusCode) -> Self {
        Self::with_mime_type(mime::APPLICATION_X_EMPTY, Bytes::new(), status)
    }

    /// 200 response whose `Content-Type` is sniffed from the content itself.
    pub fn from_data(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        let mime_type = mime::for_data(&data);
        Self::with_mime_type(mime_type, data, StatusCode::Ok)
    }

    /// 200 response with a compact JSON body.
    ///
    /// A value that will not serialize degrades to an empty 500; response
    /// construction never fails.
    pub fn from_json<T: Serialize>(value: &T) -> Self {
        match simd_json::to_vec(value) {
            Ok(body) => Self::with_mime_type(mime::APPLICATION_JSON, body, StatusCode::Ok),
            Err(err) => {
                warn!("json body failed to serialize: {err}");
                Self::from_status(StatusCode::InternalServerError)
            }
        }
    }

    /// Response carrying the contents of `path`, typed from the file name
    /// and content. An unreadable file becomes a well-formed 404; the caller
    /// never sees the I/O failure. The handle is released on every path.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(err) => {
                warn!("cannot serve {}: {err}", path.display());
                return Self::from_status(StatusCode::NotFound);
            }
        };
        let mime_type = mime::for_file_name_and_data(path, &data);
        Self::with_mime_type(mime_type, data, StatusCode::Ok)
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn data(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// First `Content-Type` value, or the historical `text/html` default
    /// when none is set.
    pub fn mime_type(&self) -> &str {
        self.headers.first(CONTENT_TYPE).unwrap_or(mime::TEXT_HTML)
    }

    /// Appends a header, keeping any existing entries with the same name.
    pub fn add_header(&mut self, name: impl Into<CompactString>, value: impl Into<CompactString>) {
        self.headers.add(name, value);
    }

    /// Appends each pair in order with [`Response::add_header`] semantics.
    pub fn add_headers<N, V>(&mut self, pairs: impl IntoIterator<Item = (N, V)>)
    where
        N: Into<CompactString>,
        V: Into<CompactString>,
    {
        for (name, value) in pairs {
            self.add_header(name, value);
        }
    }

    /// Replaces every existing entry named `name` with the single new one.
    pub fn set_header(&mut self, name: impl Into<CompactString>, value: impl Into<CompactString>) {
        self.headers.set(name, value);
    }

    /// Applies the pairs left-to-right. Each name is cleared once, when it is
    /// first seen: pairs sharing a name within one batch accumulate instead
    /// of overwriting each other.
    pub fn set_headers<N, V>(&mut self, pairs: impl IntoIterator<Item = (N, V)>)
    where
        N: Into<CompactString>,
        V: Into<CompactString>,
    {
        let mut seen: Vec<CompactString> = Vec::new();
        for (name, value) in pairs {
            let name = name.into();
            if seen.iter().any(|n| *n == name) {
                self.headers.add(name, value);
            } else {
                self.headers.set(name.clone(), value);
                seen.push(name);
            }
        }
    }

    /// Removes every entry named `name`; no-op if there are none.
    pub fn clear_header(&mut self, name: &str) {
        self.headers.clear(name);
    }

    /// Empties the header collection. Status and body are untouched.
    pub fn clear_headers(&mut self) {
        self.headers.clear_all();
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.has(name)
    }

    /// True if some entry named `name` holds exactly `value`.
    pub fn has_header_value(&self, name: &str, value: &str) -> bool {
        self.headers.has_value(name, value)
    }

    /// Every value stored for `name`, in insertion order.
    pub fn headers(&self, name: &str) -> Vec<&str> {
        self.headers.values(name)
    }

    pub fn header_map(&self) -> &HeaderMap {
        &self.headers
    }

    /// Serializes this response onto `responder`.
    ///
    /// Emits nothing if the connection is already gone. Headers go out in
    /// stored order, duplicates and all; `Content-Length` is recomputed from
    /// the body here and always wins over anything the caller set.
    pub fn write(&self, responder: &mut impl Responder) {
        if !responder.is_connected() {
            return;
        }
        responder.write_status_line(self.status_code);
        for (name, value) in self.headers.iter() {
            responder.write_header(name, value);
        }
        responder.write_header(CONTENT_LENGTH, &self.body.len().to_string());
        responder.write_body(&self.body);
    }
}

impl From<&str> for Response {
    fn from(data: &str) -> Self {
        Self::from_data(Bytes::copy_from_slice(data.as_bytes()))
    }
}

impl From<&[u8]> for Response {
    fn from(data: &[u8]) -> Self {
        Self::from_data(Bytes::copy_from_slice(data))
    }
}

impl From<String> for Response {
    fn from(data: String) -> Self {
        Self::from_data(data)
    }
}

impl From<Vec<u8>> for Response {
    fn from(data: Vec<u8>) -> Self {
        Self::from_data(data)
    }
}

impl From<Bytes> for Response {
    fn from(data: Bytes) -> Self {
        Self::from_data(data)
    }
}

impl From<StatusCode> for Response {
    fn from(status: StatusCode) -> Self {
        Self::from_status(status)
    }
}
