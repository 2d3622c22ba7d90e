//! Construction of a [`Request`] from one raw request buffer.
//!
//! This is the server-infrastructure side of the request view: handler code
//! never calls into here. One single-shot httparse pass over a fully-read
//! buffer; anything partial or malformed is an error for the caller, not a
//! response.

use std::net::SocketAddr;
use std::str::FromStr;

use bytes::Bytes;
use compact_str::CompactString;
use eyre::{bail, OptionExt};
use fnv::FnvHashMap;
use http::Uri;
use httparse::{ParserConfig, Status};
use log::debug;
use memchr::memchr;

use crate::request::{Method, Query, Request};
use crate::AnyResult;

const MAX_HEADERS: usize = 32;

/// Builds an immutable [`Request`] from a raw buffer and the peer address.
///
/// An unrecognized method token becomes [`Method::Unknown`] rather than an
/// error; routing decides what to do with it.
pub fn request_from_buffer(buffer: &[u8], remote_address: SocketAddr) -> AnyResult<Request> {
    let mut headers = [httparse::EMPTY_HEADER; MAX_HEADERS];
    let mut parsed = httparse::Request::new(&mut headers);
    let status = ParserConfig::default().parse_request(&mut parsed, buffer)?;

    let offset = match status {
        Status::Complete(offset) => offset,
        Status::Partial => bail!("request head is incomplete"),
    };

    let method = parsed
        .method
        .map(|token| Method::from_str(token).unwrap_or(Method::Unknown))
        .unwrap_or(Method::Unknown);

    let target = parsed.path.ok_or_eyre("request line carries no target")?;
    let url: Uri = target.parse()?;
    let query = Query::parse(url.query().unwrap_or(""));

    let mut header_map: FnvHashMap<CompactString, Vec<CompactString>> = FnvHashMap::default();
    for header in parsed.headers.iter() {
        let value = std::str::from_utf8(header.value)?;
        header_map
            .entry(CompactString::from(header.name))
            .or_default()
            .push(CompactString::from(value));
    }

    let body = trim_read_padding(&buffer[offset..]);
    debug!("parsed {method:?} {target} from {remote_address}");

    Ok(Request::from_parts(
        method,
        url,
        query,
        header_map,
        Bytes::copy_from_slice(body),
        remote_address,
    ))
}

/// Reused read buffers arrive NUL-padded past the payload; the body ends at
/// the first NUL, or the buffer end for an exactly-sized read.
fn trim_read_padding(body: &[u8]) -> &[u8] {
    memchr(b'\0', body).map_or(body, |idx| &body[..idx])
}
